//! Conversions between screen pixels, canvas pixels and percent coordinates.
//!
//! The canvas is measured on screen *after* zoom, but percent coordinates
//! and pixel table sizes both refer to the unscaled canvas. Every conversion
//! therefore goes through [`CanvasMetrics::unscaled_size`].

use crate::model::TablePosition;
use kurbo::{Point, Rect, Size, Vec2};

/// Upper bound of the percent coordinate space.
pub const PERCENT_MAX: f64 = 100.0;

fn ratio(value: f64, total: f64) -> f64 {
    if total.abs() < f64::EPSILON {
        0.0
    } else {
        value / total * PERCENT_MAX
    }
}

/// Clamp a percent point into the canvas.
pub fn clamp_point(point: Point) -> Point {
    Point::new(
        point.x.clamp(0.0, PERCENT_MAX),
        point.y.clamp(0.0, PERCENT_MAX),
    )
}

/// Clamp a top-left corner so an element of `size` (percent) stays on canvas.
pub fn clamp_origin(origin: Point, size: Size) -> Point {
    let max_x = (PERCENT_MAX - size.width).max(0.0);
    let max_y = (PERCENT_MAX - size.height).max(0.0);
    Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
}

/// Shrink `delta` so that `bounds` translated by it stays on canvas.
///
/// Used for rigid group moves: the whole group stops at the first edge.
pub fn clamp_delta(bounds: Rect, delta: Vec2) -> Vec2 {
    let min_dx = -bounds.x0;
    let max_dx = (PERCENT_MAX - bounds.x1).max(min_dx);
    let min_dy = -bounds.y0;
    let max_dy = (PERCENT_MAX - bounds.y1).max(min_dy);
    Vec2::new(delta.x.clamp(min_dx, max_dx), delta.y.clamp(min_dy, max_dy))
}

/// Measured canvas geometry used for every pointer conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMetrics {
    /// Bounding rect of the canvas on screen, zoom already applied.
    rect: Rect,
    zoom: f64,
}

impl Default for CanvasMetrics {
    fn default() -> Self {
        Self::from_size(Size::new(1000.0, 750.0))
    }
}

impl CanvasMetrics {
    pub fn new(rect: Rect, zoom: f64) -> Self {
        let zoom = if zoom > f64::EPSILON { zoom } else { 1.0 };
        Self { rect, zoom }
    }

    /// An unzoomed canvas anchored at the screen origin.
    pub fn from_size(size: Size) -> Self {
        Self::new(Rect::from_origin_size(Point::ZERO, size), 1.0)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Canvas size before zoom.
    pub fn unscaled_size(&self) -> Size {
        Size::new(self.rect.width() / self.zoom, self.rect.height() / self.zoom)
    }

    /// Screen point to percent of the canvas. Not clamped.
    pub fn screen_to_percent(&self, screen: Point) -> Point {
        let local = (screen - self.rect.origin()) / self.zoom;
        let size = self.unscaled_size();
        Point::new(ratio(local.x, size.width), ratio(local.y, size.height))
    }

    /// Percent of the canvas to screen point.
    pub fn percent_to_screen(&self, percent: Point) -> Point {
        self.rect.origin()
            + Vec2::new(
                percent.x / PERCENT_MAX * self.rect.width(),
                percent.y / PERCENT_MAX * self.rect.height(),
            )
    }

    /// Screen-space drag delta to a percent delta.
    pub fn screen_delta_to_percent(&self, delta: Vec2) -> Vec2 {
        Vec2::new(
            ratio(delta.x, self.rect.width()),
            ratio(delta.y, self.rect.height()),
        )
    }

    pub fn px_to_percent_x(&self, px: f64) -> f64 {
        ratio(px, self.unscaled_size().width)
    }

    pub fn px_to_percent_y(&self, px: f64) -> f64 {
        ratio(px, self.unscaled_size().height)
    }

    pub fn percent_to_px_x(&self, percent: f64) -> f64 {
        percent / PERCENT_MAX * self.unscaled_size().width
    }

    pub fn percent_to_px_y(&self, percent: f64) -> f64 {
        percent / PERCENT_MAX * self.unscaled_size().height
    }

    /// Percent point to unscaled canvas pixels, for distance tests.
    pub fn percent_to_px(&self, percent: Point) -> Point {
        Point::new(self.percent_to_px_x(percent.x), self.percent_to_px_y(percent.y))
    }

    /// Pixel size to its percent footprint.
    pub fn size_to_percent(&self, size: Size) -> Size {
        Size::new(self.px_to_percent_x(size.width), self.px_to_percent_y(size.height))
    }

    /// Rect a table covers, in percent.
    pub fn table_rect(&self, position: &TablePosition) -> Rect {
        self.table_rect_at(position.origin(), position.size_px())
    }

    /// Rect a table of `size_px` would cover with its corner at `origin`.
    pub fn table_rect_at(&self, origin: Point, size_px: Size) -> Rect {
        Rect::from_origin_size(origin, self.size_to_percent(size_px))
    }

    /// Clamp a table corner so the table stays on canvas.
    pub fn clamp_table_origin(&self, origin: Point, size_px: Size) -> Point {
        clamp_origin(origin, self.size_to_percent(size_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_screen_to_percent_unzoomed() {
        let metrics = CanvasMetrics::new(Rect::new(100.0, 50.0, 1100.0, 550.0), 1.0);
        let p = metrics.screen_to_percent(Point::new(600.0, 300.0));
        assert!(approx(p.x, 50.0));
        assert!(approx(p.y, 50.0));
    }

    #[test]
    fn test_zoom_does_not_change_percent() {
        // Same canvas at 2x: the rect doubles, percent of its middle is still 50.
        let metrics = CanvasMetrics::new(Rect::new(0.0, 0.0, 2000.0, 1000.0), 2.0);
        assert_eq!(metrics.unscaled_size(), Size::new(1000.0, 500.0));
        let p = metrics.screen_to_percent(Point::new(1000.0, 500.0));
        assert!(approx(p.x, 50.0));
        assert!(approx(p.y, 50.0));
        // Table pixel sizes are measured against the unscaled canvas.
        assert!(approx(metrics.px_to_percent_x(100.0), 10.0));
    }

    #[test]
    fn test_percent_screen_inverse() {
        let metrics = CanvasMetrics::new(Rect::new(30.0, 40.0, 930.0, 640.0), 1.5);
        let p = Point::new(12.5, 80.0);
        let back = metrics.screen_to_percent(metrics.percent_to_screen(p));
        assert!(approx(back.x, p.x));
        assert!(approx(back.y, p.y));
    }

    #[test]
    fn test_table_rect_width() {
        let metrics = CanvasMetrics::from_size(Size::new(900.0, 600.0));
        let pos = TablePosition::unplaced().with_origin(Point::new(10.0, 20.0));
        let rect = metrics.table_rect(&pos);
        assert!(approx(rect.width(), 48.0 / 900.0 * 100.0));
        assert!(approx(rect.height(), 8.0));
    }

    #[test]
    fn test_clamp_origin_keeps_table_on_canvas() {
        let metrics = CanvasMetrics::from_size(Size::new(1000.0, 1000.0));
        let origin = metrics.clamp_table_origin(Point::new(99.0, -5.0), Size::new(50.0, 50.0));
        assert!(approx(origin.x, 95.0));
        assert!(approx(origin.y, 0.0));
    }

    #[test]
    fn test_clamp_delta_stops_group_at_edge() {
        let bounds = Rect::new(10.0, 10.0, 90.0, 20.0);
        let delta = clamp_delta(bounds, Vec2::new(30.0, -50.0));
        assert!(approx(delta.x, 10.0));
        assert!(approx(delta.y, -10.0));
    }

    #[test]
    fn test_degenerate_canvas_maps_to_zero() {
        let metrics = CanvasMetrics::new(Rect::new(0.0, 0.0, 0.0, 0.0), 1.0);
        assert_eq!(metrics.screen_to_percent(Point::new(5.0, 5.0)), Point::ZERO);
    }
}
