//! Viewport module for canvas pan/zoom.
//!
//! The canvas is zoomed around its own center and then panned. The
//! measured on-screen rect produced here is what [`CanvasMetrics`] consumes,
//! so both views of the pointer agree on percent coordinates.

use crate::metrics::{CanvasMetrics, PERCENT_MAX};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Width-to-height ratio of a draw-mode canvas that has no background image.
pub const DEFAULT_ASPECT_RATIO: f64 = 4.0 / 3.0;

/// Viewport holds the canvas placement and its zoom/pan state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the canvas container's top-left corner.
    pub origin: Point,
    /// Canvas size before zoom.
    pub base_size: Size,
    /// Pan offset in screen pixels.
    pub pan: Vec2,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(1000.0, 750.0))
    }
}

impl Viewport {
    pub fn new(base_size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            base_size,
            pan: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.25,
            max_zoom: 4.0,
        }
    }

    /// Canvas of `width` pixels whose height follows `aspect_ratio` (width / height).
    pub fn for_aspect_ratio(width: f64, aspect_ratio: f64) -> Self {
        let ratio = if aspect_ratio > f64::EPSILON {
            aspect_ratio
        } else {
            DEFAULT_ASPECT_RATIO
        };
        Self::new(Size::new(width, width / ratio))
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.base_size.width / 2.0, self.base_size.height / 2.0)
    }

    /// Transform from unscaled canvas pixels to screen pixels.
    pub fn transform(&self) -> Affine {
        let center = self.center();
        Affine::translate(self.origin.to_vec2() + center + self.pan)
            * Affine::scale(self.zoom)
            * Affine::translate(-center)
    }

    /// Transform from screen pixels to unscaled canvas pixels.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.inverse_transform() * screen
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.transform() * canvas
    }

    /// Screen point to percent of the canvas.
    pub fn screen_to_percent(&self, screen: Point) -> Point {
        let local = self.screen_to_canvas(screen);
        let w = self.base_size.width.max(f64::EPSILON);
        let h = self.base_size.height.max(f64::EPSILON);
        Point::new(local.x / w * PERCENT_MAX, local.y / h * PERCENT_MAX)
    }

    /// Bounding rect of the canvas as measured on screen.
    pub fn measured_rect(&self) -> Rect {
        self.transform()
            .transform_rect_bbox(Rect::from_origin_size(Point::ZERO, self.base_size))
    }

    /// Metrics snapshot for the editor.
    pub fn metrics(&self) -> CanvasMetrics {
        CanvasMetrics::new(self.measured_rect(), self.zoom)
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let canvas_point = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        let new_screen = self.canvas_to_screen(canvas_point);
        self.pan += screen_point - new_screen;
    }

    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_default_viewport_is_identity() {
        let viewport = Viewport::default();
        let p = Point::new(123.0, 456.0);
        assert!(approx(viewport.canvas_to_screen(p), p));
        assert_eq!(viewport.measured_rect(), Rect::new(0.0, 0.0, 1000.0, 750.0));
    }

    #[test]
    fn test_zoom_is_anchored_at_center() {
        let mut viewport = Viewport::new(Size::new(800.0, 600.0));
        viewport.set_zoom(2.0);
        let center = Point::new(400.0, 300.0);
        assert!(approx(viewport.canvas_to_screen(center), center));
        let rect = viewport.measured_rect();
        assert!((rect.x0 + 400.0).abs() < 1e-9);
        assert!((rect.width() - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_agree_with_viewport() {
        let mut viewport = Viewport::new(Size::new(900.0, 600.0));
        viewport.origin = Point::new(40.0, 25.0);
        viewport.set_zoom(1.5);
        viewport.pan_by(Vec2::new(-70.0, 33.0));
        let metrics = viewport.metrics();
        for screen in [Point::new(10.0, 10.0), Point::new(500.0, 420.0), Point::new(-30.0, 900.0)] {
            assert!(approx(metrics.screen_to_percent(screen), viewport.screen_to_percent(screen)));
        }
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut viewport = Viewport::new(Size::new(800.0, 600.0));
        let anchor = Point::new(100.0, 80.0);
        let before = viewport.screen_to_percent(anchor);
        viewport.zoom_at(anchor, 2.0);
        assert!(approx(viewport.screen_to_percent(anchor), before));
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(Point::ZERO, 0.001);
        assert!((viewport.zoom - viewport.min_zoom).abs() < f64::EPSILON);
        viewport.zoom_at(Point::ZERO, 1000.0);
        assert!((viewport.zoom - viewport.max_zoom).abs() < f64::EPSILON);
        viewport.reset();
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aspect_ratio_canvas() {
        let viewport = Viewport::for_aspect_ratio(800.0, 2.0);
        assert_eq!(viewport.base_size, Size::new(800.0, 400.0));
        let fallback = Viewport::for_aspect_ratio(800.0, 0.0);
        assert_eq!(fallback.base_size, Size::new(800.0, 600.0));
    }
}
