//! In-progress pointer gestures.
//!
//! Exactly one [`DragSession`] is active at a time. Each variant keeps the
//! state captured at press time plus the live preview, so pointer-up can
//! commit without re-reading anything the pointer-move handlers changed.

use crate::config::EditorConfig;
use crate::drawing::{ResizeHandle, move_boundary, move_endpoint, resize_boundary, translate_lines};
use crate::input::{Modifiers, PointerTrack};
use crate::metrics::{CanvasMetrics, clamp_delta, clamp_point};
use crate::model::{Endpoint, VenueBoundary, VenueLine};
use crate::selection::TableKey;
use crate::snap::Axis;
use kurbo::{Point, Rect, Size, Vec2};

/// A table taking part in a move, as it was at press time.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingTable {
    pub key: TableKey,
    /// Top-left corner in percent.
    pub origin: Point,
    pub size_px: Size,
}

/// Dragging a palette table onto the canvas.
#[derive(Debug, Clone)]
pub struct PaletteDrag {
    pub key: TableKey,
    pub size_px: Size,
    pub track: PointerTrack,
    /// Top-left of the ghost preview; unknown until the first move.
    pub ghost: Option<Point>,
}

impl PaletteDrag {
    pub fn new(key: TableKey, size_px: Size, start: Point) -> Self {
        Self {
            key,
            size_px,
            track: PointerTrack::new(start),
            ghost: None,
        }
    }

    pub fn update(&mut self, position: Point, metrics: &CanvasMetrics) {
        self.track.update(position);
        self.ghost = Some(self.drop_origin(position, metrics));
    }

    /// Clamped corner a drop at `position` lands on, before snapping.
    pub fn drop_origin(&self, position: Point, metrics: &CanvasMetrics) -> Point {
        metrics.clamp_table_origin(metrics.screen_to_percent(position), self.size_px)
    }
}

/// Moving one table, or a whole multi-selection rigidly.
#[derive(Debug, Clone)]
pub struct TableMoveDrag {
    pub primary: TableKey,
    pub members: Vec<MovingTable>,
    pub track: PointerTrack,
    /// Shift was held at press; an unmoved release toggles selection.
    pub shift_at_press: bool,
    pub axis_lock: Option<Axis>,
    /// Current percent delta, already constrained and clamped.
    pub delta: Vec2,
}

impl TableMoveDrag {
    pub fn new(primary: TableKey, members: Vec<MovingTable>, start: Point, shift_at_press: bool) -> Self {
        Self {
            primary,
            members,
            track: PointerTrack::new(start),
            shift_at_press,
            axis_lock: None,
            delta: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, position: Point, shift: bool, metrics: &CanvasMetrics, config: &EditorConfig) {
        self.track.update(position);
        self.recompute(shift, metrics, config);
    }

    /// Re-derive the delta for the current pointer (e.g. after shift changes).
    pub fn recompute(&mut self, shift: bool, metrics: &CanvasMetrics, config: &EditorConfig) {
        let raw = self.track.delta();
        self.axis_lock = if shift && raw.x.abs().max(raw.y.abs()) >= config.axis_lock_threshold {
            Some(if raw.x.abs() >= raw.y.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            })
        } else {
            None
        };
        let constrained = match self.axis_lock {
            Some(Axis::Horizontal) => Vec2::new(raw.x, 0.0),
            Some(Axis::Vertical) => Vec2::new(0.0, raw.y),
            None => raw,
        };
        let delta = metrics.screen_delta_to_percent(constrained);
        self.delta = match self.start_bounds(metrics) {
            Some(bounds) => clamp_delta(bounds, delta),
            None => delta,
        };
    }

    /// Union of all member rects at press time.
    pub fn start_bounds(&self, metrics: &CanvasMetrics) -> Option<Rect> {
        self.members
            .iter()
            .map(|m| metrics.table_rect_at(m.origin, m.size_px))
            .reduce(|acc, r| acc.union(r))
    }

    pub fn primary_member(&self) -> Option<&MovingTable> {
        self.members.iter().find(|m| m.key == self.primary)
    }

    pub fn is_moving(&self, key: &TableKey) -> bool {
        self.members.iter().any(|m| &m.key == key)
    }

    /// Live corner of a moving table.
    pub fn live_origin(&self, key: &TableKey) -> Option<Point> {
        self.members
            .iter()
            .find(|m| &m.key == key)
            .map(|m| m.origin + self.delta)
    }
}

/// Moving the whole boundary.
#[derive(Debug, Clone)]
pub struct BoundaryDrag {
    pub original: VenueBoundary,
    pub track: PointerTrack,
    pub current: VenueBoundary,
}

impl BoundaryDrag {
    pub fn new(original: VenueBoundary, start: Point) -> Self {
        Self {
            original,
            track: PointerTrack::new(start),
            current: original,
        }
    }

    pub fn update(&mut self, position: Point, metrics: &CanvasMetrics) {
        self.track.update(position);
        self.current = move_boundary(&self.original, metrics.screen_delta_to_percent(self.track.delta()));
    }
}

/// Dragging one of the boundary's resize handles.
#[derive(Debug, Clone)]
pub struct BoundaryResizeDrag {
    pub original: VenueBoundary,
    pub handle: ResizeHandle,
    pub track: PointerTrack,
    pub current: VenueBoundary,
}

impl BoundaryResizeDrag {
    pub fn new(original: VenueBoundary, handle: ResizeHandle, start: Point) -> Self {
        Self {
            original,
            handle,
            track: PointerTrack::new(start),
            current: original,
        }
    }

    pub fn update(&mut self, position: Point, metrics: &CanvasMetrics, config: &EditorConfig) {
        self.track.update(position);
        self.current = resize_boundary(
            &self.original,
            self.handle,
            metrics.screen_delta_to_percent(self.track.delta()),
            config.min_boundary_resize,
        );
    }
}

/// Moving a line group (a path or a shift-selected set) rigidly.
#[derive(Debug, Clone)]
pub struct LineGroupDrag {
    pub originals: Vec<VenueLine>,
    pub track: PointerTrack,
    pub current: Vec<VenueLine>,
}

impl LineGroupDrag {
    pub fn new(originals: Vec<VenueLine>, start: Point) -> Self {
        Self {
            current: originals.clone(),
            originals,
            track: PointerTrack::new(start),
        }
    }

    pub fn update(&mut self, position: Point, metrics: &CanvasMetrics) {
        self.track.update(position);
        self.current = translate_lines(&self.originals, metrics.screen_delta_to_percent(self.track.delta()));
    }
}

/// Press on a line endpoint: a reshape once it moves, otherwise a
/// continuation click.
#[derive(Debug, Clone)]
pub struct EndpointDrag {
    pub line: VenueLine,
    pub endpoint: Endpoint,
    pub track: PointerTrack,
    pub current: VenueLine,
}

impl EndpointDrag {
    pub fn new(line: VenueLine, endpoint: Endpoint, start: Point) -> Self {
        Self {
            current: line.clone(),
            line,
            endpoint,
            track: PointerTrack::new(start),
        }
    }

    pub fn update(&mut self, position: Point, shift: bool, metrics: &CanvasMetrics, config: &EditorConfig) {
        self.track.update(position);
        let to = metrics.screen_to_percent(position);
        self.current = move_endpoint(&self.line, self.endpoint, to, shift.then_some(config.angle_increment));
    }
}

/// Armed "continue from this endpoint" state of the line tool.
#[derive(Debug, Clone, PartialEq)]
pub struct PenContinuation {
    pub point: Point,
    pub source_line_id: String,
    pub path_id: Option<String>,
}

/// Rubber-band drawing of a new boundary or line (percent space).
#[derive(Debug, Clone)]
pub struct DrawGesture {
    pub start: Point,
    pub current: Point,
    pub track: PointerTrack,
    pub continuation: Option<PenContinuation>,
}

impl DrawGesture {
    pub fn new(start: Point, screen_start: Point, continuation: Option<PenContinuation>) -> Self {
        Self {
            start: clamp_point(start),
            current: clamp_point(start),
            track: PointerTrack::new(screen_start),
            continuation,
        }
    }

    pub fn update(&mut self, position: Point, metrics: &CanvasMetrics) {
        self.track.update(position);
        self.current = clamp_point(metrics.screen_to_percent(position));
    }
}

/// The single gesture in progress.
#[derive(Debug, Clone)]
pub enum DragSession {
    Palette(PaletteDrag),
    SingleMove(TableMoveDrag),
    MultiMove(TableMoveDrag),
    Boundary(BoundaryDrag),
    BoundaryResize(BoundaryResizeDrag),
    Lines(LineGroupDrag),
    LineEndpoint(EndpointDrag),
    DrawBoundary(DrawGesture),
    DrawLine(DrawGesture),
}

impl DragSession {
    pub fn track(&self) -> &PointerTrack {
        match self {
            DragSession::Palette(d) => &d.track,
            DragSession::SingleMove(d) | DragSession::MultiMove(d) => &d.track,
            DragSession::Boundary(d) => &d.track,
            DragSession::BoundaryResize(d) => &d.track,
            DragSession::Lines(d) => &d.track,
            DragSession::LineEndpoint(d) => &d.track,
            DragSession::DrawBoundary(d) | DragSession::DrawLine(d) => &d.track,
        }
    }

    /// Feed a pointer position into the session's preview.
    pub fn update(&mut self, position: Point, modifiers: Modifiers, metrics: &CanvasMetrics, config: &EditorConfig) {
        match self {
            DragSession::Palette(d) => d.update(position, metrics),
            DragSession::SingleMove(d) | DragSession::MultiMove(d) => {
                d.update(position, modifiers.shift, metrics, config)
            }
            DragSession::Boundary(d) => d.update(position, metrics),
            DragSession::BoundaryResize(d) => d.update(position, metrics, config),
            DragSession::Lines(d) => d.update(position, metrics),
            DragSession::LineEndpoint(d) => d.update(position, modifiers.shift, metrics, config),
            DragSession::DrawBoundary(d) | DragSession::DrawLine(d) => d.update(position, metrics),
        }
    }

    /// Table move sessions, single or multi.
    pub fn table_move(&self) -> Option<&TableMoveDrag> {
        match self {
            DragSession::SingleMove(d) | DragSession::MultiMove(d) => Some(d),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DragSession::Palette(_) => "palette",
            DragSession::SingleMove(_) => "single-move",
            DragSession::MultiMove(_) => "multi-move",
            DragSession::Boundary(_) => "boundary-move",
            DragSession::BoundaryResize(_) => "boundary-resize",
            DragSession::Lines(_) => "line-move",
            DragSession::LineEndpoint(_) => "line-endpoint",
            DragSession::DrawBoundary(_) => "draw-boundary",
            DragSession::DrawLine(_) => "draw-line",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> CanvasMetrics {
        CanvasMetrics::from_size(Size::new(1000.0, 1000.0))
    }

    fn member(index: usize, x: f64, y: f64) -> MovingTable {
        MovingTable {
            key: TableKey::new("s", index),
            origin: Point::new(x, y),
            size_px: Size::new(50.0, 50.0),
        }
    }

    #[test]
    fn test_single_move_delta() {
        let config = EditorConfig::default();
        let mut drag = TableMoveDrag::new(
            TableKey::new("s", 0),
            vec![member(0, 10.0, 10.0)],
            Point::new(100.0, 100.0),
            false,
        );
        drag.update(Point::new(200.0, 150.0), false, &metrics(), &config);
        let origin = drag.live_origin(&TableKey::new("s", 0)).unwrap();
        assert!((origin.x - 20.0).abs() < 1e-9);
        assert!((origin.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_lock_after_threshold() {
        let config = EditorConfig::default();
        let mut drag = TableMoveDrag::new(
            TableKey::new("s", 0),
            vec![member(0, 10.0, 10.0)],
            Point::new(100.0, 100.0),
            true,
        );
        drag.update(Point::new(103.0, 102.0), true, &metrics(), &config);
        assert_eq!(drag.axis_lock, None);

        drag.update(Point::new(160.0, 120.0), true, &metrics(), &config);
        assert_eq!(drag.axis_lock, Some(Axis::Horizontal));
        assert!(drag.delta.y.abs() < f64::EPSILON);

        // Releasing shift mid-drag frees the other axis.
        drag.recompute(false, &metrics(), &config);
        assert_eq!(drag.axis_lock, None);
        assert!((drag.delta.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_group_move_is_rigid() {
        let config = EditorConfig::default();
        let mut drag = TableMoveDrag::new(
            TableKey::new("s", 0),
            vec![member(0, 10.0, 10.0), member(1, 90.0, 10.0)],
            Point::new(0.0, 0.0),
            false,
        );
        drag.update(Point::new(200.0, 0.0), false, &metrics(), &config);
        // Second table hits the right edge after 5 percent.
        assert!((drag.delta.x - 5.0).abs() < 1e-9);
        let a = drag.live_origin(&TableKey::new("s", 0)).unwrap();
        let b = drag.live_origin(&TableKey::new("s", 1)).unwrap();
        assert!((b.x - a.x - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_palette_ghost_is_clamped() {
        let mut drag = PaletteDrag::new(TableKey::new("s", 0), Size::new(50.0, 50.0), Point::new(0.0, 0.0));
        assert!(drag.ghost.is_none());
        drag.update(Point::new(2000.0, 500.0), &metrics());
        let ghost = drag.ghost.unwrap();
        assert!((ghost.x - 95.0).abs() < 1e-9);
        assert!((ghost.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_endpoint_drag_tracks_travel() {
        let config = EditorConfig::default();
        let line = VenueLine::new("l", Point::new(10.0, 10.0), Point::new(20.0, 10.0));
        let mut drag = EndpointDrag::new(line, Endpoint::End, Point::new(200.0, 100.0));
        drag.update(Point::new(201.0, 100.0), false, &metrics(), &config);
        assert!(!drag.track.travelled(config.click_travel));
        drag.update(Point::new(300.0, 100.0), false, &metrics(), &config);
        assert!(drag.track.travelled(config.click_travel));
        assert_eq!(drag.current.end(), Point::new(30.0, 10.0));
        assert_eq!(drag.current.start(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_session_names() {
        let gesture = DrawGesture::new(Point::new(-5.0, 10.0), Point::ZERO, None);
        assert_eq!(gesture.start, Point::new(0.0, 10.0));
        let session = DragSession::DrawLine(gesture);
        assert_eq!(session.name(), "draw-line");
        assert!(session.table_move().is_none());
    }
}
