//! Creating, moving and resizing the venue boundary (percent space).

use super::handles::ResizeHandle;
use crate::metrics::{PERCENT_MAX, clamp_origin, clamp_point};
use crate::model::VenueBoundary;
use kurbo::{Point, Rect, Vec2};

/// Boundary spanned by a draw drag, or `None` if it is too small to keep.
pub fn boundary_from_drag(start: Point, end: Point, min_size: f64) -> Option<VenueBoundary> {
    let start = clamp_point(start);
    let end = clamp_point(end);
    let rect = Rect::new(
        start.x.min(end.x),
        start.y.min(end.y),
        start.x.max(end.x),
        start.y.max(end.y),
    );
    (rect.width() > min_size && rect.height() > min_size).then(|| VenueBoundary::from_rect(rect))
}

/// Translate a boundary, keeping it entirely on canvas.
pub fn move_boundary(original: &VenueBoundary, delta: Vec2) -> VenueBoundary {
    let rect = original.rect();
    let origin = clamp_origin(rect.origin() + delta, rect.size());
    VenueBoundary {
        x: origin.x,
        y: origin.y,
        ..*original
    }
}

/// Drag one handle by `delta`; the opposite side stays anchored.
///
/// Sides are floored at `min_size` and kept within the canvas.
pub fn resize_boundary(
    original: &VenueBoundary,
    handle: ResizeHandle,
    delta: Vec2,
    min_size: f64,
) -> VenueBoundary {
    let Rect { x0, y0, x1, y1 } = original.rect();
    let (mut nx0, mut ny0, mut nx1, mut ny1) = (x0, y0, x1, y1);

    if handle.moves_left() {
        nx0 = (x0 + delta.x).min((x1 - min_size).max(0.0)).max(0.0);
    }
    if handle.moves_right() {
        nx1 = (x1 + delta.x).max((x0 + min_size).min(PERCENT_MAX)).min(PERCENT_MAX);
    }
    if handle.moves_top() {
        ny0 = (y0 + delta.y).min((y1 - min_size).max(0.0)).max(0.0);
    }
    if handle.moves_bottom() {
        ny1 = (y1 + delta.y).max((y0 + min_size).min(PERCENT_MAX)).min(PERCENT_MAX);
    }

    VenueBoundary {
        locked: original.locked,
        ..VenueBoundary::from_rect(Rect::new(nx0, ny0, nx1, ny1))
    }
}
