//! Line segments: drawing, group moves, endpoint reshaping and hit tests.

use super::paths::new_line_id;
use crate::metrics::{PERCENT_MAX, clamp_delta, clamp_point};
use crate::model::{Endpoint, VenueLine};
use crate::snap::snap_line_endpoint;
use kurbo::{Point, Rect, Vec2};

/// Where a line drag ends, optionally angle-snapped around `start`.
///
/// A snapped end that would leave the canvas is pulled back along the
/// snapped ray, so the segment keeps its angle.
pub fn drawn_end_point(start: Point, end: Point, angle_increment: Option<f64>) -> Point {
    let end = clamp_point(end);
    let Some(increment) = angle_increment else {
        return end;
    };
    let snapped = snap_line_endpoint(start, end, increment);
    if clamp_point(snapped.point) == snapped.point {
        return snapped.point;
    }
    let (sin, cos) = snapped.angle_degrees.to_radians().sin_cos();
    let reach = ray_reach(start, Vec2::new(cos, sin)).min(snapped.distance);
    clamp_point(start + Vec2::new(cos, sin) * reach)
}

/// How far one can travel from `start` along unit `direction` inside the canvas.
fn ray_reach(start: Point, direction: Vec2) -> f64 {
    let limit = |origin: f64, step: f64| {
        if step > f64::EPSILON {
            (PERCENT_MAX - origin) / step
        } else if step < -f64::EPSILON {
            -origin / step
        } else {
            f64::INFINITY
        }
    };
    limit(start.x, direction.x).min(limit(start.y, direction.y)).max(0.0)
}

/// Line for a draw drag, or `None` if it is too short to keep.
pub fn line_from_drag(
    start: Point,
    end: Point,
    angle_increment: Option<f64>,
    min_length: f64,
) -> Option<VenueLine> {
    let start = clamp_point(start);
    let end = drawn_end_point(start, end, angle_increment);
    (start.distance(end) > min_length).then(|| VenueLine::new(new_line_id(), start, end))
}

/// Union of the bounds of the given lines.
pub fn lines_bounds<'a>(lines: impl IntoIterator<Item = &'a VenueLine>) -> Option<Rect> {
    lines
        .into_iter()
        .map(VenueLine::bounds)
        .reduce(|acc, r| acc.union(r))
}

/// Move lines rigidly; the delta is shrunk so none leaves the canvas.
pub fn translate_lines(lines: &[VenueLine], delta: Vec2) -> Vec<VenueLine> {
    let Some(bounds) = lines_bounds(lines) else {
        return Vec::new();
    };
    let delta = clamp_delta(bounds, delta);
    lines.iter().map(|line| line.translated(delta)).collect()
}

/// Move a single endpoint, leaving the other one in place.
pub fn move_endpoint(
    line: &VenueLine,
    endpoint: Endpoint,
    to: Point,
    angle_increment: Option<f64>,
) -> VenueLine {
    let anchor = line.point(endpoint.opposite());
    let mut moved = line.clone();
    moved.set_point(endpoint, drawn_end_point(anchor, to, angle_increment));
    moved
}

/// Minimum distance from a point to a line segment.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Check if a point lies within `tolerance` of the segment `a`-`b`.
pub fn hit_test_segment(a: Point, b: Point, point: Point, tolerance: f64) -> bool {
    point_to_segment_dist(point, a, b) <= tolerance
}

/// Which endpoint of `a`-`b` (if any) is within `tolerance` of `point`.
pub fn hit_test_endpoint(a: Point, b: Point, point: Point, tolerance: f64) -> Option<Endpoint> {
    let da = a.distance(point);
    let db = b.distance(point);
    if da <= tolerance && da <= db {
        Some(Endpoint::Start)
    } else if db <= tolerance {
        Some(Endpoint::End)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_discarded() {
        assert!(line_from_drag(Point::new(10.0, 10.0), Point::new(10.5, 10.5), None, 1.0).is_none());
        let line = line_from_drag(Point::new(10.0, 10.0), Point::new(20.0, 10.0), None, 1.0).unwrap();
        assert!(!line.id.is_empty());
        assert!(line.path_id.is_none());
    }

    #[test]
    fn test_angle_snapped_line() {
        let line = line_from_drag(Point::new(10.0, 10.0), Point::new(30.0, 12.0), Some(45.0), 1.0).unwrap();
        assert!((line.y2 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapped_line_near_edge_keeps_angle() {
        let line = line_from_drag(Point::new(95.0, 50.0), Point::new(100.0, 56.0), Some(45.0), 1.0).unwrap();
        assert!((line.x2 - 100.0).abs() < 1e-9);
        assert!((line.y2 - 55.0).abs() < 1e-9);
        let angle = (line.y2 - line.y1).atan2(line.x2 - line.x1).to_degrees();
        assert!((angle - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_snapped_endpoint_move_stays_on_ray() {
        let line = VenueLine::new("a", Point::new(50.0, 4.0), Point::new(60.0, 14.0));
        // Dragging up and right past the top edge snaps to -45 degrees (315).
        let moved = move_endpoint(&line, Endpoint::End, Point::new(58.0, -20.0), Some(45.0));
        assert_eq!(moved.start(), line.start());
        assert!(moved.y2.abs() < 1e-9);
        assert!((moved.x2 - 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_end_clamped() {
        let line = line_from_drag(Point::new(90.0, 50.0), Point::new(130.0, 50.0), None, 1.0).unwrap();
        assert!((line.x2 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_group_translate_clamps_rigidly() {
        let lines = vec![
            VenueLine::new("a", Point::new(10.0, 10.0), Point::new(50.0, 10.0)),
            VenueLine::new("b", Point::new(50.0, 10.0), Point::new(90.0, 40.0)),
        ];
        let moved = translate_lines(&lines, Vec2::new(20.0, 5.0));
        assert!((moved[1].x2 - 100.0).abs() < 1e-9);
        assert!((moved[0].x1 - 20.0).abs() < 1e-9);
        assert!((moved[0].y1 - 15.0).abs() < 1e-9);
        // Shared vertex stays shared.
        assert_eq!(moved[0].end(), moved[1].start());
    }

    #[test]
    fn test_move_endpoint_keeps_other_end() {
        let line = VenueLine::new("a", Point::new(10.0, 10.0), Point::new(50.0, 10.0));
        let moved = move_endpoint(&line, Endpoint::End, Point::new(60.0, 30.0), None);
        assert_eq!(moved.start(), line.start());
        assert_eq!(moved.end(), Point::new(60.0, 30.0));
    }

    #[test]
    fn test_segment_hit() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!(hit_test_segment(a, b, Point::new(50.0, 5.0), 6.0));
        assert!(!hit_test_segment(a, b, Point::new(50.0, 7.0), 6.0));
        assert!(!hit_test_segment(a, b, Point::new(110.0, 0.0), 6.0));
    }

    #[test]
    fn test_endpoint_hit_prefers_nearest() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        assert_eq!(hit_test_endpoint(a, b, Point::new(3.0, 0.0), 8.0), Some(Endpoint::End));
        assert_eq!(hit_test_endpoint(a, b, Point::new(1.0, 0.0), 8.0), Some(Endpoint::Start));
        assert_eq!(hit_test_endpoint(a, b, Point::new(50.0, 0.0), 8.0), None);
    }
}
