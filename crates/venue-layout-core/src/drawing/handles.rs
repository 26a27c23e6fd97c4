//! Boundary resize handles and edge hit testing.
//!
//! Hit tests take rects and points in the same space (the editor passes
//! unscaled canvas pixels so tolerances are round on screen).

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight boundary resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::BottomLeft) | ResizeHandle::Edge(Edge::Left)
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopRight | Corner::BottomRight) | ResizeHandle::Edge(Edge::Right)
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::TopRight) | ResizeHandle::Edge(Edge::Top)
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::BottomLeft | Corner::BottomRight) | ResizeHandle::Edge(Edge::Bottom)
        )
    }
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    pub fn new(position: Point, kind: ResizeHandle) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= tolerance
    }
}

/// The eight handles of a boundary rect: corners first, then edge midpoints.
pub fn boundary_handles(bounds: Rect) -> Vec<Handle> {
    let mid_x = (bounds.x0 + bounds.x1) / 2.0;
    let mid_y = (bounds.y0 + bounds.y1) / 2.0;
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), ResizeHandle::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), ResizeHandle::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), ResizeHandle::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), ResizeHandle::Corner(Corner::BottomRight)),
        Handle::new(Point::new(mid_x, bounds.y0), ResizeHandle::Edge(Edge::Top)),
        Handle::new(Point::new(bounds.x1, mid_y), ResizeHandle::Edge(Edge::Right)),
        Handle::new(Point::new(mid_x, bounds.y1), ResizeHandle::Edge(Edge::Bottom)),
        Handle::new(Point::new(bounds.x0, mid_y), ResizeHandle::Edge(Edge::Left)),
    ]
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    boundary_handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Check if a point is within tolerance of an edge but not deep inside.
pub fn hit_test_edge(bounds: Rect, point: Point, tolerance: f64) -> bool {
    let outer = bounds.inflate(tolerance, tolerance);
    let inner = bounds.inset(-tolerance.min(bounds.width() / 2.0).min(bounds.height() / 2.0));
    outer.contains(point) && !inner.contains(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_handles() {
        let handles = boundary_handles(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(handles.len(), 8);
        assert_eq!(handles[5].position, Point::new(100.0, 25.0));
    }

    #[test]
    fn test_hit_corner_before_edge() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(
            hit_test_handles(bounds, Point::new(101.0, 49.0), 8.0),
            Some(ResizeHandle::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit_test_handles(bounds, Point::new(50.0, 3.0), 8.0),
            Some(ResizeHandle::Edge(Edge::Top))
        );
        assert_eq!(hit_test_handles(bounds, Point::new(50.0, 25.0), 8.0), None);
    }

    #[test]
    fn test_edge_band() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(hit_test_edge(bounds, Point::new(30.0, 2.0), 6.0));
        assert!(hit_test_edge(bounds, Point::new(-3.0, 20.0), 6.0));
        assert!(!hit_test_edge(bounds, Point::new(50.0, 25.0), 6.0));
        assert!(!hit_test_edge(bounds, Point::new(150.0, 25.0), 6.0));
    }

    #[test]
    fn test_handle_sides() {
        let h = ResizeHandle::Corner(Corner::TopLeft);
        assert!(h.moves_left() && h.moves_top());
        assert!(!h.moves_right() && !h.moves_bottom());
        let e = ResizeHandle::Edge(Edge::Right);
        assert!(e.moves_right() && !e.moves_top());
    }
}
