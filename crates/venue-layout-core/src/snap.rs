//! Snap functionality for aligning tables to each other and lines to angles.
//!
//! Table snapping compares edges and centers of the dragged table against
//! every other placed table, one axis at a time. Comparisons run in a fixed
//! order and the first one within the threshold wins, so results never
//! depend on how close a later candidate happens to be.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default alignment snap distance in percent units.
pub const ALIGNMENT_THRESHOLD: f64 = 0.5;

/// Default angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 45.0;

/// A canvas axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Extent of a rect along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn of(rect: Rect, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self { start: rect.x0, end: rect.x1 },
            Axis::Vertical => Self { start: rect.y0, end: rect.y1 },
        }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// One edge/center comparison between the dragged table and a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePairing {
    StartToStart,
    EndToEnd,
    CenterToCenter,
    /// Dragged table abuts the neighbor's far side.
    StartToEnd,
    /// Dragged table abuts the neighbor's near side.
    EndToStart,
    StartToCenter,
}

/// Evaluation order of the pairings; earlier entries win.
pub const PAIRING_ORDER: [EdgePairing; 6] = [
    EdgePairing::StartToStart,
    EdgePairing::EndToEnd,
    EdgePairing::CenterToCenter,
    EdgePairing::StartToEnd,
    EdgePairing::EndToStart,
    EdgePairing::StartToCenter,
];

impl EdgePairing {
    /// (dragged coordinate, neighbor coordinate) being compared.
    fn coordinates(self, dragged: Span, other: Span) -> (f64, f64) {
        match self {
            EdgePairing::StartToStart => (dragged.start, other.start),
            EdgePairing::EndToEnd => (dragged.end, other.end),
            EdgePairing::CenterToCenter => (dragged.center(), other.center()),
            EdgePairing::StartToEnd => (dragged.start, other.end),
            EdgePairing::EndToStart => (dragged.end, other.start),
            EdgePairing::StartToCenter => (dragged.start, other.center()),
        }
    }

    /// Start of the dragged span once the compared coordinates coincide.
    fn snapped_start(self, dragged: Span, other: Span) -> f64 {
        let (_, to) = self.coordinates(dragged, other);
        match self {
            EdgePairing::StartToStart | EdgePairing::StartToEnd | EdgePairing::StartToCenter => to,
            EdgePairing::EndToEnd | EdgePairing::EndToStart => to - dragged.len(),
            EdgePairing::CenterToCenter => to - dragged.len() / 2.0,
        }
    }
}

/// First matching pairing against a single neighbor, if any.
fn match_span(dragged: Span, other: Span, threshold: f64) -> Option<(EdgePairing, f64)> {
    PAIRING_ORDER.iter().find_map(|&pairing| {
        let (from, to) = pairing.coordinates(dragged, other);
        ((from - to).abs() < threshold).then_some((pairing, to))
    })
}

/// Snapped start along one axis, first neighbor and first pairing wins.
pub fn snap_axis(dragged: Span, others: &[Span], threshold: f64) -> Option<f64> {
    others.iter().find_map(|&other| {
        match_span(dragged, other, threshold).map(|(pairing, _)| pairing.snapped_start(dragged, other))
    })
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped top-left corner.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap the dragged table rect (percent) against its neighbors.
pub fn snap_to_tables(dragged: Rect, others: &[Rect], threshold: f64) -> SnapResult {
    let xs: Vec<Span> = others.iter().map(|r| Span::of(*r, Axis::Horizontal)).collect();
    let ys: Vec<Span> = others.iter().map(|r| Span::of(*r, Axis::Vertical)).collect();
    let x = snap_axis(Span::of(dragged, Axis::Horizontal), &xs, threshold);
    let y = snap_axis(Span::of(dragged, Axis::Vertical), &ys, threshold);
    SnapResult {
        point: Point::new(x.unwrap_or(dragged.x0), y.unwrap_or(dragged.y0)),
        snapped_x: x.is_some(),
        snapped_y: y.is_some(),
    }
}

/// Orientation of a guide line on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// Constant x; drawn for horizontal alignment matches.
    Vertical,
    /// Constant y; drawn for vertical alignment matches.
    Horizontal,
}

/// A transient guide line shown while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub orientation: GuideOrientation,
    /// Fixed coordinate (x for vertical guides, y for horizontal ones).
    pub position: f64,
    /// Extent along the guide, covering both tables.
    pub start: f64,
    pub end: f64,
}

/// Guides for every neighbor the dragged rect currently lines up with.
pub fn detect_alignment_guides(dragged: Rect, others: &[Rect], threshold: f64) -> Vec<AlignmentGuide> {
    let mut guides: Vec<AlignmentGuide> = Vec::new();
    let mut push = |guide: AlignmentGuide| {
        let existing = guides.iter_mut().find(|g| {
            g.orientation == guide.orientation && (g.position - guide.position).abs() < f64::EPSILON
        });
        match existing {
            Some(g) => {
                g.start = g.start.min(guide.start);
                g.end = g.end.max(guide.end);
            }
            None => guides.push(guide),
        }
    };

    for other in others {
        if let Some((_, x)) = match_span(
            Span::of(dragged, Axis::Horizontal),
            Span::of(*other, Axis::Horizontal),
            threshold,
        ) {
            push(AlignmentGuide {
                orientation: GuideOrientation::Vertical,
                position: x,
                start: dragged.y0.min(other.y0),
                end: dragged.y1.max(other.y1),
            });
        }
        if let Some((_, y)) = match_span(
            Span::of(dragged, Axis::Vertical),
            Span::of(*other, Axis::Vertical),
            threshold,
        ) {
            push(AlignmentGuide {
                orientation: GuideOrientation::Horizontal,
                position: y,
                start: dragged.x0.min(other.x0),
                end: dragged.x1.max(other.x1),
            });
        }
    }
    guides
}

/// Result of an angle snap operation.
#[derive(Debug, Clone, Copy)]
pub struct AngleSnapResult {
    /// The snapped endpoint.
    pub point: Point,
    /// The snapped angle in degrees (0-360).
    pub angle_degrees: f64,
    /// Distance from start point (preserved from original).
    pub distance: f64,
}

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    let snapped = (angle_degrees / increment).round() * increment;
    if snapped < 0.0 {
        snapped + 360.0
    } else if snapped >= 360.0 {
        snapped - 360.0
    } else {
        snapped
    }
}

/// Snap a line endpoint to angle increments from a start point,
/// preserving the distance from start.
pub fn snap_line_endpoint(start: Point, end: Point, increment: f64) -> AngleSnapResult {
    let delta = end - start;
    let distance = delta.hypot();

    if distance < 0.001 || increment <= 0.0 {
        return AngleSnapResult {
            point: end,
            angle_degrees: 0.0,
            distance,
        };
    }

    let angle = delta.y.atan2(delta.x).to_degrees();
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    let snapped_angle = snap_angle(angle, increment);
    let radians = snapped_angle.to_radians();

    AngleSnapResult {
        point: Point::new(
            start.x + distance * radians.cos(),
            start.y + distance * radians.sin(),
        ),
        angle_degrees: snapped_angle,
        distance,
    }
}
