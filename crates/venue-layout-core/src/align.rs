//! Align and distribute commands for the table selection.
//!
//! Both operate on percent rects and return new top-left corners, already
//! clamped to the canvas.

use crate::metrics::clamp_origin;
use crate::selection::TableKey;
use crate::snap::{Axis, Span};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Fewest tables an align command acts on.
pub const MIN_ALIGN_COUNT: usize = 2;
/// Fewest tables a distribute command acts on.
pub const MIN_DISTRIBUTE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignMode {
    Left,
    Right,
    /// Shared vertical center line.
    CenterHorizontal,
    Top,
    Bottom,
    /// Shared horizontal center line.
    CenterVertical,
}

impl AlignMode {
    pub fn axis(self) -> Axis {
        match self {
            AlignMode::Left | AlignMode::Right | AlignMode::CenterHorizontal => Axis::Horizontal,
            AlignMode::Top | AlignMode::Bottom | AlignMode::CenterVertical => Axis::Vertical,
        }
    }
}

/// A selected, placed table and the percent rect it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPosition {
    pub key: TableKey,
    pub rect: Rect,
}

fn with_start(rect: Rect, axis: Axis, start: f64) -> Point {
    let origin = match axis {
        Axis::Horizontal => Point::new(start, rect.y0),
        Axis::Vertical => Point::new(rect.x0, start),
    };
    clamp_origin(origin, rect.size())
}

/// New corners for every item, or `None` if there are too few.
pub fn align(items: &[SelectedPosition], mode: AlignMode) -> Option<Vec<(TableKey, Point)>> {
    if items.len() < MIN_ALIGN_COUNT {
        return None;
    }
    let axis = mode.axis();
    let spans: Vec<Span> = items.iter().map(|item| Span::of(item.rect, axis)).collect();
    let min_start = spans.iter().map(|s| s.start).fold(f64::INFINITY, f64::min);
    let max_end = spans.iter().map(|s| s.end).fold(f64::NEG_INFINITY, f64::max);
    let mean_center = spans.iter().map(Span::center).sum::<f64>() / spans.len() as f64;

    Some(
        items
            .iter()
            .zip(&spans)
            .map(|(item, span)| {
                let start = match mode {
                    AlignMode::Left | AlignMode::Top => min_start,
                    AlignMode::Right | AlignMode::Bottom => max_end - span.len(),
                    AlignMode::CenterHorizontal | AlignMode::CenterVertical => {
                        mean_center - span.len() / 2.0
                    }
                };
                (item.key.clone(), with_start(item.rect, axis, start))
            })
            .collect(),
    )
}

/// Equal gaps between items along `axis`, outermost items fixed.
pub fn distribute(items: &[SelectedPosition], axis: Axis) -> Option<Vec<(TableKey, Point)>> {
    if items.len() < MIN_DISTRIBUTE_COUNT {
        return None;
    }
    let mut ordered: Vec<&SelectedPosition> = items.iter().collect();
    ordered.sort_by(|a, b| {
        Span::of(a.rect, axis)
            .start
            .total_cmp(&Span::of(b.rect, axis).start)
            .then_with(|| a.key.cmp(&b.key))
    });

    let spans: Vec<Span> = ordered.iter().map(|item| Span::of(item.rect, axis)).collect();
    let first = spans[0];
    let last = spans[spans.len() - 1];
    let total: f64 = spans.iter().map(Span::len).sum();
    let gap = ((last.end - first.start) - total) / (spans.len() - 1) as f64;

    let mut cursor = first.start;
    let mut result = Vec::with_capacity(ordered.len());
    for (index, (item, span)) in ordered.iter().zip(&spans).enumerate() {
        let start = if index == 0 || index == spans.len() - 1 {
            span.start
        } else {
            cursor
        };
        result.push((item.key.clone(), with_start(item.rect, axis, start)));
        cursor = start + span.len() + gap;
    }
    Some(result)
}
