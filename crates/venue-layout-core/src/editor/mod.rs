//! The layout editor: selection, drag sessions and keyboard handling.
//!
//! [`LayoutEditor`] owns only transient interaction state. The layout
//! itself lives in a [`LayoutHost`], which the editor reads on every event
//! and writes only when a gesture or command commits.

mod actions;
mod keyboard;
mod pointer;

use crate::config::EditorConfig;
use crate::drag::{DragSession, PenContinuation};
use crate::drawing::{
    Handle, PathIndex, ResizeHandle, boundary_handles, hit_test_edge, hit_test_endpoint,
    hit_test_handles, hit_test_segment,
};
use crate::host::LayoutHost;
use crate::input::Modifiers;
use crate::metrics::CanvasMetrics;
use crate::model::{
    DrawnVenueLayout, Endpoint, SectionPatch, TablePosition, TableShape, VenueBoundary, VenueLine,
};
use crate::selection::{Selection, TableKey};
use crate::snap::{AlignmentGuide, snap_line_endpoint};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What a press on empty canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    /// Select and move tables and drawn elements.
    #[default]
    Select,
    /// Drag out the venue boundary.
    DrawBoundary,
    /// Drag out wall/divider lines.
    DrawLine,
}

impl EditorMode {
    pub fn name(&self) -> &'static str {
        match self {
            EditorMode::Select => "select",
            EditorMode::DrawBoundary => "boundary",
            EditorMode::DrawLine => "line",
        }
    }
}

/// Interactive editor state for one canvas.
#[derive(Debug, Clone, Default)]
pub struct LayoutEditor {
    config: EditorConfig,
    metrics: CanvasMetrics,
    mode: EditorMode,
    selection: Selection,
    session: Option<DragSession>,
    continuation: Option<PenContinuation>,
    guides: Vec<AlignmentGuide>,
    modifiers: Modifiers,
}

impl LayoutEditor {
    pub fn new(config: EditorConfig, metrics: CanvasMetrics) -> Self {
        Self {
            config,
            metrics,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &CanvasMetrics {
        &self.metrics
    }

    /// Update the measured canvas (after resize, zoom or pan).
    pub fn set_metrics(&mut self, metrics: CanvasMetrics) {
        self.metrics = metrics;
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn pen_continuation(&self) -> Option<&PenContinuation> {
        self.continuation.as_ref()
    }

    /// Draw mode: the host has no background image to place tables on.
    pub fn is_draw_mode<H: LayoutHost>(&self, host: &H) -> bool {
        !host.has_background_image()
    }

    /// Palette contents: every table without a placed position.
    pub fn palette<H: LayoutHost>(&self, host: &H) -> Vec<TableKey> {
        host.sections()
            .iter()
            .flat_map(|section| {
                section
                    .palette_indices()
                    .into_iter()
                    .map(|index| TableKey::new(section.id.clone(), index))
            })
            .collect()
    }

    /// Where a table should be drawn right now (live during a move).
    pub fn live_table_position<H: LayoutHost>(&self, host: &H, key: &TableKey) -> Option<TablePosition> {
        let committed = *host.section(&key.section_id)?.placed_position(key.table_index)?;
        let live = self
            .session
            .as_ref()
            .and_then(DragSession::table_move)
            .and_then(|drag| drag.live_origin(key));
        Some(live.map_or(committed, |origin| committed.with_origin(origin)))
    }

    /// Ghost of a palette table being dragged, once the pointer has moved.
    pub fn ghost_position(&self) -> Option<(TableKey, TablePosition)> {
        match &self.session {
            Some(DragSession::Palette(drag)) => drag
                .ghost
                .map(|origin| (drag.key.clone(), TablePosition::placed(origin, drag.size_px, TableShape::Square))),
            _ => None,
        }
    }

    pub fn alignment_guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    /// Boundary being drawn, moved or resized.
    pub fn preview_boundary(&self) -> Option<VenueBoundary> {
        match &self.session {
            Some(DragSession::DrawBoundary(gesture)) => Some(VenueBoundary::from_rect(Rect::new(
                gesture.start.x.min(gesture.current.x),
                gesture.start.y.min(gesture.current.y),
                gesture.start.x.max(gesture.current.x),
                gesture.start.y.max(gesture.current.y),
            ))),
            Some(DragSession::Boundary(drag)) => Some(drag.current),
            Some(DragSession::BoundaryResize(drag)) => Some(drag.current),
            _ => None,
        }
    }

    /// Segment being drawn, as (start, end) in percent.
    pub fn preview_line(&self) -> Option<(Point, Point)> {
        match &self.session {
            Some(DragSession::DrawLine(gesture)) => {
                let end = if self.modifiers.shift {
                    snap_line_endpoint(gesture.start, gesture.current, self.config.angle_increment).point
                } else {
                    gesture.current
                };
                Some((gesture.start, end))
            }
            _ => None,
        }
    }

    /// Drawn layout with any in-progress line or boundary edit applied.
    pub fn live_drawn_layout<H: LayoutHost>(&self, host: &H) -> DrawnVenueLayout {
        let drawn = host.drawn_layout();
        match &self.session {
            Some(DragSession::Boundary(drag)) => drawn.with_boundary(Some(drag.current)),
            Some(DragSession::BoundaryResize(drag)) => drawn.with_boundary(Some(drag.current)),
            Some(DragSession::Lines(drag)) => drawn.with_lines_replaced(&drag.current),
            Some(DragSession::LineEndpoint(drag)) => drawn.with_lines_replaced(std::slice::from_ref(&drag.current)),
            _ => drawn.clone(),
        }
    }

    /// Ids of lines to render as selected.
    pub fn highlighted_line_ids<H: LayoutHost>(&self, host: &H) -> BTreeSet<String> {
        self.selected_line_ids(host.drawn_layout())
    }

    /// Resize handles to render (percent), when an unlocked boundary is selected.
    pub fn boundary_handles<H: LayoutHost>(&self, host: &H) -> Vec<Handle> {
        if !self.selection.is_boundary_selected() {
            return Vec::new();
        }
        match self.live_drawn_layout(host).boundary {
            Some(boundary) if !boundary.locked => boundary_handles(boundary.rect()),
            _ => Vec::new(),
        }
    }

    fn selected_line_ids(&self, drawn: &DrawnVenueLayout) -> BTreeSet<String> {
        self.selection
            .selected_line_ids(drawn, &PathIndex::build(&drawn.lines))
    }

    fn sync_selection<H: LayoutHost>(&mut self, host: &H) {
        self.selection
            .retain_valid(host.sections(), host.drawn_layout());
    }

    fn px_rect(&self, rect: Rect) -> Rect {
        let p0 = self.metrics.percent_to_px(Point::new(rect.x0, rect.y0));
        let p1 = self.metrics.percent_to_px(Point::new(rect.x1, rect.y1));
        Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Percent rects of placed tables, skipping those `exclude` matches.
    fn placed_rects<H: LayoutHost>(&self, host: &H, exclude: impl Fn(&TableKey) -> bool) -> Vec<Rect> {
        let mut rects = Vec::new();
        for section in host.sections() {
            for index in section.placed_indices() {
                if exclude(&TableKey::new(section.id.clone(), index)) {
                    continue;
                }
                if let Some(position) = section.placed_position(index) {
                    rects.push(self.metrics.table_rect(position));
                }
            }
        }
        rects
    }

    /// Topmost placed table under a percent point.
    fn table_at<H: LayoutHost>(&self, host: &H, percent: Point) -> Option<TableKey> {
        let pointer = self.metrics.percent_to_px(percent);
        let mut hit = None;
        for section in host.sections() {
            for index in section.placed_indices() {
                let Some(position) = section.placed_position(index) else {
                    continue;
                };
                let rect = self.px_rect(self.metrics.table_rect(position));
                let inside = match position.shape {
                    TableShape::Square => rect.contains(pointer),
                    TableShape::Circle => {
                        let center = rect.center();
                        let rx = (rect.width() / 2.0).max(f64::EPSILON);
                        let ry = (rect.height() / 2.0).max(f64::EPSILON);
                        let dx = (pointer.x - center.x) / rx;
                        let dy = (pointer.y - center.y) / ry;
                        dx * dx + dy * dy <= 1.0
                    }
                };
                if inside {
                    hit = Some(TableKey::new(section.id.clone(), index));
                }
            }
        }
        hit
    }

    /// Topmost line endpoint under a percent point.
    fn endpoint_at<'a>(&self, drawn: &'a DrawnVenueLayout, percent: Point) -> Option<(&'a VenueLine, Endpoint)> {
        let pointer = self.metrics.percent_to_px(percent);
        drawn.lines.iter().rev().find_map(|line| {
            hit_test_endpoint(
                self.metrics.percent_to_px(line.start()),
                self.metrics.percent_to_px(line.end()),
                pointer,
                self.config.handle_hit_px,
            )
            .map(|endpoint| (line, endpoint))
        })
    }

    /// Topmost line body under a percent point.
    fn line_at<'a>(&self, drawn: &'a DrawnVenueLayout, percent: Point) -> Option<&'a VenueLine> {
        let pointer = self.metrics.percent_to_px(percent);
        drawn.lines.iter().rev().find(|line| {
            hit_test_segment(
                self.metrics.percent_to_px(line.start()),
                self.metrics.percent_to_px(line.end()),
                pointer,
                self.config.line_hit_px,
            )
        })
    }

    fn boundary_handle_at(&self, boundary: &VenueBoundary, percent: Point) -> Option<ResizeHandle> {
        hit_test_handles(
            self.px_rect(boundary.rect()),
            self.metrics.percent_to_px(percent),
            self.config.handle_hit_px,
        )
    }

    fn on_boundary_edge(&self, boundary: &VenueBoundary, percent: Point) -> bool {
        hit_test_edge(
            self.px_rect(boundary.rect()),
            self.metrics.percent_to_px(percent),
            self.config.line_hit_px,
        )
    }

    /// Write table positions back, one full-array update per section.
    fn commit_positions<H: LayoutHost>(&self, host: &mut H, updates: Vec<(TableKey, TablePosition)>) {
        let mut grouped: BTreeMap<String, Vec<(usize, TablePosition)>> = BTreeMap::new();
        for (key, position) in updates {
            grouped
                .entry(key.section_id)
                .or_default()
                .push((key.table_index, position));
        }

        let mut patches = Vec::with_capacity(grouped.len());
        for (section_id, updates) in grouped {
            match host.section(&section_id) {
                Some(section) => patches.push((section_id, section.positions_with_many(&updates))),
                None => log::warn!("Cannot commit positions for unknown section {}", section_id),
            }
        }

        for (section_id, positions) in patches {
            log::debug!("Committing {} positions for section {}", positions.len(), section_id);
            host.update_section(&section_id, SectionPatch::positions(positions));
        }
    }

    /// Move already-placed tables to new corners.
    fn commit_origins<H: LayoutHost>(&self, host: &mut H, origins: Vec<(TableKey, Point)>) {
        let updates: Vec<(TableKey, TablePosition)> = origins
            .into_iter()
            .filter_map(|(key, origin)| {
                let position = *host.section(&key.section_id)?.placed_position(key.table_index)?;
                let origin = self.metrics.clamp_table_origin(origin, position.size_px());
                Some((key, position.with_origin(origin)))
            })
            .collect();
        self.commit_positions(host, updates);
    }
}
