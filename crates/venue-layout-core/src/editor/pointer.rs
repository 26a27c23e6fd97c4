//! Press/move/release handling.

use super::{EditorMode, LayoutEditor};
use crate::drag::{
    BoundaryDrag, BoundaryResizeDrag, DragSession, DrawGesture, EndpointDrag, LineGroupDrag,
    MovingTable, PaletteDrag, PenContinuation, TableMoveDrag,
};
use crate::drawing::{boundary_from_drag, line_from_drag, new_path_id};
use crate::host::LayoutHost;
use crate::input::{Modifiers, MouseButton, PointerEvent};
use crate::metrics::clamp_delta;
use crate::model::{TablePosition, TableShape, VenueLine};
use crate::selection::TableKey;
use crate::snap::{Axis, detect_alignment_guides, snap_to_tables};
use kurbo::{Point, Size, Vec2};

impl LayoutEditor {
    /// Dispatch a pointer event. Only the left button drives gestures.
    pub fn handle_pointer<H: LayoutHost>(&mut self, host: &mut H, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                modifiers,
            } => self.pointer_down(host, position, modifiers),
            PointerEvent::Move { position, modifiers } => self.pointer_move(host, position, modifiers),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
                modifiers,
            } => self.pointer_up(host, position, modifiers),
            _ => {}
        }
    }

    /// Start dragging a palette table. Returns false if it cannot be placed.
    pub fn begin_palette_drag<H: LayoutHost>(
        &mut self,
        host: &H,
        key: TableKey,
        position: Point,
        modifiers: Modifiers,
    ) -> bool {
        self.modifiers = modifiers;
        if self.session.is_some() {
            return false;
        }
        let Some(section) = host.section(&key.section_id) else {
            log::warn!("Palette drag for unknown section {}", key.section_id);
            return false;
        };
        if key.table_index >= section.table_count || section.is_placed(key.table_index) {
            log::debug!("Table {:?} is not in the palette", key);
            return false;
        }
        let size = self.config.palette_table_size;
        self.selection.clear_drawn();
        self.session = Some(DragSession::Palette(PaletteDrag::new(key, Size::new(size, size), position)));
        true
    }

    pub fn pointer_down<H: LayoutHost>(&mut self, host: &mut H, position: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if let Some(session) = &self.session {
            log::debug!("Ignoring press during {} drag", session.name());
            return;
        }
        self.sync_selection(&*host);
        let percent = self.metrics.screen_to_percent(position);

        match self.mode {
            EditorMode::DrawBoundary => {
                if host.drawn_layout().boundary.is_some() {
                    log::debug!("Boundary already exists; back to select mode");
                    self.mode = EditorMode::Select;
                } else {
                    self.session = Some(DragSession::DrawBoundary(DrawGesture::new(percent, position, None)));
                    return;
                }
            }
            EditorMode::DrawLine => {
                self.press_draw_line(&*host, position, percent);
                return;
            }
            EditorMode::Select => {}
        }
        self.press_select(&*host, position, percent, modifiers.shift);
    }

    fn press_draw_line<H: LayoutHost>(&mut self, host: &H, position: Point, percent: Point) {
        if let Some(continuation) = self.continuation.take() {
            let start = continuation.point;
            self.session = Some(DragSession::DrawLine(DrawGesture::new(start, position, Some(continuation))));
            return;
        }
        if let Some((line, endpoint)) = self.endpoint_at(host.drawn_layout(), percent) {
            if !line.locked {
                self.session = Some(DragSession::LineEndpoint(EndpointDrag::new(line.clone(), endpoint, position)));
                return;
            }
        }
        self.session = Some(DragSession::DrawLine(DrawGesture::new(percent, position, None)));
    }

    fn press_select<H: LayoutHost>(&mut self, host: &H, position: Point, percent: Point, shift: bool) {
        let drawn = host.drawn_layout();

        if self.selection.is_boundary_selected() {
            if let Some(boundary) = drawn.boundary.filter(|b| !b.locked) {
                if let Some(handle) = self.boundary_handle_at(&boundary, percent) {
                    self.session = Some(DragSession::BoundaryResize(BoundaryResizeDrag::new(
                        boundary, handle, position,
                    )));
                    return;
                }
            }
        }

        if !shift {
            if let Some((line, endpoint)) = self.endpoint_at(drawn, percent) {
                if !line.locked {
                    if !self.selected_line_ids(drawn).contains(&line.id) {
                        self.selection.select_line(line);
                    }
                    self.session = Some(DragSession::LineEndpoint(EndpointDrag::new(line.clone(), endpoint, position)));
                    return;
                }
            }
        }

        if let Some(key) = self.table_at(host, percent) {
            self.press_table(host, key, position, shift);
            return;
        }

        if let Some(line) = self.line_at(drawn, percent) {
            let line = line.clone();
            self.press_line(host, line, position, shift);
            return;
        }

        if let Some(boundary) = drawn.boundary {
            if self.on_boundary_edge(&boundary, percent) {
                self.selection.select_boundary();
                if boundary.locked {
                    log::debug!("Boundary is locked");
                } else {
                    self.session = Some(DragSession::Boundary(BoundaryDrag::new(boundary, position)));
                }
                return;
            }
        }

        self.selection.clear();
        self.continuation = None;
    }

    fn press_table<H: LayoutHost>(&mut self, host: &H, key: TableKey, position: Point, shift: bool) {
        if shift {
            self.selection.clear_drawn();
        } else if !self.selection.is_table_selected(&key) {
            self.selection.select_table_only(key.clone());
        }

        let multi = self.selection.is_table_selected(&key) && self.selection.table_count() >= 2;
        let keys: Vec<TableKey> = if multi {
            self.selection.tables().iter().cloned().collect()
        } else {
            vec![key.clone()]
        };
        let members: Vec<MovingTable> = keys
            .into_iter()
            .filter_map(|key| {
                let placed = host.section(&key.section_id)?.placed_position(key.table_index)?;
                Some(MovingTable {
                    origin: placed.origin(),
                    size_px: placed.size_px(),
                    key,
                })
            })
            .collect();

        let drag = TableMoveDrag::new(key, members, position, shift);
        self.session = Some(if multi {
            DragSession::MultiMove(drag)
        } else {
            DragSession::SingleMove(drag)
        });
    }

    fn press_line<H: LayoutHost>(&mut self, host: &H, line: VenueLine, position: Point, shift: bool) {
        if shift {
            self.selection.toggle_line(&line);
            return;
        }
        if !self.selection.lines().contains(&line.id) {
            self.selection.select_line(&line);
        }
        let drawn = host.drawn_layout();
        let ids = self.selected_line_ids(drawn);
        let originals: Vec<VenueLine> = drawn
            .lines
            .iter()
            .filter(|l| ids.contains(&l.id))
            .cloned()
            .collect();
        if originals.iter().any(|l| l.locked) {
            log::debug!("Line group of {} is locked", line.id);
            return;
        }
        self.session = Some(DragSession::Lines(LineGroupDrag::new(originals, position)));
    }

    pub fn pointer_move<H: LayoutHost>(&mut self, host: &mut H, position: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.update(position, modifiers, &self.metrics, &self.config);
        self.refresh_guides(&*host);
    }

    pub fn pointer_up<H: LayoutHost>(&mut self, host: &mut H, position: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.update(position, modifiers, &self.metrics, &self.config);
        self.guides.clear();
        let click_travel = self.config.click_travel;

        match session {
            DragSession::Palette(drag) => self.finish_palette(host, drag, position),
            DragSession::SingleMove(drag) | DragSession::MultiMove(drag) => self.finish_table_move(host, drag),
            DragSession::Boundary(drag) => {
                if drag.track.travelled(click_travel) && drag.current != drag.original {
                    log::debug!("Boundary moved to ({:.2}, {:.2})", drag.current.x, drag.current.y);
                    let next = host.drawn_layout().with_boundary(Some(drag.current));
                    host.update_drawn_layout(next);
                }
            }
            DragSession::BoundaryResize(drag) => {
                if drag.track.travelled(click_travel) && drag.current != drag.original {
                    log::debug!(
                        "Boundary resized to {:.2}x{:.2}",
                        drag.current.width,
                        drag.current.height
                    );
                    let next = host.drawn_layout().with_boundary(Some(drag.current));
                    host.update_drawn_layout(next);
                }
            }
            DragSession::Lines(drag) => {
                if drag.track.travelled(click_travel) && drag.current != drag.originals {
                    log::debug!("Moved {} lines", drag.current.len());
                    let next = host.drawn_layout().with_lines_replaced(&drag.current);
                    host.update_drawn_layout(next);
                }
            }
            DragSession::LineEndpoint(drag) => self.finish_endpoint(host, drag),
            DragSession::DrawBoundary(gesture) => self.finish_draw_boundary(host, gesture),
            DragSession::DrawLine(gesture) => self.finish_draw_line(host, gesture),
        }
    }

    /// Re-run the active session for the last pointer position.
    pub(super) fn refresh_session<H: LayoutHost>(&mut self, host: &H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let position = session.track().current;
        session.update(position, self.modifiers, &self.metrics, &self.config);
        self.refresh_guides(host);
    }

    fn refresh_guides<H: LayoutHost>(&mut self, host: &H) {
        let threshold = self.config.alignment_threshold;
        self.guides = match &self.session {
            Some(DragSession::Palette(drag)) => match drag.ghost {
                Some(ghost) => {
                    let dragged = self.metrics.table_rect_at(ghost, drag.size_px);
                    detect_alignment_guides(dragged, &self.placed_rects(host, |_| false), threshold)
                }
                None => Vec::new(),
            },
            Some(DragSession::SingleMove(drag)) | Some(DragSession::MultiMove(drag)) => {
                match drag.primary_member() {
                    Some(primary) => {
                        let dragged = self.metrics.table_rect_at(primary.origin + drag.delta, primary.size_px);
                        let others = self.placed_rects(host, |key| drag.is_moving(key));
                        detect_alignment_guides(dragged, &others, threshold)
                    }
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        };
    }

    fn finish_palette<H: LayoutHost>(&mut self, host: &mut H, drag: PaletteDrag, position: Point) {
        let origin = drag.drop_origin(position, &self.metrics);
        let dragged = self.metrics.table_rect_at(origin, drag.size_px);
        let others = self.placed_rects(&*host, |_| false);
        let snapped = snap_to_tables(dragged, &others, self.config.alignment_threshold);
        if snapped.is_snapped() {
            log::debug!("Palette drop snapped to ({:.2}, {:.2})", snapped.point.x, snapped.point.y);
        }
        let origin = self.metrics.clamp_table_origin(snapped.point, drag.size_px);

        log::debug!(
            "Placing table {} of {} at ({:.2}, {:.2})",
            drag.key.table_index,
            drag.key.section_id,
            origin.x,
            origin.y
        );
        let placed = TablePosition::placed(origin, drag.size_px, TableShape::Square);
        self.commit_positions(host, vec![(drag.key, placed)]);
    }

    fn finish_table_move<H: LayoutHost>(&mut self, host: &mut H, drag: TableMoveDrag) {
        if !drag.track.travelled(self.config.click_travel) {
            if drag.shift_at_press {
                log::debug!("Shift press without travel on {:?}: toggling", drag.primary);
                self.selection.toggle_table(drag.primary);
            }
            return;
        }
        let Some(primary) = drag.primary_member() else {
            return;
        };

        let primary_origin = primary.origin + drag.delta;
        let dragged = self.metrics.table_rect_at(primary_origin, primary.size_px);
        let others = self.placed_rects(&*host, |key| drag.is_moving(key));
        let snapped = snap_to_tables(dragged, &others, self.config.alignment_threshold);

        let snap_x = snapped.snapped_x && drag.axis_lock != Some(Axis::Vertical);
        let snap_y = snapped.snapped_y && drag.axis_lock != Some(Axis::Horizontal);
        let wanted = Vec2::new(
            if snap_x { snapped.point.x - primary_origin.x } else { 0.0 },
            if snap_y { snapped.point.y - primary_origin.y } else { 0.0 },
        );
        let snap_delta = match drag.start_bounds(&self.metrics) {
            Some(bounds) => clamp_delta(bounds + drag.delta, wanted),
            None => wanted,
        };
        // The primary lands exactly on the matched edge unless the group hit the canvas edge.
        let exact_x = (snap_x && snap_delta.x == wanted.x).then_some(snapped.point.x);
        let exact_y = (snap_y && snap_delta.y == wanted.y).then_some(snapped.point.y);

        let delta = drag.delta + snap_delta;
        log::debug!(
            "Moving {} tables by ({:.2}, {:.2})",
            drag.members.len(),
            delta.x,
            delta.y
        );
        let origins = drag
            .members
            .iter()
            .map(|m| {
                let mut origin = m.origin + delta;
                if m.key == drag.primary {
                    origin.x = exact_x.unwrap_or(origin.x);
                    origin.y = exact_y.unwrap_or(origin.y);
                }
                (m.key.clone(), origin)
            })
            .collect();
        self.commit_origins(host, origins);
    }

    fn finish_endpoint<H: LayoutHost>(&mut self, host: &mut H, drag: EndpointDrag) {
        if drag.track.travelled(self.config.click_travel) {
            if drag.current != drag.line {
                log::debug!("Reshaped line {}", drag.line.id);
                self.selection.select_line(&drag.current);
                let next = host
                    .drawn_layout()
                    .with_lines_replaced(std::slice::from_ref(&drag.current));
                host.update_drawn_layout(next);
            }
            return;
        }

        log::debug!("Continuing line {} from its {:?} endpoint", drag.line.id, drag.endpoint);
        self.selection.select_line(&drag.line);
        self.continuation = Some(PenContinuation {
            point: drag.line.point(drag.endpoint),
            source_line_id: drag.line.id.clone(),
            path_id: drag.line.path_id.clone(),
        });
        self.mode = EditorMode::DrawLine;
    }

    fn finish_draw_boundary<H: LayoutHost>(&mut self, host: &mut H, gesture: DrawGesture) {
        if host.drawn_layout().boundary.is_some() {
            log::debug!("Discarding boundary: one already exists");
            return;
        }
        match boundary_from_drag(gesture.start, gesture.current, self.config.min_boundary_create) {
            Some(boundary) => {
                log::debug!(
                    "Boundary drawn at ({:.2}, {:.2}) {:.2}x{:.2}",
                    boundary.x,
                    boundary.y,
                    boundary.width,
                    boundary.height
                );
                let next = host.drawn_layout().with_boundary(Some(boundary));
                host.update_drawn_layout(next);
                self.selection.select_boundary();
                self.mode = EditorMode::Select;
            }
            None => log::debug!("Discarding boundary below minimum size"),
        }
    }

    fn finish_draw_line<H: LayoutHost>(&mut self, host: &mut H, gesture: DrawGesture) {
        let snap = self.modifiers.shift.then_some(self.config.angle_increment);
        let Some(mut line) = line_from_drag(gesture.start, gesture.current, snap, self.config.min_line_length)
        else {
            log::debug!("Discarding line below minimum length");
            return;
        };

        let mut next = host.drawn_layout().clone();
        if let Some(continuation) = gesture.continuation {
            let path_id = continuation.path_id.unwrap_or_else(new_path_id);
            if let Some(source) = next
                .lines
                .iter_mut()
                .find(|l| l.id == continuation.source_line_id)
            {
                if source.path_id.is_none() {
                    source.path_id = Some(path_id.clone());
                }
            }
            line.path_id = Some(path_id);
        }

        log::debug!("Line {} drawn (path {:?})", line.id, line.path_id);
        self.selection.select_line(&line);
        next.lines.push(line);
        host.update_drawn_layout(next);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::EditorConfig;
    use crate::metrics::CanvasMetrics;
    use crate::model::{DrawnVenueLayout, Endpoint, VenueBoundary};
    use kurbo::Rect;

    fn none() -> Modifiers {
        Modifiers::default()
    }

    #[test]
    fn test_palette_drop_places_square_48px() {
        let mut layout = layout_with(&[("vip", 2)]);
        let mut editor = editor();
        assert!(editor.begin_palette_drag(&layout, TableKey::new("vip", 0), at(5.0, 90.0), none()));
        editor.pointer_move(&mut layout, at(30.0, 30.0), none());
        assert!(editor.ghost_position().is_some());
        editor.pointer_up(&mut layout, at(40.0, 40.0), none());

        let section = layout.section("vip").unwrap();
        let positions = section.table_positions.as_ref().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(
            positions[0],
            TablePosition {
                x: 40.0,
                y: 40.0,
                width: 48.0,
                height: 48.0,
                shape: TableShape::Square,
                placed: true,
            }
        );
        assert!(editor.ghost_position().is_none());
    }

    #[test]
    fn test_palette_drop_snaps_to_placed_neighbor() {
        let mut layout = layout_with(&[("a", 2)]);
        place(&mut layout, "a", 0, 30.0, 30.0);
        let mut editor = editor();
        assert!(editor.begin_palette_drag(&layout, TableKey::new("a", 1), at(5.0, 90.0), none()));
        editor.pointer_move(&mut layout, at(30.3, 50.0), none());
        assert!(!editor.alignment_guides().is_empty());

        editor.pointer_up(&mut layout, at(30.3, 50.0), none());
        let placed = position(&layout, "a", 1);
        assert_eq!(placed.x, 30.0);
        assert_eq!(placed.y, 50.0);
        assert_eq!(placed.width, 48.0);
        assert!(editor.alignment_guides().is_empty());
    }

    #[test]
    fn test_palette_drop_outside_canvas_clamps() {
        let mut layout = layout_with(&[("vip", 1)]);
        let mut editor = editor();
        editor.begin_palette_drag(&layout, TableKey::new("vip", 0), at(0.0, 0.0), none());
        editor.pointer_up(&mut layout, Point::new(5000.0, -300.0), none());
        let placed = position(&layout, "vip", 0);
        assert!((placed.x - 95.2).abs() < 1e-9);
        assert!(placed.y.abs() < 1e-9);
    }

    #[test]
    fn test_palette_refuses_placed_table() {
        let mut layout = layout_with(&[("vip", 1)]);
        place(&mut layout, "vip", 0, 10.0, 10.0);
        let mut editor = editor();
        assert!(!editor.begin_palette_drag(&layout, TableKey::new("vip", 0), at(0.0, 0.0), none()));
        assert!(!editor.begin_palette_drag(&layout, TableKey::new("nope", 0), at(0.0, 0.0), none()));
    }

    #[test]
    fn test_drop_snaps_to_abutting_edge() {
        let mut layout = layout_with(&[("s", 2)]);
        let metrics = CanvasMetrics::from_size(Size::new(900.0, 600.0));
        let mut editor = LayoutEditor::new(EditorConfig::default(), metrics);
        place(&mut layout, "s", 0, 10.0, 10.0);
        place(&mut layout, "s", 1, 40.0, 50.0);

        let a_width = metrics.px_to_percent_x(48.0);
        let target = 10.0 + a_width;
        // Drag B so its left edge lands 0.3 units right of A's right edge.
        let from = metrics.percent_to_screen(Point::new(41.0, 51.0));
        let to = from + kurbo::Vec2::new((target + 0.3 - 40.0) / 100.0 * 900.0, 0.0);
        drag(&mut editor, &mut layout, from, to, none());

        let b = position(&layout, "s", 1);
        assert_eq!(b.x, target);
        assert!((b.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_click_selects_and_empty_click_clears() {
        let mut layout = layout_with(&[("s", 2)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        let mut editor = editor();
        click(&mut editor, &mut layout, at(12.0, 12.0), none());
        assert!(editor.selection().is_table_selected(&TableKey::new("s", 0)));
        // Unmoved click commits nothing.
        assert!((position(&layout, "s", 0).x - 10.0).abs() < 1e-9);

        click(&mut editor, &mut layout, at(70.0, 70.0), none());
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_shift_click_toggles_without_commit() {
        let mut layout = layout_with(&[("s", 3)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        place(&mut layout, "s", 1, 30.0, 10.0);
        let before = layout.sections.clone();
        let mut editor = editor();

        click(&mut editor, &mut layout, at(12.0, 12.0), none());
        click(&mut editor, &mut layout, at(32.0, 12.0), Modifiers::shift());
        assert_eq!(editor.selection().table_count(), 2);

        // Jitter under the click threshold still counts as a click.
        editor.pointer_down(&mut layout, at(12.0, 12.0), Modifiers::shift());
        editor.pointer_move(&mut layout, at(12.1, 12.1), Modifiers::shift());
        editor.pointer_up(&mut layout, at(12.1, 12.1), Modifiers::shift());
        assert_eq!(editor.selection().table_count(), 1);
        assert!(editor.selection().is_table_selected(&TableKey::new("s", 1)));
        assert_eq!(layout.sections, before);
    }

    #[test]
    fn test_multi_drag_moves_group_rigidly() {
        let mut layout = layout_with(&[("s", 2), ("t", 1)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        place(&mut layout, "s", 1, 30.0, 20.0);
        place(&mut layout, "t", 0, 50.0, 40.0);
        let mut editor = editor();
        click(&mut editor, &mut layout, at(12.0, 12.0), none());
        click(&mut editor, &mut layout, at(32.0, 22.0), Modifiers::shift());
        click(&mut editor, &mut layout, at(52.0, 42.0), Modifiers::shift());
        assert_eq!(editor.selection().table_count(), 3);

        // Pressing a selected table without shift keeps the multi-selection.
        drag(&mut editor, &mut layout, at(12.0, 12.0), at(22.0, 17.0), none());
        assert_eq!(editor.selection().table_count(), 3);

        let a = position(&layout, "s", 0);
        let b = position(&layout, "s", 1);
        let c = position(&layout, "t", 0);
        assert!((a.x - 20.0).abs() < 1e-9 && (a.y - 15.0).abs() < 1e-9);
        assert!((b.x - a.x - 20.0).abs() < 1e-9 && (b.y - a.y - 10.0).abs() < 1e-9);
        assert!((c.x - a.x - 40.0).abs() < 1e-9 && (c.y - a.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_drag_snaps_primary_to_bystander() {
        let mut layout = layout_with(&[("s", 3)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        place(&mut layout, "s", 1, 30.0, 20.0);
        place(&mut layout, "s", 2, 60.0, 70.0);
        let mut editor = editor();
        click(&mut editor, &mut layout, at(11.0, 11.0), none());
        click(&mut editor, &mut layout, at(31.0, 21.0), Modifiers::shift());

        // Primary's left edge ends 0.3 right of the unselected table's left edge.
        drag(&mut editor, &mut layout, at(11.0, 11.0), at(61.3, 11.0), none());
        let a = position(&layout, "s", 0);
        let b = position(&layout, "s", 1);
        assert_eq!(a.x, 60.0);
        assert!((a.y - 10.0).abs() < 1e-9);
        assert!((b.x - a.x - 20.0).abs() < 1e-9 && (b.y - a.y - 10.0).abs() < 1e-9);
        assert_eq!(position(&layout, "s", 2).x, 60.0);
    }

    #[test]
    fn test_drag_unselected_table_replaces_selection() {
        let mut layout = layout_with(&[("s", 2)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        place(&mut layout, "s", 1, 60.0, 60.0);
        let mut editor = editor();
        click(&mut editor, &mut layout, at(12.0, 12.0), none());
        drag(&mut editor, &mut layout, at(62.0, 62.0), at(72.0, 62.0), none());
        assert_eq!(editor.selection().table_count(), 1);
        assert!((position(&layout, "s", 0).x - 10.0).abs() < 1e-9);
        assert!((position(&layout, "s", 1).x - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_clamps_to_canvas() {
        let mut layout = layout_with(&[("s", 1)]);
        place(&mut layout, "s", 0, 90.0, 10.0);
        let mut editor = editor();
        drag(&mut editor, &mut layout, at(91.0, 11.0), at(140.0, -40.0), none());
        let p = position(&layout, "s", 0);
        assert!((p.x - 95.2).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_shift_drag_locks_axis() {
        let mut layout = layout_with(&[("s", 1)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        let mut editor = editor();
        drag(&mut editor, &mut layout, at(12.0, 12.0), at(42.0, 15.0), Modifiers::shift());
        let p = position(&layout, "s", 0);
        assert!((p.x - 40.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_guides_during_drag_only() {
        let mut layout = layout_with(&[("s", 2)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        place(&mut layout, "s", 1, 40.0, 50.0);
        let mut editor = editor();
        editor.pointer_down(&mut layout, at(41.0, 51.0), none());
        editor.pointer_move(&mut layout, at(11.2, 71.0), none());
        assert!(!editor.alignment_guides().is_empty());
        editor.pointer_up(&mut layout, at(11.2, 71.0), none());
        assert!(editor.alignment_guides().is_empty());
        assert!((position(&layout, "s", 1).x - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_drawn_in_either_direction() {
        for (from, to) in [((10.0, 10.0), (60.0, 50.0)), ((60.0, 50.0), (10.0, 10.0))] {
            let mut layout = layout_with(&[]);
            let mut editor = editor();
            assert!(editor.set_mode(&layout, EditorMode::DrawBoundary));
            drag(&mut editor, &mut layout, at(from.0, from.1), at(to.0, to.1), none());
            let boundary = layout.drawn_layout.as_ref().and_then(|d| d.boundary).unwrap();
            assert_eq!(boundary.rect(), Rect::new(10.0, 10.0, 60.0, 50.0));
            assert!(editor.selection().is_boundary_selected());
            assert_eq!(editor.mode(), EditorMode::Select);
            assert!(!editor.set_mode(&layout, EditorMode::DrawBoundary));
        }
    }

    #[test]
    fn test_tiny_boundary_discarded() {
        let mut layout = layout_with(&[]);
        let mut editor = editor();
        editor.set_mode(&layout, EditorMode::DrawBoundary);
        drag(&mut editor, &mut layout, at(10.0, 10.0), at(11.0, 50.0), none());
        assert!(layout.drawn_layout.is_none());
        assert_eq!(editor.mode(), EditorMode::DrawBoundary);
    }

    #[test]
    fn test_boundary_move_and_resize() {
        let mut layout = layout_with(&[]);
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: Some(VenueBoundary::from_rect(Rect::new(20.0, 20.0, 60.0, 60.0))),
            lines: Vec::new(),
        });
        let mut editor = editor();

        // Grab the top edge and move.
        drag(&mut editor, &mut layout, at(40.0, 20.0), at(50.0, 30.0), none());
        let b = layout.drawn_layout.as_ref().unwrap().boundary.unwrap();
        assert_eq!(b.rect(), Rect::new(30.0, 30.0, 70.0, 70.0));
        assert!(editor.selection().is_boundary_selected());
        assert_eq!(editor.boundary_handles(&layout).len(), 8);

        // Bottom-right handle.
        drag(&mut editor, &mut layout, at(70.0, 70.0), at(80.0, 75.0), none());
        let b = layout.drawn_layout.as_ref().unwrap().boundary.unwrap();
        assert_eq!(b.rect(), Rect::new(30.0, 30.0, 80.0, 75.0));
    }

    #[test]
    fn test_locked_boundary_does_not_move() {
        let mut layout = layout_with(&[]);
        let mut boundary = VenueBoundary::from_rect(Rect::new(20.0, 20.0, 60.0, 60.0));
        boundary.locked = true;
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: Some(boundary),
            lines: Vec::new(),
        });
        let mut editor = editor();
        drag(&mut editor, &mut layout, at(40.0, 20.0), at(50.0, 30.0), none());
        assert_eq!(layout.drawn_layout.as_ref().unwrap().boundary, Some(boundary));
        assert!(editor.selection().is_boundary_selected());
        assert!(editor.boundary_handles(&layout).is_empty());
    }

    #[test]
    fn test_short_line_discarded_and_angle_snap() {
        let mut layout = layout_with(&[]);
        let mut editor = editor();
        editor.set_mode(&layout, EditorMode::DrawLine);
        drag(&mut editor, &mut layout, at(10.0, 10.0), at(10.5, 10.5), none());
        assert!(layout.drawn_layout.is_none());

        drag(&mut editor, &mut layout, at(10.0, 10.0), at(40.0, 13.0), Modifiers::shift());
        let line = &layout.drawn_layout.as_ref().unwrap().lines[0];
        assert!((line.y2 - 10.0).abs() < 1e-9);
        assert!(line.path_id.is_none());
    }

    #[test]
    fn test_pen_continuation_shares_path() {
        let mut layout = layout_with(&[]);
        let mut editor = editor();
        editor.set_mode(&layout, EditorMode::DrawLine);
        drag(&mut editor, &mut layout, at(20.0, 20.0), at(20.0, 60.0), none());
        assert_eq!(layout.drawn_layout.as_ref().unwrap().lines.len(), 1);

        // Click the end endpoint without moving: arms continuation.
        click(&mut editor, &mut layout, at(20.0, 60.0), none());
        let continuation = editor.pen_continuation().unwrap();
        assert_eq!(continuation.point, Point::new(20.0, 60.0));

        drag(&mut editor, &mut layout, at(35.0, 80.0), at(50.0, 60.0), none());
        let drawn = layout.drawn_layout.clone().unwrap();
        assert_eq!(drawn.lines.len(), 2);
        let first = &drawn.lines[0];
        let second = &drawn.lines[1];
        assert!(first.path_id.is_some());
        assert_eq!(first.path_id, second.path_id);
        assert_eq!(second.start(), Point::new(20.0, 60.0));
        assert_eq!(second.end(), Point::new(50.0, 60.0));
        assert!(editor.pen_continuation().is_none());

        // Selecting either highlights both.
        editor.set_mode(&layout, EditorMode::Select);
        click(&mut editor, &mut layout, at(20.0, 40.0), none());
        let highlighted = editor.highlighted_line_ids(&layout);
        assert_eq!(highlighted.len(), 2);
        assert!(highlighted.contains(&second.id));

        // Deleting either removes both.
        assert!(editor.delete_selected_drawn(&mut layout));
        assert!(layout.drawn_layout.as_ref().unwrap().lines.is_empty());
    }

    #[test]
    fn test_continuation_inherits_existing_path() {
        let mut layout = layout_with(&[]);
        let mut first = VenueLine::new("a", Point::new(10.0, 10.0), Point::new(30.0, 10.0));
        first.path_id = Some("walls".to_string());
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: None,
            lines: vec![first],
        });
        let mut editor = editor();
        editor.set_mode(&layout, EditorMode::DrawLine);
        click(&mut editor, &mut layout, at(30.0, 10.0), none());
        drag(&mut editor, &mut layout, at(30.0, 10.0), at(30.0, 40.0), none());
        let lines = &layout.drawn_layout.as_ref().unwrap().lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].path_id.as_deref(), Some("walls"));
    }

    #[test]
    fn test_endpoint_drag_reshapes_one_end() {
        let mut layout = layout_with(&[]);
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: None,
            lines: vec![VenueLine::new("a", Point::new(10.0, 10.0), Point::new(30.0, 10.0))],
        });
        let mut editor = editor();
        drag(&mut editor, &mut layout, at(30.0, 10.0), at(40.0, 25.0), none());
        let line = &layout.drawn_layout.as_ref().unwrap().lines[0];
        assert_eq!(line.start(), Point::new(10.0, 10.0));
        assert_eq!(line.end(), Point::new(40.0, 25.0));
        assert_eq!(editor.mode(), EditorMode::Select);
        assert!(editor.pen_continuation().is_none());
    }

    #[test]
    fn test_line_path_moves_together() {
        let mut layout = layout_with(&[]);
        let mut a = VenueLine::new("a", Point::new(10.0, 10.0), Point::new(30.0, 10.0));
        let mut b = VenueLine::new("b", Point::new(30.0, 10.0), Point::new(30.0, 30.0));
        let c = VenueLine::new("c", Point::new(60.0, 60.0), Point::new(80.0, 60.0));
        a.path_id = Some("p".to_string());
        b.path_id = Some("p".to_string());
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: None,
            lines: vec![a, b, c.clone()],
        });
        let mut editor = editor();
        drag(&mut editor, &mut layout, at(20.0, 10.0), at(25.0, 15.0), none());
        let drawn = layout.drawn_layout.as_ref().unwrap();
        assert_eq!(drawn.line("a").unwrap().start(), Point::new(15.0, 15.0));
        assert_eq!(drawn.line("b").unwrap().end(), Point::new(35.0, 35.0));
        assert_eq!(drawn.line("c"), Some(&c));
    }

    #[test]
    fn test_shift_lines_take_precedence_over_path() {
        let mut layout = layout_with(&[]);
        let mut a = VenueLine::new("a", Point::new(10.0, 10.0), Point::new(30.0, 10.0));
        let mut b = VenueLine::new("b", Point::new(30.0, 10.0), Point::new(30.0, 30.0));
        let c = VenueLine::new("c", Point::new(60.0, 60.0), Point::new(80.0, 60.0));
        a.path_id = Some("p".to_string());
        b.path_id = Some("p".to_string());
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: None,
            lines: vec![a, b.clone(), c],
        });
        let mut editor = editor();
        click(&mut editor, &mut layout, at(20.0, 10.0), Modifiers::shift());
        click(&mut editor, &mut layout, at(70.0, 60.0), Modifiers::shift());
        assert_eq!(editor.selection().lines().len(), 2);

        drag(&mut editor, &mut layout, at(20.0, 10.0), at(20.0, 20.0), none());
        let drawn = layout.drawn_layout.as_ref().unwrap();
        assert_eq!(drawn.line("a").unwrap().start(), Point::new(10.0, 20.0));
        assert_eq!(drawn.line("c").unwrap().start(), Point::new(60.0, 70.0));
        assert_eq!(drawn.line("b"), Some(&b));
    }

    #[test]
    fn test_press_during_session_ignored() {
        let mut layout = layout_with(&[("s", 1)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        let mut editor = editor();
        editor.pointer_down(&mut layout, at(12.0, 12.0), none());
        editor.pointer_down(&mut layout, at(80.0, 80.0), none());
        assert_eq!(editor.selection().table_count(), 1);
        assert!(matches!(editor.session(), Some(DragSession::SingleMove(_))));
    }

    #[test]
    fn test_right_button_ignored() {
        let mut layout = layout_with(&[("s", 1)]);
        place(&mut layout, "s", 0, 10.0, 10.0);
        let mut editor = editor();
        editor.handle_pointer(
            &mut layout,
            PointerEvent::Down {
                position: at(12.0, 12.0),
                button: MouseButton::Right,
                modifiers: none(),
            },
        );
        assert!(!editor.is_dragging());
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_endpoint_enum_is_reported() {
        let mut layout = layout_with(&[]);
        layout.drawn_layout = Some(DrawnVenueLayout {
            boundary: None,
            lines: vec![VenueLine::new("a", Point::new(10.0, 10.0), Point::new(30.0, 10.0))],
        });
        let mut editor = editor();
        editor.pointer_down(&mut layout, at(10.0, 10.0), none());
        match editor.session() {
            Some(DragSession::LineEndpoint(drag)) => assert_eq!(drag.endpoint, Endpoint::Start),
            other => panic!("unexpected session {:?}", other.map(DragSession::name)),
        }
    }
}
