//! Keyboard handling: nudges, delete, escape and live shift tracking.

use super::{EditorMode, LayoutEditor};
use crate::drawing::{move_boundary, translate_lines};
use crate::host::LayoutHost;
use crate::input::{Key, KeyEvent};
use crate::model::VenueLine;
use kurbo::Vec2;

impl LayoutEditor {
    /// Handle a key press. Returns true if the key was consumed.
    pub fn key_down<H: LayoutHost>(&mut self, host: &mut H, event: &KeyEvent) -> bool {
        if event.in_text_field {
            return false;
        }
        self.modifiers = event.modifiers;

        match &event.key {
            Key::Shift => {
                self.modifiers.shift = true;
                self.refresh_session(&*host);
                false
            }
            Key::Escape => {
                self.escape();
                true
            }
            key if key.is_delete() => !self.is_dragging() && self.delete_selected_drawn(host),
            key => match key.arrow_direction() {
                Some(direction) if !self.is_dragging() => self.nudge(host, direction, event.modifiers.shift),
                _ => false,
            },
        }
    }

    /// Handle a key release; only shift matters, mid-drag.
    pub fn key_up<H: LayoutHost>(&mut self, host: &mut H, event: &KeyEvent) {
        if event.key == Key::Shift {
            self.modifiers.shift = false;
            self.refresh_session(&*host);
        }
    }

    /// Cancel any gesture, the draw mode and the drawn-element selection.
    pub fn escape(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("Cancelled {} drag", session.name());
        }
        self.guides.clear();
        self.continuation = None;
        self.mode = EditorMode::Select;
        self.selection.clear_drawn();
    }

    fn nudge<H: LayoutHost>(&mut self, host: &mut H, direction: Vec2, fast: bool) -> bool {
        self.sync_selection(&*host);
        if self.selection.has_drawn() {
            let delta = direction * self.config.drawn_nudge_percent;
            return self.nudge_drawn(host, delta);
        }
        if self.selection.table_count() == 0 {
            return false;
        }

        let step = self.config.nudge_step(fast);
        let origins = self
            .selection
            .tables()
            .iter()
            .filter_map(|key| {
                let position = host.section(&key.section_id)?.placed_position(key.table_index)?;
                let delta = Vec2::new(
                    self.metrics.px_to_percent_x(direction.x * step),
                    self.metrics.px_to_percent_y(direction.y * step),
                );
                Some((key.clone(), position.origin() + delta))
            })
            .collect();
        self.commit_origins(host, origins);
        true
    }

    fn nudge_drawn<H: LayoutHost>(&mut self, host: &mut H, delta: Vec2) -> bool {
        let drawn = host.drawn_layout();
        if self.selection.is_boundary_selected() {
            let Some(boundary) = drawn.boundary else {
                return false;
            };
            if boundary.locked {
                log::debug!("Boundary is locked; ignoring nudge");
                return false;
            }
            let next = drawn.with_boundary(Some(move_boundary(&boundary, delta)));
            host.update_drawn_layout(next);
            return true;
        }

        let ids = self.selected_line_ids(drawn);
        let lines: Vec<VenueLine> = drawn
            .lines
            .iter()
            .filter(|line| ids.contains(&line.id))
            .cloned()
            .collect();
        if lines.is_empty() || lines.iter().any(|line| line.locked) {
            return false;
        }
        let next = drawn.with_lines_replaced(&translate_lines(&lines, delta));
        host.update_drawn_layout(next);
        true
    }
}
