//! Toolbar commands: align, distribute, lock, delete, unplace and mode changes.

use super::{EditorMode, LayoutEditor};
use crate::align::{AlignMode, SelectedPosition, align, distribute};
use crate::host::LayoutHost;
use crate::model::{SectionPatch, VenueLine};
use crate::selection::TableKey;
use crate::snap::Axis;
use std::collections::BTreeMap;

impl LayoutEditor {
    /// Switch tools. Boundary mode is refused while a boundary exists.
    pub fn set_mode<H: LayoutHost>(&mut self, host: &H, mode: EditorMode) -> bool {
        if mode == EditorMode::DrawBoundary && host.drawn_layout().boundary.is_some() {
            log::debug!("Refusing boundary mode: a boundary already exists");
            return false;
        }
        if self.session.take().is_some() {
            self.guides.clear();
        }
        if mode != EditorMode::DrawLine {
            self.continuation = None;
        }
        log::debug!("Editor mode: {}", mode.name());
        self.mode = mode;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select every placed table of a section. Returns how many were selected.
    pub fn select_all_in_section<H: LayoutHost>(&mut self, host: &H, section_id: &str) -> usize {
        let Some(section) = host.section(section_id) else {
            return 0;
        };
        let keys: Vec<TableKey> = section
            .placed_indices()
            .into_iter()
            .map(|index| TableKey::new(section_id, index))
            .collect();
        let count = keys.len();
        self.selection.select_tables(keys);
        count
    }

    /// Selected placed tables with their percent rects.
    pub fn selected_positions<H: LayoutHost>(&self, host: &H) -> Vec<SelectedPosition> {
        self.selection
            .tables()
            .iter()
            .filter_map(|key| {
                let position = host.section(&key.section_id)?.placed_position(key.table_index)?;
                Some(SelectedPosition {
                    key: key.clone(),
                    rect: self.metrics.table_rect(position),
                })
            })
            .collect()
    }

    /// Align the selected tables. False (and no change) below two tables.
    pub fn align_selected<H: LayoutHost>(&mut self, host: &mut H, mode: AlignMode) -> bool {
        self.sync_selection(&*host);
        match align(&self.selected_positions(&*host), mode) {
            Some(origins) => {
                log::debug!("Aligning {} tables ({:?})", origins.len(), mode);
                self.commit_origins(host, origins);
                true
            }
            None => false,
        }
    }

    /// Distribute the selected tables. False (and no change) below three tables.
    pub fn distribute_selected<H: LayoutHost>(&mut self, host: &mut H, axis: Axis) -> bool {
        self.sync_selection(&*host);
        match distribute(&self.selected_positions(&*host), axis) {
            Some(origins) => {
                log::debug!("Distributing {} tables ({:?})", origins.len(), axis);
                self.commit_origins(host, origins);
                true
            }
            None => false,
        }
    }

    /// Send the selected tables back to the palette.
    pub fn unplace_selected_tables<H: LayoutHost>(&mut self, host: &mut H) -> bool {
        self.sync_selection(&*host);
        if self.selection.table_count() == 0 {
            return false;
        }
        let mut grouped: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for key in self.selection.tables() {
            grouped
                .entry(key.section_id.clone())
                .or_default()
                .push(key.table_index);
        }
        let patches: Vec<(String, SectionPatch)> = grouped
            .into_iter()
            .filter_map(|(section_id, indices)| {
                let mut section = host.section(&section_id)?.clone();
                for index in indices {
                    section.table_positions = Some(section.positions_without(index));
                }
                let positions = section.table_positions.unwrap_or_default();
                Some((section_id, SectionPatch::positions(positions)))
            })
            .collect();
        for (section_id, patch) in patches {
            log::debug!("Returning tables of section {} to the palette", section_id);
            host.update_section(&section_id, patch);
        }
        self.selection.clear();
        true
    }

    /// Flip the lock flag of the selected drawn element(s).
    ///
    /// A group becomes locked unless every member already is.
    pub fn toggle_lock_selected<H: LayoutHost>(&mut self, host: &mut H) -> bool {
        self.sync_selection(&*host);
        let drawn = host.drawn_layout();

        if self.selection.is_boundary_selected() {
            let Some(mut boundary) = drawn.boundary else {
                return false;
            };
            boundary.locked = !boundary.locked;
            log::debug!("Boundary locked: {}", boundary.locked);
            let next = drawn.with_boundary(Some(boundary));
            host.update_drawn_layout(next);
            return true;
        }

        let ids = self.selected_line_ids(drawn);
        if ids.is_empty() {
            return false;
        }
        let lock = !drawn
            .lines
            .iter()
            .filter(|line| ids.contains(&line.id))
            .all(|line| line.locked);
        let updated: Vec<VenueLine> = drawn
            .lines
            .iter()
            .filter(|line| ids.contains(&line.id))
            .map(|line| VenueLine {
                locked: lock,
                ..line.clone()
            })
            .collect();
        log::debug!("{} lines locked: {}", updated.len(), lock);
        let next = drawn.with_lines_replaced(&updated);
        host.update_drawn_layout(next);
        true
    }

    /// Delete the selected boundary or lines, skipping locked ones.
    pub fn delete_selected_drawn<H: LayoutHost>(&mut self, host: &mut H) -> bool {
        self.sync_selection(&*host);
        let drawn = host.drawn_layout();

        if self.selection.is_boundary_selected() {
            match drawn.boundary {
                Some(boundary) if !boundary.locked => {
                    log::debug!("Deleting boundary");
                    let next = drawn.with_boundary(None);
                    host.update_drawn_layout(next);
                    self.selection.clear_drawn();
                    return true;
                }
                _ => return false,
            }
        }

        let ids = self.selected_line_ids(drawn);
        let removable: Vec<&str> = drawn
            .lines
            .iter()
            .filter(|line| ids.contains(&line.id) && !line.locked)
            .map(|line| line.id.as_str())
            .collect();
        if removable.is_empty() {
            return false;
        }
        log::debug!("Deleting {} lines", removable.len());
        let next = drawn.with_lines_removed(removable);
        host.update_drawn_layout(next);
        self.selection.clear_drawn();
        true
    }
}
