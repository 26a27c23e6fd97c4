//! Selection state shared by tables and drawn elements.
//!
//! Tables and drawn elements are selected exclusively: selecting one kind
//! clears the other.

use crate::drawing::PathIndex;
use crate::model::{DrawnVenueLayout, Section, VenueLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifies one table: its section and its index within the section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableKey {
    pub section_id: String,
    pub table_index: usize,
}

impl TableKey {
    pub fn new(section_id: impl Into<String>, table_index: usize) -> Self {
        Self {
            section_id: section_id.into(),
            table_index,
        }
    }
}

/// The single drawn element selected by a plain click.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectedElement {
    Boundary,
    /// A line; when it belongs to a path the whole path is selected.
    Line { id: String },
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    tables: BTreeSet<TableKey>,
    /// Shift-clicked lines.
    lines: BTreeSet<String>,
    element: Option<SelectedElement>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &BTreeSet<TableKey> {
        &self.tables
    }

    pub fn lines(&self) -> &BTreeSet<String> {
        &self.lines
    }

    pub fn is_table_selected(&self, key: &TableKey) -> bool {
        self.tables.contains(key)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_boundary_selected(&self) -> bool {
        matches!(self.element, Some(SelectedElement::Boundary))
    }

    pub fn has_drawn(&self) -> bool {
        self.element.is_some() || !self.lines.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && !self.has_drawn()
    }

    /// Replace the whole selection with one table.
    pub fn select_table_only(&mut self, key: TableKey) {
        self.clear();
        self.tables.insert(key);
    }

    /// Toggle a table in or out of the multi-selection.
    pub fn toggle_table(&mut self, key: TableKey) {
        self.clear_drawn();
        if !self.tables.remove(&key) {
            self.tables.insert(key);
        }
    }

    pub fn select_tables(&mut self, keys: impl IntoIterator<Item = TableKey>) {
        self.clear();
        self.tables.extend(keys);
    }

    pub fn select_boundary(&mut self) {
        self.clear();
        self.element = Some(SelectedElement::Boundary);
    }

    /// Plain click on a line: select it (and its path) alone.
    pub fn select_line(&mut self, line: &VenueLine) {
        self.clear();
        self.element = Some(SelectedElement::Line { id: line.id.clone() });
    }

    /// Shift click on a line: toggle a single line id in the multi-set.
    pub fn toggle_line(&mut self, line: &VenueLine) {
        self.tables.clear();
        if self.lines.is_empty() {
            if let Some(SelectedElement::Line { id }) = self.element.take() {
                self.lines.insert(id);
            }
        }
        self.element = None;
        if !self.lines.remove(&line.id) {
            self.lines.insert(line.id.clone());
        }
    }

    pub fn clear_drawn(&mut self) {
        self.lines.clear();
        self.element = None;
    }

    pub fn clear(&mut self) {
        self.tables.clear();
        self.clear_drawn();
    }

    /// Line ids a move, lock or delete acts on.
    ///
    /// The shift multi-set wins; otherwise the clicked line's whole path.
    pub fn selected_line_ids(&self, drawn: &DrawnVenueLayout, paths: &PathIndex) -> BTreeSet<String> {
        if !self.lines.is_empty() {
            return self
                .lines
                .iter()
                .filter(|id| drawn.line(id).is_some())
                .cloned()
                .collect();
        }
        match &self.element {
            Some(SelectedElement::Line { id }) if drawn.line(id).is_some() => paths.group_of(id),
            _ => BTreeSet::new(),
        }
    }

    /// Drop entries that no longer exist or are no longer placed.
    pub fn retain_valid(&mut self, sections: &[Section], drawn: &DrawnVenueLayout) {
        self.tables.retain(|key| {
            sections
                .iter()
                .find(|s| s.id == key.section_id)
                .is_some_and(|s| s.is_placed(key.table_index))
        });
        self.lines.retain(|id| drawn.line(id).is_some());
        let stale = match &self.element {
            Some(SelectedElement::Boundary) => drawn.boundary.is_none(),
            Some(SelectedElement::Line { id }) => drawn.line(id).is_none(),
            None => false,
        };
        if stale {
            self.element = None;
        }
    }
}
