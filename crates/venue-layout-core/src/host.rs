//! The boundary between the editor and whoever owns the layout document.
//!
//! The editor never owns sections or drawings. It reads them through
//! [`LayoutHost`] and reports every committed change back through it.

use crate::model::{DrawnVenueLayout, Section, SectionPatch, VenueLayout};
use serde_json::Value;

/// Owner of the layout document, as seen by the editor.
pub trait LayoutHost {
    /// Current sections, in display order.
    fn sections(&self) -> &[Section];

    /// Drawn geometry of the floor plan being edited.
    fn drawn_layout(&self) -> &DrawnVenueLayout;

    /// Whether the floor plan has a background image (image mode) or not (draw mode).
    fn has_background_image(&self) -> bool;

    /// Apply a partial section update. The editor sends whole position arrays.
    fn update_section(&mut self, section_id: &str, patch: SectionPatch);

    /// Replace the drawn geometry.
    fn update_drawn_layout(&mut self, layout: DrawnVenueLayout);

    fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections().iter().find(|section| section.id == section_id)
    }
}

impl LayoutHost for VenueLayout {
    fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn drawn_layout(&self) -> &DrawnVenueLayout {
        self.active_drawn_layout()
    }

    fn has_background_image(&self) -> bool {
        self.active_image_url().is_some_and(|url| !url.is_empty())
    }

    fn update_section(&mut self, section_id: &str, patch: SectionPatch) {
        match self.section_mut(section_id) {
            Some(section) => {
                log::debug!("Updating section {}", section_id);
                patch.apply_to(section);
            }
            None => log::warn!("Dropping update for unknown section {}", section_id),
        }
    }

    fn update_drawn_layout(&mut self, layout: DrawnVenueLayout) {
        log::debug!(
            "Updating drawn layout: boundary={}, lines={}",
            layout.boundary.is_some(),
            layout.lines.len()
        );
        self.set_active_drawn_layout(layout);
    }
}

/// Tracks whether a layout changed since it was last saved.
#[derive(Debug, Clone, Default)]
pub struct SaveTracker {
    saved: Option<Value>,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker that considers `layout` already saved.
    pub fn saved(layout: &VenueLayout) -> Self {
        let mut tracker = Self::new();
        tracker.mark_saved(layout);
        tracker
    }

    pub fn mark_saved(&mut self, layout: &VenueLayout) {
        self.saved = serde_json::to_value(layout).ok();
    }

    /// True when `layout` differs from the last saved snapshot.
    pub fn is_dirty(&self, layout: &VenueLayout) -> bool {
        match (&self.saved, serde_json::to_value(layout)) {
            (Some(saved), Ok(current)) => *saved != current,
            _ => true,
        }
    }
}
