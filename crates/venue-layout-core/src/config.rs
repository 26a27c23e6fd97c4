//! Editor tuning constants.
//!
//! Defaults match the behavior users expect; a host may load overrides
//! from JSON (every field is optional).

use crate::model::DEFAULT_TABLE_SIZE_PX;
use crate::viewport::DEFAULT_ASPECT_RATIO;
use serde::{Deserialize, Serialize};

/// Tunable thresholds and step sizes used by [`crate::LayoutEditor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Edge length, in pixels, of a table dropped from the palette.
    pub palette_table_size: f64,
    /// Alignment snap distance, in percent units.
    pub alignment_threshold: f64,
    /// Pointer travel (px) below which a press-release counts as a click.
    pub click_travel: f64,
    /// Displacement (px) after which a shift-drag locks to one axis.
    pub axis_lock_threshold: f64,
    /// Arrow-key nudge for tables, in pixels.
    pub nudge_px: f64,
    /// Arrow-key nudge for tables with shift held, in pixels.
    pub nudge_fast_px: f64,
    /// Arrow-key nudge for drawn elements, in percent.
    pub drawn_nudge_percent: f64,
    /// Smallest boundary (percent per side) kept after drawing.
    pub min_boundary_create: f64,
    /// Smallest boundary (percent per side) reachable by resizing.
    pub min_boundary_resize: f64,
    /// Shortest line (percent) kept after drawing.
    pub min_line_length: f64,
    /// Angle snap increment for shift-drawn lines, in degrees.
    pub angle_increment: f64,
    /// Grab radius of boundary resize handles and line endpoints, in px.
    pub handle_hit_px: f64,
    /// Grab distance of a line body, in px.
    pub line_hit_px: f64,
    /// Width / height of the canvas in draw mode.
    pub default_aspect_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette_table_size: DEFAULT_TABLE_SIZE_PX,
            alignment_threshold: 0.5,
            click_travel: 3.0,
            axis_lock_threshold: 5.0,
            nudge_px: 1.0,
            nudge_fast_px: 10.0,
            drawn_nudge_percent: 1.0,
            min_boundary_create: 2.0,
            min_boundary_resize: 5.0,
            min_line_length: 1.0,
            angle_increment: 45.0,
            handle_hit_px: 8.0,
            line_hit_px: 6.0,
            default_aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl EditorConfig {
    /// Parse overrides from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> crate::LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn nudge_step(&self, fast: bool) -> f64 {
        if fast { self.nudge_fast_px } else { self.nudge_px }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"alignmentThreshold": 1.0}"#).unwrap();
        assert!((config.alignment_threshold - 1.0).abs() < f64::EPSILON);
        assert!((config.palette_table_size - 48.0).abs() < f64::EPSILON);
        assert!((config.nudge_step(true) - 10.0).abs() < f64::EPSILON);
        assert!((config.nudge_step(false) - 1.0).abs() < f64::EPSILON);
    }
}
