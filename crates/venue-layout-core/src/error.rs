//! Error types for layout model operations.
//!
//! Interactive gestures never fail: they clamp or no-op. Only explicit
//! model edits and (de)serialization surface these errors.

use thiserror::Error;

/// Layout model errors.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    #[error("Table index {index} out of range for section {section} ({count} tables)")]
    TableIndexOutOfRange {
        section: String,
        index: usize,
        count: usize,
    },
    #[error("Section {0} must keep at least one table")]
    TableCountFloor(String),
    #[error("Floor plan already exists: {0}")]
    DuplicateFloorPlan(String),
    #[error("Unknown floor plan: {0}")]
    UnknownFloorPlan(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for layout model operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
