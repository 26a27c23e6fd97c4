//! Errors surfaced by the replay driver.

use std::path::PathBuf;
use thiserror::Error;
use venue_layout_core::LayoutError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Script step {step}: {message}")]
    Script { step: usize, message: String },
}

pub type AppResult<T> = Result<T, AppError>;
