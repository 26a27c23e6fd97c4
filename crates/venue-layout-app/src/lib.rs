//! Venue Layout replay driver.
//!
//! Loads a venue layout, replays scripted pointer and keyboard interactions
//! through the core editor and writes the edited layout back out.

pub mod cli;
pub mod error;
pub mod replay;
pub mod script;

pub use cli::{Cli, run};
pub use error::{AppError, AppResult};
pub use replay::{RecordingHost, Replay, ReplaySummary};
pub use script::{ScriptStep, load_script, parse_script};
