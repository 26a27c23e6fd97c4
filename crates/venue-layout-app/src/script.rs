//! Replay scripts: a JSON array of editor interactions.
//!
//! Pointer coordinates are screen pixels relative to the viewport origin,
//! exactly as a browser would report them.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use venue_layout_core::{AlignMode, Axis, EditorMode, Key, KeyEvent, Modifiers};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptStep {
    #[serde(rename_all = "camelCase")]
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    #[serde(rename_all = "camelCase")]
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    #[serde(rename_all = "camelCase")]
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    /// Press on a palette entry; follow with pointer moves and an up.
    #[serde(rename_all = "camelCase")]
    PaletteDrag {
        section: String,
        index: usize,
        x: f64,
        y: f64,
    },
    #[serde(rename_all = "camelCase")]
    KeyDown {
        key: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        in_text_field: bool,
    },
    KeyUp {
        key: String,
    },
    Mode {
        mode: EditorMode,
    },
    Align {
        mode: AlignMode,
    },
    Distribute {
        axis: Axis,
    },
    SelectSection {
        section: String,
    },
    ClearSelection,
    ToggleLock,
    Delete,
    Unplace,
    Escape,
    /// Zoom by `factor` around a screen point.
    Zoom {
        factor: f64,
        x: f64,
        y: f64,
    },
    Pan {
        dx: f64,
        dy: f64,
    },
    ResetView,
    /// Switch floor plan; `null` returns to the default plan.
    SelectFloor {
        name: Option<String>,
    },
    AddTable {
        section: String,
        name: String,
    },
    RemoveTable {
        section: String,
        index: usize,
    },
    FontSize {
        size: f64,
    },
}

impl ScriptStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::PointerDown { .. } => "pointerDown",
            ScriptStep::PointerMove { .. } => "pointerMove",
            ScriptStep::PointerUp { .. } => "pointerUp",
            ScriptStep::PaletteDrag { .. } => "paletteDrag",
            ScriptStep::KeyDown { .. } => "keyDown",
            ScriptStep::KeyUp { .. } => "keyUp",
            ScriptStep::Mode { .. } => "mode",
            ScriptStep::Align { .. } => "align",
            ScriptStep::Distribute { .. } => "distribute",
            ScriptStep::SelectSection { .. } => "selectSection",
            ScriptStep::ClearSelection => "clearSelection",
            ScriptStep::ToggleLock => "toggleLock",
            ScriptStep::Delete => "delete",
            ScriptStep::Unplace => "unplace",
            ScriptStep::Escape => "escape",
            ScriptStep::Zoom { .. } => "zoom",
            ScriptStep::Pan { .. } => "pan",
            ScriptStep::ResetView => "resetView",
            ScriptStep::SelectFloor { .. } => "selectFloor",
            ScriptStep::AddTable { .. } => "addTable",
            ScriptStep::RemoveTable { .. } => "removeTable",
            ScriptStep::FontSize { .. } => "fontSize",
        }
    }
}

pub(crate) fn modifiers(shift: bool) -> Modifiers {
    Modifiers {
        shift,
        ..Modifiers::default()
    }
}

pub(crate) fn key_event(key: &str, shift: bool, in_text_field: bool) -> KeyEvent {
    let mut event = KeyEvent::new(Key::from_name(key), modifiers(shift));
    event.in_text_field = in_text_field;
    event
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_script(path: &Path) -> AppResult<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
