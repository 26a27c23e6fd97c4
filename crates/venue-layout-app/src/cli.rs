//! Command line and the end-to-end replay run.

use crate::error::{AppError, AppResult};
use crate::replay::{Replay, ReplaySummary};
use crate::script::load_script;
use clap::Parser;
use std::path::{Path, PathBuf};
use venue_layout_core::{EditorConfig, LayoutError, VenueLayout, Viewport};

#[derive(Parser, Debug, Clone)]
#[command(name = "venue-layout", version, about = "Replay editor interactions against a venue layout")]
pub struct Cli {
    #[arg(help = "Venue layout JSON to edit.", long)]
    pub layout: PathBuf,

    #[arg(help = "JSON array of scripted interactions.", long)]
    pub script: PathBuf,

    #[arg(help = "Editor tuning overrides (JSON).", long)]
    pub config: Option<PathBuf>,

    #[arg(help = "Where to write the edited layout (stdout when absent).", long, short)]
    pub output: Option<PathBuf>,

    #[arg(help = "Width of the canvas in screen pixels.", long, default_value_t = 1000.0)]
    pub canvas_width: f64,

    #[arg(help = "Canvas width / height. Defaults to the configured draw-mode ratio.", long)]
    pub aspect_ratio: Option<f64>,

    #[arg(help = "Pretty-print the output JSON.", long, default_value_t = false)]
    pub pretty: bool,
}

fn read_text(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Attach the file path to JSON errors from a model parser.
fn with_path(path: &Path, err: LayoutError) -> AppError {
    match err {
        LayoutError::Json(source) => AppError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => AppError::Layout(other),
    }
}

pub fn load_layout(path: &Path) -> AppResult<VenueLayout> {
    VenueLayout::from_json(&read_text(path)?).map_err(|err| with_path(path, err))
}

pub fn load_config(path: &Path) -> AppResult<EditorConfig> {
    EditorConfig::from_json(&read_text(path)?).map_err(|err| with_path(path, err))
}

/// Load inputs, replay the script and write the result.
pub fn run(cli: &Cli) -> AppResult<ReplaySummary> {
    let layout = load_layout(&cli.layout)?;
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let steps = load_script(&cli.script)?;
    log::info!(
        "Loaded {} sections and {} script steps from {}",
        layout.sections.len(),
        steps.len(),
        cli.script.display()
    );

    let ratio = cli.aspect_ratio.unwrap_or(config.default_aspect_ratio);
    let viewport = Viewport::for_aspect_ratio(cli.canvas_width, ratio);
    let mut replay = Replay::new(layout, config, viewport);
    let summary = replay.run(&steps)?;

    let layout = replay.into_layout();
    let json = if cli.pretty {
        layout.to_json()?
    } else {
        serde_json::to_string(&layout).map_err(LayoutError::from)?
    };
    match &cli.output {
        Some(path) => std::fs::write(path, json).map_err(|source| AppError::Write {
            path: path.clone(),
            source,
        })?,
        None => println!("{json}"),
    }
    Ok(summary)
}
