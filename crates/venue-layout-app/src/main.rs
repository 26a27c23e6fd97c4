//! Command line entry point.

use clap::Parser;
use venue_layout_app::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting venue-layout on {}", cli.layout.display());

    match venue_layout_app::run(&cli) {
        Ok(summary) => log::info!(
            "Replayed {} steps: {} section updates, {} drawn-layout updates",
            summary.steps,
            summary.section_updates,
            summary.drawn_updates
        ),
        Err(err) => {
            log::error!("{err}");
            eprintln!("venue-layout: {err}");
            std::process::exit(1);
        }
    }
}
