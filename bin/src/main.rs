//! The `jot` binary: logging, CLI parsing, and the terminal frontend.

mod cli;
mod frontend;

use clap::Parser as _;
use jot::{EditorEngine, EditorEvent, Effect};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let guard = jot_log::init(cli.log_file.clone())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    tracing::info!(log_file = %guard.log_file.display(), "jot starting");

    let mut engine =
        EditorEngine::with_autosave_interval(Duration::from_secs(cli.autosave_interval.max(1)));

    if let Some(path) = cli.file {
        // Surface open failures on stderr before the terminal UI takes over;
        // the editor still starts, with an empty unbound document.
        for effect in engine.handle_event(EditorEvent::OpenFile { path }) {
            if let Effect::ShowError { message } = effect {
                eprintln!("{message}");
            }
        }
    }

    frontend::run(engine)
}
