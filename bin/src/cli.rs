//! Command line definition for the `jot` binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "jot")]
#[command(about = "A minimal notepad", long_about = None)]
pub struct Cli {
    /// File to open
    pub file: Option<PathBuf>,

    /// Seconds between autosave ticks
    #[arg(long, default_value_t = 10)]
    pub autosave_interval: u64,

    /// Write logs to this file (or directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
