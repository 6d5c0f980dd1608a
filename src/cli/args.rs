//! Command line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// IMDb Renamer - Rename movie and episode files to their canonical names
#[derive(Parser, Debug)]
#[command(name = "imdb-renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Paths to the files which should be renamed
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Simulate only, do not rename anything
    #[arg(short, long)]
    pub simulate: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Offset added to every parsed episode number
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i32,

    /// Path to a config.toml (default: user config directory)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip preflight checks
    #[arg(long)]
    pub skip_preflight: bool,
}
