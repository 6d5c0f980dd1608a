//! Rename command implementation.
//!
//! Runs the renamer over the given files with an interactive resolver and
//! prints a summary of the batch.

use crate::core::renamer::{RenameOptions, RenameReport, Renamer};
use crate::core::selector::TerminalResolver;
use crate::models::config::Config;
use crate::services::omdb::OmdbClient;
use crate::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Rename the given files.
pub async fn rename_files(
    files: &[PathBuf],
    options: RenameOptions,
    config: &Config,
) -> Result<RenameReport> {
    if options.simulate {
        println!("{}", "[SIMULATE] No files will be renamed".bold().yellow());
        println!();
    }

    let client = OmdbClient::new(&config.omdb)?;
    let mut renamer = Renamer::new(client, Box::new(TerminalResolver), options);
    let report = renamer.run(files).await;

    print_summary(&report);
    Ok(report)
}

/// Print the batch summary.
pub fn print_summary(report: &RenameReport) {
    let (simulated, renamed): (Vec<_>, Vec<_>) = report.renamed().partition(|r| r.simulated);
    let skipped: Vec<_> = report.skipped().collect();

    println!();
    println!("{}", "[Rename Summary]".bold().green());
    println!("  {} {}", "Renamed:".bold(), renamed.len());
    if !simulated.is_empty() {
        println!("  {} {}", "Simulated:".bold(), simulated.len());
    }
    println!("  {} {}", "Skipped:".bold(), skipped.len());

    for (path, error) in skipped {
        println!(
            "    {} {} ({})",
            "-".red(),
            path.display(),
            error.reason()
        );
    }
}
