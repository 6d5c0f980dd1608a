//! IMDb Renamer CLI
//!
//! Renames movie and TV episode files to "Title (Year)" or
//! "Title - SxxEyy - Episode Title" using OMDb.

use clap::Parser;
use imdb_renamer::cli::{args::Cli, commands::rename};
use imdb_renamer::core::renamer::RenameOptions;
use imdb_renamer::models::config::{load_config, Config};
use imdb_renamer::preflight;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Configuration is loaded once and passed down explicitly
    let config = load_config(cli.config.as_deref())?;

    if !cli.skip_preflight {
        run_preflight_checks(&config).await?;
    }

    let options = RenameOptions {
        simulate: cli.simulate,
        offset: cli.offset,
        ..Default::default()
    };

    rename::rename_files(&cli.files, options, &config).await?;

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("imdb_renamer=debug")
    } else {
        EnvFilter::new("imdb_renamer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
