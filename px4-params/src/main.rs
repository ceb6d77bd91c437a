//! Scrape parameter metadata from a PX4-Autopilot checkout into JSON.
//!
//! Usage:
//!   cargo run -p px4-params -- [REPO] [--output-dir <dir>] [--debug] [--json]

mod logger;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use px4_params::config::default_repo_path;
use px4_params::{ParameterScraper, ScraperConfig};

#[derive(Parser)]
#[command(name = "px4-param-scraper")]
#[command(about = "Extract PX4 parameter metadata into a JSON document")]
struct Cli {
    /// PX4-Autopilot checkout (defaults to a PX4-Autopilot directory next to this tool)
    #[arg(value_name = "REPO")]
    repo: Option<PathBuf>,

    /// Directory receiving px4_parameters.json
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Output structured JSON logs
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Resolve the checkout to scan, failing when it does not exist
fn resolve_repo_path(repo: Option<PathBuf>) -> Result<PathBuf> {
    let repo_path = repo.unwrap_or_else(default_repo_path);
    repo_path.canonicalize().with_context(|| {
        format!(
            "PX4-Autopilot repository not found at {}. \
             Please ensure you have cloned the PX4-Autopilot repository",
            repo_path.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let repo_path = resolve_repo_path(cli.repo)?;

    logger::init_logger(cli.json, cli.debug);

    let mut config = ScraperConfig::new(repo_path);
    if let Some(output_dir) = cli.output_dir {
        config = config.with_output_dir(output_dir);
    }
    tracing::info!(path = %config.output_dir.display(), "Output directory set");

    let report = ParameterScraper::new(config).parse_all();
    if let Some(path) = report.output_path {
        tracing::info!(path = %path.display(), "Wrote parameter document");
    }

    Ok(())
}
