//! feedmerge CLI: load config, run one merge cycle, write the file.
//!
//! Meant to be invoked by an external scheduler (cron, a systemd timer).
//! Exits non-zero only on configuration or persistence failure; feeds that
//! fail to fetch are logged and skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;

use feedmerge::config::Config;
use feedmerge::feed::store;
use feedmerge::logging;
use feedmerge::merge::run_merge_cycle;
use feedmerge::source::RssFetcher;

#[derive(Parser)]
#[command(name = "feedmerge")]
#[command(about = "Merge RSS feeds into one bounded, deduplicated feed file", long_about = None)]
struct Cli {
    /// Path to a TOML config file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the output file from the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Run the full cycle but do not write the output file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // -- configuration -------------------------------------------------------
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    logging::init(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    // -- load, merge, persist ------------------------------------------------
    let existing = store::load_or_default(&config.output_path, &config.channel)?;
    let fetcher = RssFetcher::new()?;

    info!(
        sources = config.feeds.len(),
        output = %config.output_path.display(),
        "starting run"
    );
    let outcome = run_merge_cycle(
        existing,
        &config.sources(),
        &fetcher,
        &config.merge_settings(),
        Utc::now(),
    );
    let stats = outcome.stats;

    if cli.dry_run {
        info!(?stats, items = outcome.document.items.len(), "dry run, not writing");
        return Ok(());
    }

    store::save(&config.output_path, &outcome.document)
        .with_context(|| format!("run aborted, {} left unchanged", config.output_path.display()))?;

    info!(
        accepted = stats.accepted,
        trimmed = stats.trimmed,
        failed_sources = stats.failed_sources,
        items = outcome.document.items.len(),
        "run finished"
    );
    Ok(())
}
