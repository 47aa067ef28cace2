//! `phish-checkr` — classify URLs as phishing or legitimate.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialize logging.
//! 2. Load config (`.phish-checkr/config.toml`).
//! 3. Load the classifier artifact once.
//! 4. For each URL: normalize, pre-screen, extract features and score, in
//!    parallel batches.
//! 5. Render the requested report.
//! 6. Exit `0` (all legitimate) or `1` (at least one URL labeled phishing).

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use phish_checkr::batch::{analyze_all, progress_bar, read_url_list, without_blanks};
use phish_checkr::classifier::load_artifact;
use phish_checkr::config::load_config;
use phish_checkr::{logging, report, Label, UrlAnalyzer};

use cli::{Cli, ReportFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let working_dir = std::env::current_dir().context("resolving working directory")?;
    let config = load_config(&working_dir, cli.config.as_deref())?;

    // Collect URLs from arguments and --input
    let mut urls = cli.urls.clone();
    if let Some(input) = &cli.input {
        urls.extend(read_url_list(input)?);
    }
    let urls = without_blanks(urls);

    if urls.is_empty() {
        eprintln!("No URLs to check; pass them as arguments or with --input");
        std::process::exit(1);
    }

    // The artifact is required; nothing can be scored without it
    let paths = config.artifacts.paths(cli.artifacts.as_deref());
    let artifact = load_artifact(&paths).with_context(|| {
        format!(
            "loading classifier artifact from {}",
            paths.model.parent().unwrap_or(paths.model.as_path()).display()
        )
    })?;

    let analyzer = UrlAnalyzer::new(Arc::new(artifact)).with_screening(config.screening.enabled);

    if !cli.quiet && matches!(cli.report, ReportFormat::Terminal) {
        eprintln!("  {} checking {} URLs", "→".cyan(), urls.len());
    }

    let pb = if !cli.quiet && urls.len() > 1 && matches!(cli.report, ReportFormat::Terminal) {
        Some(progress_bar(urls.len())?)
    } else {
        None
    };

    let reports = analyze_all(&analyzer, urls, cli.batch_size as usize, pb.as_ref()).await?;

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&reports, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    // Exit code: 1 if any URL was labeled phishing
    let has_phishing = reports.iter().any(|r| r.label == Label::Phishing);

    if has_phishing {
        std::process::exit(1);
    }

    Ok(())
}
