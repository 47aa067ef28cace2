//! Gathering URLs from the command line and scoring them in parallel batches.

use std::path::Path;

use anyhow::{Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::models::UrlReport;
use crate::pipeline::UrlAnalyzer;
use crate::url::normalize::is_blank;

/// Parse a URL list: one per line, blank lines and `#` comments skipped.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading URL list {}", path.display()))?;
    Ok(parse_url_list(&content))
}

/// Drop inputs that are empty after trimming, warning about each one.
pub fn without_blanks(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .filter(|url| {
            if is_blank(url) {
                warn!("skipping blank URL");
                false
            } else {
                true
            }
        })
        .collect()
}

pub fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Score every URL, `batch_size` at a time per blocking worker.
///
/// Reports come back in input order.
pub async fn analyze_all(
    analyzer: &UrlAnalyzer,
    urls: Vec<String>,
    batch_size: usize,
    progress: Option<&ProgressBar>,
) -> Result<Vec<UrlReport>> {
    let batch_size = batch_size.max(1);

    let tasks: Vec<_> = urls
        .chunks(batch_size)
        .map(|chunk| {
            let analyzer = analyzer.clone();
            let chunk = chunk.to_vec();
            let progress = progress.cloned();
            tokio::task::spawn_blocking(move || {
                let reports: Vec<UrlReport> = chunk.iter().map(|url| analyzer.analyze(url)).collect();
                if let Some(pb) = progress {
                    pb.inc(reports.len() as u64);
                }
                reports
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(urls.len());
    for batch in join_all(tasks).await {
        reports.extend(batch.context("URL scoring worker failed")?);
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    Ok(reports)
}
