use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Label, Severity, UrlReport};

/// Render a colored terminal report.
pub fn render(reports: &[UrlReport], verbose: bool, quiet: bool) -> Result<()> {
    let total = reports.len();
    let phishing_count = reports.iter().filter(|r| r.label == Label::Phishing).count();
    let legitimate_count = total - phishing_count;

    if quiet {
        println!(
            "Total: {}  Phishing: {}  Legitimate: {}",
            total,
            phishing_count.to_string().red(),
            legitimate_count.to_string().green(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "phish-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    let reasons = summarize_reasons(reports);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("URLs checked       : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Phishing        : {:>4}  {}", "✗".red(), phishing_count, reasons)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Legitimate      : {:>4}", "✓".green(), legitimate_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if phishing_count > 0 {
        println!(" {} URLs classified as phishing:\n", "[PHISHING]".red().bold());
        println!("{}", build_table(reports, Label::Phishing));
        println!();
    }

    if verbose && legitimate_count > 0 {
        println!(" {} URLs classified as legitimate:\n", "[OK]".green().bold());
        println!("{}", build_table(reports, Label::Legitimate));
        println!();
    }

    Ok(())
}

fn build_table(reports: &[UrlReport], label: Label) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("Label").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Reason").add_attribute(Attribute::Bold),
        ]);

    for report in reports.iter().filter(|r| r.label == label) {
        let color = match report.severity {
            Severity::Danger => Color::Red,
            Severity::Success => Color::Green,
        };

        let reason = report
            .reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "model".to_string());

        table.add_row(vec![
            Cell::new(&report.url),
            Cell::new(report.label.to_string()).fg(color),
            Cell::new(format!("{:.2}%", report.confidence)).set_alignment(CellAlignment::Right),
            Cell::new(reason).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// Top heuristic reasons among phishing results, e.g. `[shortener (2), host_is_ip (1)]`.
fn summarize_reasons(reports: &[UrlReport]) -> String {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for report in reports.iter().filter(|r| r.label == Label::Phishing) {
        let reason = report
            .reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "model".to_string());
        *counts.entry(reason).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(reason, cnt)| format!("{} ({})", reason, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
