// Markdown report generation for the `compare` command.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::analysis::AnalysisOutcome;

/// Render a similarity report as markdown.
pub fn render_report(outcome: &AnalysisOutcome, threshold_pct: f64) -> String {
    let report = &outcome.report;
    let mut md = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(md, "# Similarity Report\n");
    let _ = writeln!(md, "Generated: {}\n", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(md, "- Files received: {}", outcome.files_received);
    let _ = writeln!(md, "- Files compared: {}", report.total_files);
    let _ = writeln!(md, "- Threshold: {threshold_pct:.2}%");
    let _ = writeln!(md, "- Pairs reported: {}\n", report.comparisons);

    let _ = writeln!(md, "## Similar pairs\n");
    if report.results.is_empty() {
        let _ = writeln!(md, "No pairs met the threshold.\n");
    } else {
        let _ = writeln!(md, "| Rank | File | File | Similarity |");
        let _ = writeln!(md, "|-----:|------|------|-----------:|");
        for (i, pair) in report.results.iter().enumerate() {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {:.2}% |",
                i + 1,
                escape_cell(&pair.file1),
                escape_cell(&pair.file2),
                pair.similarity
            );
        }
        md.push('\n');
    }

    if !outcome.skipped.is_empty() {
        let _ = writeln!(md, "## Skipped files\n");
        for file in &outcome.skipped {
            let _ = writeln!(md, "- `{}`: {}", file.filename, file.reason);
        }
    }

    md
}

/// Write the markdown report to `path`, creating parent directories.
/// Returns the path as written.
pub fn generate_report(outcome: &AnalysisOutcome, threshold_pct: f64, path: &str) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }

    fs::write(path, render_report(outcome, threshold_pct))
        .with_context(|| format!("writing report to {path}"))?;
    Ok(path.to_string())
}

/// Pipes would split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
