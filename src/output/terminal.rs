// Colored terminal output for similarity reports.
//
// Used by the `compare` command; the HTTP server returns JSON instead.

use colored::Colorize;

use crate::analysis::{AnalysisOutcome, SkippedFile};
use crate::similarity::SimilarPair;

/// Filenames longer than this are shortened in the table.
const NAME_WIDTH: usize = 32;

/// Display a ranked list of similar pairs in the terminal.
pub fn display_report(outcome: &AnalysisOutcome, threshold_pct: f64) {
    let report = &outcome.report;

    println!(
        "\n{}",
        format!(
            "=== Similarity Report ({} of {} files compared) ===",
            report.total_files, outcome.files_received
        )
        .bold()
    );
    println!();

    if report.results.is_empty() {
        println!(
            "  {}",
            format!("No pairs at or above {threshold_pct:.2}% similarity.").green()
        );
    } else {
        display_pairs(&report.results);
    }

    display_skipped(&outcome.skipped);

    println!();
    println!(
        "  {} pairs with similarity >= {threshold_pct:.2}%",
        report.comparisons
    );
}

fn display_pairs(pairs: &[SimilarPair]) {
    println!(
        "  {:>4}  {:<w$}  {:<w$}  {:>8}",
        "Rank".dimmed(),
        "File".dimmed(),
        "File".dimmed(),
        "Score".dimmed(),
        w = NAME_WIDTH,
    );
    println!("  {}", "-".repeat(NAME_WIDTH * 2 + 18).dimmed());

    for (i, pair) in pairs.iter().enumerate() {
        println!(
            "  {:>4}. {:<w$}  {:<w$}  {}",
            i + 1,
            super::truncate_chars(&pair.file1, NAME_WIDTH - 3),
            super::truncate_chars(&pair.file2, NAME_WIDTH - 3),
            colorize_score(pair.similarity),
            w = NAME_WIDTH,
        );
    }
}

fn display_skipped(skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }

    println!(
        "\n  {} {} file(s) skipped:",
        "!".yellow().bold(),
        skipped.len()
    );
    for file in skipped {
        println!("    {} {}", file.filename, format!("({})", file.reason).dimmed());
    }
}

/// Colorize a similarity percentage: the closer to a copy, the louder.
fn colorize_score(similarity: f64) -> colored::ColoredString {
    let text = format!("{similarity:>7.2}%");
    if similarity >= 80.0 {
        text.red().bold()
    } else if similarity >= 60.0 {
        text.bright_red()
    } else {
        text.yellow()
    }
}
