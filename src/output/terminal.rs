// Colored terminal output for gate verdicts.
//
// The gate itself only returns numbers. This module turns a report into the
// lines a writer actually reads: each score as a percentage next to its
// limit, and on failure, which axes tripped plus advice to regenerate.

use colored::Colorize;

use crate::similarity::gate::{SimilarityReport, Thresholds};

use super::percent;

/// Advice appended to every failing verdict.
pub const REGENERATE_HINT: &str =
    "Regenerate with stronger rewrite settings (more aggressive rewrite mode, new examples, restructured outline).";

/// Names of the score axes that met or exceeded their threshold.
pub fn failing_axes(report: &SimilarityReport, thresholds: &Thresholds) -> Vec<&'static str> {
    let mut axes = Vec::new();
    if report.char_overlap >= thresholds.max_char_overlap {
        axes.push("character overlap");
    }
    if report.jaccard >= thresholds.max_jaccard {
        axes.push("vocabulary overlap");
    }
    if report.semantic >= thresholds.max_semantic {
        axes.push("semantic similarity");
    }
    axes
}

/// Render a report as the lines `display_report` prints.
///
/// Color follows the `colored` crate's global switch, so the same lines come
/// out plain when `NO_COLOR` is set.
pub fn report_lines(report: &SimilarityReport, thresholds: &Thresholds) -> Vec<String> {
    let rows = [
        ("Character overlap:  ", report.char_overlap, thresholds.max_char_overlap),
        ("Vocabulary overlap: ", report.jaccard, thresholds.max_jaccard),
        ("Semantic similarity:", report.semantic, thresholds.max_semantic),
    ];

    let mut lines: Vec<String> = rows
        .iter()
        .map(|&(label, score, limit)| {
            let value = format!("{:>6}", percent(score));
            let value = if score < limit { value.green() } else { value.red().bold() };
            format!("{label} {value}  {}", format!("(limit {})", percent(limit)).dimmed())
        })
        .collect();

    if report.pass {
        lines.push(format!(
            "Verdict: {} rewrite is original enough to publish.",
            "PASS".green().bold()
        ));
    } else {
        let axes = failing_axes(report, thresholds);
        lines.push(format!(
            "Verdict: {} too similar on {}.",
            "FAIL".red().bold(),
            axes.join(", ")
        ));
        lines.push(REGENERATE_HINT.yellow().to_string());
    }

    lines
}

/// Print a colored verdict to stdout.
pub fn display_report(report: &SimilarityReport, thresholds: &Thresholds) {
    println!("\n{}", "=== Originality Check ===".bold());
    for line in report_lines(report, thresholds) {
        println!("  {line}");
    }
}
