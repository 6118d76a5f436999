// Batch pipeline: run the gate over many (original, rewritten) pairs.
//
// Input is JSON Lines, one `{"original": ..., "rewritten": ...}` object per
// line. Pairs are evaluated with bounded concurrency (each one costs an
// embedding round-trip), but results come back in input order so output
// line N always corresponds to input line N. Blank lines are skipped.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::output::truncate_chars;
use crate::similarity::gate::{validate_pair, OriginalityGate, SimilarityReport};

/// One pair to check, as read from a JSONL line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairInput {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub rewritten: String,
}

/// Outcome for one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Report {
        line: usize,
        #[serde(flatten)]
        report: SimilarityReport,
    },
    Error {
        line: usize,
        error: String,
    },
}

impl BatchOutcome {
    pub fn line(&self) -> usize {
        match self {
            BatchOutcome::Report { line, .. } | BatchOutcome::Error { line, .. } => *line,
        }
    }
}

/// Parse JSONL input into numbered pairs. Line numbers are 1-based.
///
/// Lines that aren't valid JSON become `Err` entries instead of aborting the
/// whole batch.
pub fn parse_lines(input: &str) -> Vec<(usize, Result<PairInput, String>)> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let parsed = serde_json::from_str::<PairInput>(line).map_err(|e| e.to_string());
            (i + 1, parsed)
        })
        .collect()
}

/// Evaluate every line of `input` and return outcomes in input order.
pub async fn run(
    gate: &OriginalityGate,
    input: &str,
    concurrency: usize,
    show_progress: bool,
) -> Result<Vec<BatchOutcome>> {
    let entries = parse_lines(input);

    let pb = if show_progress {
        let pb = ProgressBar::new(entries.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar().template("  Checking [{bar:30}] {pos}/{len} ({eta})")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let outcomes: Vec<BatchOutcome> = stream::iter(entries.into_iter().map(|(line, parsed)| {
        let pb = pb.clone();
        async move {
            let outcome = evaluate_line(gate, line, parsed).await;
            pb.inc(1);
            outcome
        }
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    pb.finish_and_clear();
    Ok(outcomes)
}

async fn evaluate_line(
    gate: &OriginalityGate,
    line: usize,
    parsed: Result<PairInput, String>,
) -> BatchOutcome {
    let pair = match parsed {
        Ok(pair) => pair,
        Err(e) => {
            warn!(line, error = %e, "Skipping unparseable batch line");
            return BatchOutcome::Error {
                line,
                error: format!("Invalid JSON: {e}"),
            };
        }
    };

    if let Err(e) = validate_pair(&pair.original, &pair.rewritten) {
        warn!(
            line,
            original = %truncate_chars(&pair.original, 40),
            "Skipping incomplete batch line"
        );
        return BatchOutcome::Error {
            line,
            error: e.to_string(),
        };
    }

    let report = gate.evaluate(&pair.original, &pair.rewritten).await;
    BatchOutcome::Report { line, report }
}
