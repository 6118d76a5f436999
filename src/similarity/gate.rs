// The originality gate: combine three similarity signals into pass/fail.
//
// A rewrite passes only when it is dissimilar on every axis:
//
//   pass = char_overlap < max_char_overlap
//       && jaccard      < max_jaccard
//       && semantic     < max_semantic
//
// One strong signal (verbatim phrasing, near-identical vocabulary, or the
// same meaning) is enough to reject. Meeting a threshold exactly fails.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::jaccard::jaccard_similarity;
use super::overlap::ngram_overlap;
use super::semantic::SemanticScorer;
use super::tokenize::DEFAULT_NGRAM_SIZE;

/// Upper bounds (exclusive) on each similarity score for a passing rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub max_char_overlap: f64,
    pub max_jaccard: f64,
    pub max_semantic: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_char_overlap: 0.20,
            max_jaccard: 0.25,
            max_semantic: 0.75,
        }
    }
}

impl Thresholds {
    /// Apply the conjunctive decision rule to a set of scores.
    pub fn passes(&self, char_overlap: f64, jaccard: f64, semantic: f64) -> bool {
        char_overlap < self.max_char_overlap
            && jaccard < self.max_jaccard
            && semantic < self.max_semantic
    }
}

/// Tunables for the gate: decision thresholds and n-gram window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    pub thresholds: Thresholds,
    pub ngram_size: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            ngram_size: DEFAULT_NGRAM_SIZE,
        }
    }
}

/// The gate's verdict: raw scores plus the derived pass flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    pub char_overlap: f64,
    pub jaccard: f64,
    pub semantic: f64,
    pub pass: bool,
}

impl SimilarityReport {
    /// Build a report, deriving `pass` from the thresholds.
    pub fn new(char_overlap: f64, jaccard: f64, semantic: f64, thresholds: &Thresholds) -> Self {
        Self {
            char_overlap,
            jaccard,
            semantic,
            pass: thresholds.passes(char_overlap, jaccard, semantic),
        }
    }
}

/// Rejected input: nothing is scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Both original and rewritten texts are required (original is empty).")]
    MissingOriginal,
    #[error("Both original and rewritten texts are required (rewritten is empty).")]
    MissingRewritten,
}

/// Check that both texts are present before running the gate.
pub fn validate_pair(original: &str, rewritten: &str) -> Result<(), ValidationError> {
    if original.is_empty() {
        return Err(ValidationError::MissingOriginal);
    }
    if rewritten.is_empty() {
        return Err(ValidationError::MissingRewritten);
    }
    Ok(())
}

/// Stateless originality gate. Clone it freely; clones share the provider.
#[derive(Clone)]
pub struct OriginalityGate {
    semantic: SemanticScorer,
    config: GateConfig,
}

impl OriginalityGate {
    pub fn new(semantic: SemanticScorer, config: GateConfig) -> Self {
        Self { semantic, config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn semantic_model(&self) -> &str {
        self.semantic.model()
    }

    /// Score a rewrite against its original and decide whether it passes.
    ///
    /// Never fails: provider trouble degrades the semantic score to 0.0 and
    /// empty texts score 0.0 on every axis. Use `validate_pair` first when
    /// empty input should be rejected.
    pub async fn evaluate(&self, original: &str, rewritten: &str) -> SimilarityReport {
        let char_overlap = ngram_overlap(original, rewritten, self.config.ngram_size);
        let jaccard = jaccard_similarity(original, rewritten);
        let semantic = self.semantic.score(original, rewritten).await;

        let report =
            SimilarityReport::new(char_overlap, jaccard, semantic, &self.config.thresholds);

        debug!(
            char_overlap,
            jaccard,
            semantic,
            pass = report.pass,
            "Evaluated rewrite"
        );

        report
    }
}
