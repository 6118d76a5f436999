// Semantic similarity via embedding cosine.
//
// Both texts go to the embedding provider in one batched request. Cosine
// similarity between the two vectors captures meaning-level closeness that
// n-grams and tokens miss: a paraphrase that swaps every word can still land
// near the original.
//
// Failure policy is fail-soft. Any provider error, a timeout, or a response
// that can't be compared is logged as a warning and the score becomes 0.0.
// The gate then treats the semantic axis as "dissimilar" rather than refusing
// to answer. This means a provider outage can let a rewrite pass on the
// lexical checks alone.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::embedding::traits::{EmbeddingError, EmbeddingProvider};

/// Default upper bound on a single embedding round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Scores semantic similarity using an injected embedding provider.
///
/// Cheap to clone; the provider is shared read-only across requests.
#[derive(Clone)]
pub struct SemanticScorer {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    timeout: Duration,
}

impl SemanticScorer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the round-trip timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Semantic similarity of the two texts, degrading to 0.0 on any failure.
    ///
    /// Empty input scores 0.0 without calling the provider.
    pub async fn score(&self, original: &str, rewritten: &str) -> f64 {
        if original.is_empty() || rewritten.is_empty() {
            return 0.0;
        }

        match self.try_score(original, rewritten).await {
            Ok(similarity) => similarity,
            Err(e) => {
                warn!(
                    error = %e,
                    model = %self.model,
                    "Semantic similarity check failed, returning 0"
                );
                0.0
            }
        }
    }

    /// Semantic similarity of the two texts, surfacing provider failures.
    pub async fn try_score(&self, original: &str, rewritten: &str) -> Result<f64, EmbeddingError> {
        let inputs = [original, rewritten];
        let request = self.provider.embed(&self.model, &inputs);
        let vectors = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| EmbeddingError::Timeout(self.timeout))??;

        let (a, b) = match vectors.as_slice() {
            [a, b] => (a, b),
            other => {
                return Err(EmbeddingError::Malformed(format!(
                    "expected 2 embeddings, got {}",
                    other.len()
                )))
            }
        };

        let similarity = cosine_similarity(a, b)?;
        debug!(similarity, dim = a.len(), "Computed semantic similarity");
        Ok(similarity)
    }
}

/// Cosine similarity between two embeddings.
///
/// Ranges from -1.0 to 1.0 and is not clamped. A zero-magnitude vector scores
/// 0.0. Vectors of different dimensionality can't be compared and are
/// reported as a malformed response.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::Malformed(format!(
            "embedding dimensions differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(EmbeddingError::Malformed("empty embedding".to_string()));
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (mag_a * mag_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert!(sim.abs() < 1e-10);
    }

    #[test]
    fn test_cosine_opposite_not_clamped() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        let sim = cosine_similarity(&[1.0, 1.0], &[10.0, 10.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_cosine_tiny_vectors_still_compare() {
        let sim = cosine_similarity(&[1e-9, 0.0], &[1e-9, 0.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0]).unwrap_err();
        assert!(matches!(err, EmbeddingError::Malformed(_)));
    }
}
