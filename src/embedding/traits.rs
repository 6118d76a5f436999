// Embedding provider trait: the swap-ready abstraction.
//
// The semantic scorer only needs "turn these texts into vectors". The default
// implementation calls an OpenAI-compatible /embeddings endpoint; tests plug
// in fakes that return fixed vectors or fail on purpose.

use async_trait::async_trait;
use thiserror::Error;

/// An embedding vector for a single text.
pub type Embedding = Vec<f64>;

/// Why an embedding request did not produce usable vectors.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The request never got a response (DNS, connect, TLS, reset...).
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected our credentials.
    #[error("embedding provider rejected credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success HTTP status.
    #[error("embedding provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response parsed but didn't contain what we asked for.
    #[error("malformed embedding response: {0}")]
    Malformed(String),

    /// The provider did not answer within the configured timeout.
    #[error("embedding request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// No provider is configured.
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
}

/// Trait for turning texts into embedding vectors. Implementations are async
/// because real providers are HTTP APIs.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed every input with `model`, returning one vector per input in the
    /// same order they were submitted.
    async fn embed(&self, model: &str, inputs: &[&str]) -> Result<Vec<Embedding>, EmbeddingError>;
}

/// Provider used when no API key is configured. Every call fails, so the
/// semantic score always degrades to 0.0.
pub struct DisabledProvider;

#[async_trait]
impl EmbeddingProvider for DisabledProvider {
    async fn embed(&self, _model: &str, _inputs: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        Err(EmbeddingError::Unavailable(
            "no embedding API key configured".to_string(),
        ))
    }
}
