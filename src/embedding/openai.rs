// OpenAI-compatible embeddings client.
//
// Works against api.openai.com and any gateway that speaks the same wire
// format (OpenRouter, local proxies). One POST per batch:
//
//   POST {base_url}/embeddings
//   { "model": "...", "input": ["text a", "text b"] }
//
// The response's `data[].index` is honored when present, so vectors come
// back in submission order even if the gateway reorders them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{Embedding, EmbeddingError, EmbeddingProvider};

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Embedding provider backed by an OpenAI-compatible HTTP API.
pub struct OpenAiEmbeddings {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiEmbeddings {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .user_agent(concat!("copymind/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, model: &str, inputs: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingsRequest { model, input: inputs };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EmbeddingError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: EmbeddingsResponse = serde_json::from_str(&body)
            .map_err(|e| EmbeddingError::Malformed(e.to_string()))?;

        let vectors = into_ordered_vectors(parsed, inputs.len())?;

        debug!(
            model,
            inputs = inputs.len(),
            dim = vectors.first().map(Vec::len).unwrap_or(0),
            "Fetched embeddings"
        );

        Ok(vectors)
    }
}

/// Put the returned vectors in submission order and check there is exactly
/// one per input.
fn into_ordered_vectors(
    response: EmbeddingsResponse,
    expected: usize,
) -> Result<Vec<Embedding>, EmbeddingError> {
    if response.data.len() != expected {
        return Err(EmbeddingError::Malformed(format!(
            "expected {expected} embeddings, got {}",
            response.data.len()
        )));
    }

    let mut data = response.data;
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
        let indices_match = data
            .iter()
            .enumerate()
            .all(|(i, d)| d.index == Some(i));
        if !indices_match {
            return Err(EmbeddingError::Malformed(
                "embedding indices do not match inputs".to_string(),
            ));
        }
    }

    Ok(data.into_iter().map(|d| d.embedding).collect())
}

// --- Wire types ---

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
    index: Option<usize>,
}
