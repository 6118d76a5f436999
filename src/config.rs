use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::embedding::openai::{OpenAiEmbeddings, DEFAULT_BASE_URL};
use crate::embedding::traits::{DisabledProvider, EmbeddingProvider};
use crate::similarity::gate::{GateConfig, OriginalityGate, Thresholds};
use crate::similarity::semantic::SemanticScorer;
use crate::similarity::tokenize::DEFAULT_NGRAM_SIZE;

/// Default embedding model when EMBEDDING_MODEL is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded automatically
/// at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the embedding API (EMBEDDING_API_KEY, falling
    /// back to OPENROUTER_API_KEY). Empty disables semantic scoring.
    pub embedding_api_key: String,
    /// OpenAI-compatible API base URL (BASE_URL)
    pub embedding_base_url: String,
    /// Embedding model identifier (EMBEDDING_MODEL)
    pub embedding_model: String,
    /// Upper bound on one embedding round-trip (EMBEDDING_TIMEOUT_SECS)
    pub embedding_timeout: Duration,
    /// HTTP port (PORT)
    pub port: u16,
    /// HTTP bind address (COPYMIND_BIND)
    pub bind: String,
    /// Gate thresholds and n-gram window
    pub gate: GateConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default. Values that are set but don't parse are an
    /// error rather than silently falling back.
    pub fn load() -> Result<Self> {
        let embedding_api_key = non_empty_var("EMBEDDING_API_KEY")
            .or_else(|| non_empty_var("OPENROUTER_API_KEY"))
            .unwrap_or_default();

        let timeout_secs: u64 = parse_var("EMBEDDING_TIMEOUT_SECS", 30)?;

        let gate = GateConfig {
            thresholds: Thresholds {
                max_char_overlap: parse_var(
                    "COPYMIND_MAX_CHAR_OVERLAP",
                    Thresholds::default().max_char_overlap,
                )?,
                max_jaccard: parse_var("COPYMIND_MAX_JACCARD", Thresholds::default().max_jaccard)?,
                max_semantic: parse_var(
                    "COPYMIND_MAX_SEMANTIC",
                    Thresholds::default().max_semantic,
                )?,
            },
            ngram_size: parse_var("COPYMIND_NGRAM_SIZE", DEFAULT_NGRAM_SIZE)?,
        };

        let config = Self {
            embedding_api_key,
            embedding_base_url: non_empty_var("BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            embedding_model: non_empty_var("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_timeout: Duration::from_secs(timeout_secs),
            port: parse_var("PORT", 4000)?,
            bind: non_empty_var("COPYMIND_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            gate,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the gate meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.gate.ngram_size == 0 {
            anyhow::bail!("COPYMIND_NGRAM_SIZE must be at least 1");
        }
        let t = &self.gate.thresholds;
        for (name, value) in [
            ("COPYMIND_MAX_CHAR_OVERLAP", t.max_char_overlap),
            ("COPYMIND_MAX_JACCARD", t.max_jaccard),
            ("COPYMIND_MAX_SEMANTIC", t.max_semantic),
        ] {
            if !value.is_finite() {
                anyhow::bail!("{name} must be a finite number, got {value}");
            }
        }
        if self.embedding_timeout.is_zero() {
            anyhow::bail!("EMBEDDING_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    /// Build the embedding provider this configuration describes.
    ///
    /// Without an API key the provider is disabled: the gate still runs, but
    /// every semantic score degrades to 0.0.
    pub fn embedding_provider(&self) -> Result<Arc<dyn EmbeddingProvider>> {
        if self.embedding_api_key.is_empty() {
            warn!(
                "No EMBEDDING_API_KEY or OPENROUTER_API_KEY set; semantic similarity will always read 0"
            );
            return Ok(Arc::new(DisabledProvider));
        }

        let client = OpenAiEmbeddings::new(
            &self.embedding_base_url,
            self.embedding_api_key.clone(),
            self.embedding_timeout,
        )
        .context("Failed to build embedding HTTP client")?;
        Ok(Arc::new(client))
    }

    /// Build a ready-to-use gate from this configuration.
    pub fn build_gate(&self) -> Result<OriginalityGate> {
        let semantic = SemanticScorer::new(self.embedding_provider()?, &self.embedding_model)
            .with_timeout(self.embedding_timeout);
        Ok(OriginalityGate::new(semantic, self.gate))
    }
}

/// Read an env var, treating unset and blank the same. A `.env` line like
/// `EMBEDDING_API_KEY=` exports an empty string.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an env var, using `default` when it is unset or blank.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {name}: {raw:?}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            embedding_api_key: String::new(),
            embedding_base_url: DEFAULT_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_timeout: Duration::from_secs(30),
            port: 4000,
            bind: "127.0.0.1".to_string(),
            gate: GateConfig::default(),
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_ngram_rejected() {
        let mut config = base_config();
        config.gate.ngram_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut config = base_config();
        config.gate.thresholds.max_semantic = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base_config();
        config.embedding_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    // The only test that touches process env, so no other test races it.
    #[test]
    fn test_load_treats_blank_vars_as_unset() {
        env::set_var("EMBEDDING_API_KEY", "");
        env::set_var("OPENROUTER_API_KEY", "sk-or-real");
        env::set_var("BASE_URL", "  ");
        env::set_var("EMBEDDING_MODEL", "");
        env::set_var("COPYMIND_NGRAM_SIZE", "");

        let config = Config::load().unwrap();
        assert_eq!(config.embedding_api_key, "sk-or-real");
        assert_eq!(config.embedding_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.gate.ngram_size, DEFAULT_NGRAM_SIZE);

        // A set primary key wins over the fallback.
        env::set_var("EMBEDDING_API_KEY", "sk-primary");
        assert_eq!(Config::load().unwrap().embedding_api_key, "sk-primary");

        // Set but unparseable is an error, not a silent default.
        env::set_var("COPYMIND_NGRAM_SIZE", "three");
        assert!(Config::load().is_err());

        for name in [
            "EMBEDDING_API_KEY",
            "OPENROUTER_API_KEY",
            "BASE_URL",
            "EMBEDDING_MODEL",
            "COPYMIND_NGRAM_SIZE",
        ] {
            env::remove_var(name);
        }
    }

    #[tokio::test]
    async fn test_missing_key_builds_disabled_gate() {
        let gate = base_config().build_gate().unwrap();
        let report = gate.evaluate("same words here", "same words here").await;
        assert_eq!(report.semantic, 0.0);
        assert!(!report.pass);
    }
}
