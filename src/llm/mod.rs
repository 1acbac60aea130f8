pub mod gemini;
pub mod openai;
pub mod translator;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use translator::CypherTranslator;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Errors from LLM providers
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No generation-capable models available")]
    NoModels,
}

/// Trait for interchangeable text-generation backends used for
/// natural-language -> Cypher translation and answer summarization.
#[async_trait]
pub trait CypherProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Process-wide single-slot cache of the last model name that worked.
///
/// Empty at startup, set on the first successful discovery, invalidated
/// when a generation call using the cached model fails. Concurrent
/// set/invalidate races are benign: a stale or missing value only costs
/// an extra discovery call, never a wrong answer.
#[derive(Clone, Default)]
pub struct ModelCache {
    inner: Arc<Mutex<Option<String>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.inner.lock().clone()
    }

    pub fn set(&self, model: String) {
        *self.inner.lock() = Some(model);
    }

    pub fn invalidate(&self) {
        *self.inner.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_cache_lifecycle() {
        let cache = ModelCache::new();
        assert_eq!(cache.get(), None);

        cache.set("gemini-pro".to_string());
        assert_eq!(cache.get(), Some("gemini-pro".to_string()));

        cache.set("gemini-1.5-flash".to_string());
        assert_eq!(cache.get(), Some("gemini-1.5-flash".to_string()));

        cache.invalidate();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_model_cache_clones_share_state() {
        let cache = ModelCache::new();
        let other = cache.clone();

        cache.set("gemini-pro".to_string());
        assert_eq!(other.get(), Some("gemini-pro".to_string()));

        other.invalidate();
        assert_eq!(cache.get(), None);
    }
}
