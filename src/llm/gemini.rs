use async_trait::async_trait;

use super::{CypherProvider, ModelCache, ProviderError};

/// Google Gemini client using the generativelanguage REST API.
///
/// The concrete model name is not fixed: it is discovered at runtime via the
/// models listing, filtered to models that support `generateContent`, and
/// cached in a [`ModelCache`] shared across requests. A generation failure
/// with a cached model invalidates the cache so the next call rediscovers.
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    cache: ModelCache,
}

impl GeminiProvider {
    pub fn new(api_key: String, cache: ModelCache) -> Self {
        Self {
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::Client::new(),
            cache,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// List model names that support free-text generation.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Gemini model listing failed: {} - {}",
                status, error_text
            )));
        }

        let data: serde_json::Value = response.json().await?;

        let models = data["models"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .filter(|m| {
                        m["supportedGenerationMethods"]
                            .as_array()
                            .map_or(false, |methods| {
                                methods.iter().any(|method| method == "generateContent")
                            })
                    })
                    .filter_map(|m| m["name"].as_str())
                    .map(|name| name.trim_start_matches("models/").to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    async fn resolve_model(&self) -> Result<String, ProviderError> {
        if let Some(model) = self.cache.get() {
            return Ok(model);
        }

        let models = self.list_models().await?;
        let model = models.into_iter().next().ok_or(ProviderError::NoModels)?;

        tracing::info!("Selected Gemini model: {}", model);
        self.cache.set(model.clone());

        Ok(model)
    }

    async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0,
                "maxOutputTokens": 512
            }
        });

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Gemini API error: {} - {}",
                status, error_text
            )));
        }

        let data: serde_json::Value = response.json().await?;

        let content = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse("Missing candidate text".to_string()))?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl CypherProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let model = self.resolve_model().await?;

        match self.generate_content(&model, prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                // Force rediscovery on the next call.
                self.cache.invalidate();
                Err(e)
            }
        }
    }
}
