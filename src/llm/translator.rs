use std::time::Duration;

use crate::errors::{ApiError, ApiResult};

use super::CypherProvider;

const TRANSLATION_TIMEOUT: Duration = Duration::from_secs(15);

const SCHEMA_PROMPT: &str = "Neo4j Cypher expert. Aviation database with:\n\
- Airport: code, name, city, country, latitude, longitude\n\
- Airline: code, name, country\n\
- ROUTE: airline, distance_km, duration_hours\n\
\n\
Return ONLY the Cypher query. LIMIT 50.\n\
\n\
Examples:\n\
- \"airports in Brazil\" -> MATCH (a:Airport {country: 'Brazil'}) RETURN a LIMIT 50\n\
- \"routes from GRU\" -> MATCH (a:Airport {code: 'GRU'})-[r:ROUTE]->(b:Airport) RETURN a, r, b LIMIT 50";

/// Translates natural-language questions into Cypher through an ordered
/// list of providers. The first provider that answers wins; the caller
/// sees a single result or a single aggregated failure.
pub struct CypherTranslator {
    providers: Vec<Box<dyn CypherProvider>>,
}

impl CypherTranslator {
    pub fn new(providers: Vec<Box<dyn CypherProvider>>) -> Self {
        Self { providers }
    }

    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn build_prompt(question: &str) -> String {
        format!("{}\n\nQuestion: {}", SCHEMA_PROMPT, question)
    }

    /// Try each provider in order; collect failures until one succeeds.
    pub async fn generate(&self, prompt: &str) -> ApiResult<String> {
        if self.providers.is_empty() {
            return Err(ApiError::NoProviders);
        }

        let mut failures = Vec::new();
        for provider in &self.providers {
            match provider.generate(prompt).await {
                Ok(text) => {
                    tracing::info!("Generated text via {}", provider.name());
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!("Provider {} failed: {}", provider.name(), e);
                    failures.push((provider.name().to_string(), e));
                }
            }
        }

        Err(ApiError::ProvidersExhausted(failures))
    }

    /// Translate a question into a sanitized Cypher query, bounded by the
    /// translation timeout.
    pub async fn translate(&self, question: &str) -> ApiResult<String> {
        let prompt = Self::build_prompt(question);

        let raw = tokio::time::timeout(TRANSLATION_TIMEOUT, self.generate(&prompt))
            .await
            .map_err(|_| ApiError::TranslationTimeout)??;

        Ok(strip_code_fences(&raw))
    }
}

/// Remove markdown code fences around a generated query.
///
/// Multi-line responses lose the leading fence line, and the trailing line
/// when it is exactly a closing fence. Single-line responses wrapped in
/// backticks lose the markers on both sides. Unfenced text passes through.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() == 1 {
        return trimmed.trim_matches('`').trim().to_string();
    }

    let body = if lines.len() > 2 && lines[lines.len() - 1].trim() == "```" {
        &lines[1..lines.len() - 1]
    } else {
        &lines[1..]
    };

    body.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ProviderError;
    use async_trait::async_trait;

    struct StubProvider {
        name: &'static str,
        response: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl CypherProvider for StubProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            match self.response {
                Ok(text) => Ok(text.to_string()),
                Err(message) => Err(ProviderError::Api(message.to_string())),
            }
        }
    }

    fn working(name: &'static str, text: &'static str) -> Box<dyn CypherProvider> {
        Box::new(StubProvider {
            name,
            response: Ok(text),
        })
    }

    fn failing(name: &'static str) -> Box<dyn CypherProvider> {
        Box::new(StubProvider {
            name,
            response: Err("boom"),
        })
    }

    #[test]
    fn test_strip_fenced_multiline() {
        let input = "```cypher\nMATCH (n) RETURN n\n```";
        assert_eq!(strip_code_fences(input), "MATCH (n) RETURN n");
    }

    #[test]
    fn test_strip_fenced_single_line() {
        assert_eq!(
            strip_code_fences("```MATCH (n) RETURN n```"),
            "MATCH (n) RETURN n"
        );
    }

    #[test]
    fn test_strip_fence_without_closing_marker() {
        let input = "```\nMATCH (n) RETURN n LIMIT 50";
        assert_eq!(strip_code_fences(input), "MATCH (n) RETURN n LIMIT 50");
    }

    #[test]
    fn test_unfenced_passes_through() {
        assert_eq!(
            strip_code_fences("  MATCH (n) RETURN n  "),
            "MATCH (n) RETURN n"
        );
    }

    #[test]
    fn test_prompt_includes_schema_and_question() {
        let prompt = CypherTranslator::build_prompt("airports in Brazil");
        assert!(prompt.contains("Airport: code, name, city, country"));
        assert!(prompt.contains("Question: airports in Brazil"));
    }

    #[tokio::test]
    async fn test_fallback_uses_second_provider() {
        let translator = CypherTranslator::new(vec![
            failing("openai"),
            working("gemini", "MATCH (a:Airport) RETURN a LIMIT 50"),
        ]);

        let cypher = translator.translate("list airports").await.unwrap();
        assert_eq!(cypher, "MATCH (a:Airport) RETURN a LIMIT 50");
    }

    #[tokio::test]
    async fn test_exhaustion_aggregates_all_failures() {
        let translator = CypherTranslator::new(vec![failing("openai"), failing("gemini")]);

        let err = translator.translate("list airports").await.unwrap_err();
        match err {
            ApiError::ProvidersExhausted(failures) => {
                assert_eq!(failures.len(), 2);
                assert_eq!(failures[0].0, "openai");
                assert_eq!(failures[1].0, "gemini");
            }
            other => panic!("expected ProvidersExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_providers_fails_fast() {
        let translator = CypherTranslator::new(Vec::new());

        let err = translator.translate("list airports").await.unwrap_err();
        assert!(matches!(err, ApiError::NoProviders));
    }

    #[tokio::test]
    async fn test_translation_strips_fences() {
        let translator = CypherTranslator::new(vec![working(
            "openai",
            "```\nMATCH (n) RETURN n LIMIT 50\n```",
        )]);

        let cypher = translator.translate("everything").await.unwrap();
        assert_eq!(cypher, "MATCH (n) RETURN n LIMIT 50");
    }
}
