use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aerograph::errors::ApiError;
use aerograph::llm::{
    CypherProvider, CypherTranslator, GeminiProvider, ModelCache, OpenAiProvider, ProviderError,
};

fn openai_completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

fn gemini_models() -> serde_json::Value {
    json!({
        "models": [
            {
                "name": "models/embedding-001",
                "supportedGenerationMethods": ["embedContent"]
            },
            {
                "name": "models/gemini-1.5-flash",
                "supportedGenerationMethods": ["generateContent", "countTokens"]
            },
            {
                "name": "models/gemini-pro",
                "supportedGenerationMethods": ["generateContent"]
            }
        ]
    })
}

fn gemini_candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

#[tokio::test]
async fn openai_generate_returns_message_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_completion("MATCH (a:Airport) RETURN a LIMIT 50")),
        )
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string()).with_base_url(server.uri());

    let text = provider.generate("list airports").await.unwrap();
    assert_eq!(text, "MATCH (a:Airport) RETURN a LIMIT 50");
}

#[tokio::test]
async fn openai_error_status_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string()).with_base_url(server.uri());

    let err = provider.generate("list airports").await.unwrap_err();
    match err {
        ProviderError::Api(message) => assert!(message.contains("upstream exploded")),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn gemini_list_models_filters_to_generation_capable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_models()))
        .mount(&server)
        .await;

    let provider =
        GeminiProvider::new("test-key".to_string(), ModelCache::new()).with_base_url(server.uri());

    let models = provider.list_models().await.unwrap();
    assert_eq!(models, vec!["gemini-1.5-flash", "gemini-pro"]);
}

#[tokio::test]
async fn gemini_discovers_model_once_and_caches_it() {
    let server = MockServer::start().await;
    // Discovery must happen exactly once across two generate calls.
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_models()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_candidate("MATCH (n) RETURN n")))
        .expect(2)
        .mount(&server)
        .await;

    let cache = ModelCache::new();
    let provider =
        GeminiProvider::new("test-key".to_string(), cache.clone()).with_base_url(server.uri());

    provider.generate("q1").await.unwrap();
    provider.generate("q2").await.unwrap();

    assert_eq!(cache.get(), Some("gemini-1.5-flash".to_string()));
}

#[tokio::test]
async fn gemini_generation_failure_invalidates_cached_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/stale-model:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let cache = ModelCache::new();
    cache.set("stale-model".to_string());

    let provider =
        GeminiProvider::new("test-key".to_string(), cache.clone()).with_base_url(server.uri());

    let err = provider.generate("q").await.unwrap_err();
    assert!(matches!(err, ProviderError::Api(_)));
    assert_eq!(cache.get(), None);
}

#[tokio::test]
async fn translator_falls_back_from_failing_openai_to_gemini() {
    let openai_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&openai_server)
        .await;

    let gemini_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_models()))
        .mount(&gemini_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_candidate("```cypher\nMATCH (a:Airport) RETURN a LIMIT 50\n```")),
        )
        .mount(&gemini_server)
        .await;

    let translator = CypherTranslator::new(vec![
        Box::new(OpenAiProvider::new("test-key".to_string()).with_base_url(openai_server.uri())),
        Box::new(
            GeminiProvider::new("test-key".to_string(), ModelCache::new())
                .with_base_url(gemini_server.uri()),
        ),
    ]);

    let cypher = translator.translate("list airports").await.unwrap();
    assert_eq!(cypher, "MATCH (a:Airport) RETURN a LIMIT 50");
}

#[tokio::test]
async fn translator_reports_aggregated_failure_when_all_providers_fail() {
    let openai_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("openai down"))
        .mount(&openai_server)
        .await;

    let gemini_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
        .mount(&gemini_server)
        .await;

    let translator = CypherTranslator::new(vec![
        Box::new(OpenAiProvider::new("test-key".to_string()).with_base_url(openai_server.uri())),
        Box::new(
            GeminiProvider::new("test-key".to_string(), ModelCache::new())
                .with_base_url(gemini_server.uri()),
        ),
    ]);

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
