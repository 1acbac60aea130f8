use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::llm::ProviderError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No LLM provider configured: set OPENAI_API_KEY or GEMINI_API_KEY")]
    NoProviders,

    #[error("All LLM providers failed: {}", format_failures(.0))]
    ProvidersExhausted(Vec<(String, ProviderError)>),

    #[error("Query translation timed out. Please try a simpler question.")]
    TranslationTimeout,

    #[error("Neo4j error: {0}")]
    Neo4j(String),

    #[error("Dataset source error: {0}")]
    Source(#[from] reqwest::Error),

    #[error("Dataset parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_failures(failures: &[(String, ProviderError)]) -> String {
    failures
        .iter()
        .map(|(name, e)| format!("{}: {}", name, e))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            ApiError::TranslationTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::ProvidersExhausted(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
