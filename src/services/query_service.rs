use std::sync::Arc;

use serde_json::Value;

use crate::errors::ApiResult;
use crate::graph_db::Neo4jClient;
use crate::llm::CypherTranslator;
use crate::models::QueryResponse;

use super::postprocess;

const ANSWER_PREVIEW_SIZE: usize = 3;

pub struct QueryService {
    graph: Arc<Neo4jClient>,
    translator: Arc<CypherTranslator>,
}

impl QueryService {
    pub fn new(graph: Arc<Neo4jClient>, translator: Arc<CypherTranslator>) -> Self {
        Self { graph, translator }
    }

    /// Translate a natural-language question into Cypher, execute it, and
    /// shape the results with a short generated answer.
    pub async fn translate_and_run(&self, question: &str) -> ApiResult<QueryResponse> {
        let cypher = self.translator.translate(question).await?;
        tracing::info!("Generated Cypher: {}", cypher);

        let records = self.graph.run(&cypher).await?;
        let results = postprocess::shape_results(&records);
        let answer = self.summarize(question, &results).await;

        Ok(QueryResponse {
            answer,
            cypher_query: cypher,
            results,
        })
    }

    /// Execute a directly supplied Cypher query without AI translation.
    pub async fn run_query(&self, cypher: &str) -> ApiResult<QueryResponse> {
        let records = self.graph.run(cypher).await?;
        let results = postprocess::shape_results(&records);

        Ok(QueryResponse {
            answer: format!(
                "Query executed successfully. {} results found.",
                results.len()
            ),
            cypher_query: cypher.to_string(),
            results,
        })
    }

    /// Generate a short natural-language answer from a result preview.
    /// Never fails: any provider trouble falls back to a deterministic
    /// count summary.
    async fn summarize(&self, question: &str, results: &[Value]) -> String {
        let fallback = format!("Found {} results for your query.", results.len());

        if !self.translator.has_providers() {
            return fallback;
        }

        let preview: Vec<&Value> = results.iter().take(ANSWER_PREVIEW_SIZE).collect();
        let preview_json = serde_json::to_string(&preview).unwrap_or_default();
        let prompt = format!(
            "Question: {}\nResults (first {}): {}\n\nAnswer in 2 sentences max.",
            question, ANSWER_PREVIEW_SIZE, preview_json
        );

        match self.translator.generate(&prompt).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                tracing::warn!("Could not generate answer: {}. Using basic response.", e);
                fallback
            }
        }
    }
}
