mod records;

pub use records::{AirlineRecord, AirportRecord, RouteEdge};

use serde::{Deserialize, Serialize};

/// Values that carry no information and are stripped from query results.
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || matches!(
            value.to_ascii_lowercase().as_str(),
            "unknown" | "null" | "none"
        )
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub cypher_query: String,
    pub results: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub name: String,
    pub properties: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub properties: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SeedDataRequest {
    #[serde(default)]
    pub clear_existing: bool,
    /// None -> sample fixtures, "full" -> complete dataset,
    /// anything else -> ISO country filter (e.g. "BR").
    #[serde(default)]
    pub region: Option<String>,
    /// Overrides the per-mode default policy for sentinel-airline routes.
    #[serde(default)]
    pub include_unknown_airlines: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SeedDataResponse {
    pub message: String,
    pub airports: usize,
    pub airlines: usize,
    pub routes: usize,
}

#[derive(Debug, Serialize)]
pub struct ExampleQuery {
    pub id: u32,
    pub question: String,
    pub description: String,
}
