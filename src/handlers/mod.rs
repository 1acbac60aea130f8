use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::graph_db::Neo4jClient;
use crate::ingest::{self, IngestMode, IngestOptions};
use crate::models::{ExampleQuery, QueryRequest, SeedDataRequest, SeedDataResponse};
use crate::services::{GraphService, QueryService};

pub struct AppState {
    pub graph: Arc<Neo4jClient>,
    pub query_service: QueryService,
    pub graph_service: GraphService,
}

pub async fn graphrag_query(
    state: web::Data<AppState>,
    request: web::Json<QueryRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = state.query_service.translate_and_run(&request.query).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Execute a direct Cypher query without AI processing (for preset buttons)
pub async fn direct_query(
    state: web::Data<AppState>,
    request: web::Json<QueryRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = state.query_service.run_query(&request.query).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn graph_data(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let snapshot = state.graph_service.snapshot().await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn seed_data(
    state: web::Data<AppState>,
    request: web::Json<SeedDataRequest>,
) -> Result<HttpResponse, ApiError> {
    let options = IngestOptions {
        mode: IngestMode::from_region(request.region.as_deref()),
        clear_existing: request.clear_existing,
        include_unknown_airlines: request.include_unknown_airlines,
    };

    let summary = ingest::run(&state.graph, &options).await?;

    Ok(HttpResponse::Ok().json(SeedDataResponse {
        message: format!("{} data loaded successfully", options.mode.label()),
        airports: summary.airports,
        airlines: summary.airlines,
        routes: summary.routes,
    }))
}

pub async fn example_queries() -> HttpResponse {
    let examples = vec![
        ExampleQuery {
            id: 1,
            question: "Which airports are in Brazil?".to_string(),
            description: "Lists every Brazilian airport".to_string(),
        },
        ExampleQuery {
            id: 2,
            question: "Show all routes departing from GRU".to_string(),
            description: "Routes out of Guarulhos airport".to_string(),
        },
        ExampleQuery {
            id: 3,
            question: "Which airlines operate international routes?".to_string(),
            description: "Carriers with routes between countries".to_string(),
        },
        ExampleQuery {
            id: 4,
            question: "What is the longest route?".to_string(),
            description: "Route with the greatest distance".to_string(),
        },
        ExampleQuery {
            id: 5,
            question: "How many airports are there per country?".to_string(),
            description: "Airport count grouped by country".to_string(),
        },
    ];

    HttpResponse::Ok().json(examples)
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "aerograph"
    }))
}
