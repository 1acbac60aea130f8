use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::env;
use std::sync::Arc;

use aerograph::graph_db::Neo4jClient;
use aerograph::handlers::{self, AppState};
use aerograph::llm::{CypherProvider, CypherTranslator, GeminiProvider, ModelCache, OpenAiProvider};
use aerograph::services::{GraphService, QueryService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let neo4j_uri = env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let neo4j_user = env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
    let neo4j_password = env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "password".to_string());

    let graph = Neo4jClient::new(&neo4j_uri, &neo4j_user, &neo4j_password)
        .await
        .expect("Failed to connect to Neo4j");
    let graph = Arc::new(graph);

    let openai_key = env::var("OPENAI_API_KEY").unwrap_or_default();
    let gemini_key = env::var("GEMINI_API_KEY").unwrap_or_default();

    let mut providers: Vec<Box<dyn CypherProvider>> = Vec::new();
    if !openai_key.is_empty() {
        providers.push(Box::new(OpenAiProvider::new(openai_key)));
    }
    if !gemini_key.is_empty() {
        providers.push(Box::new(GeminiProvider::new(gemini_key, ModelCache::new())));
    }
    if providers.is_empty() {
        tracing::warn!("No LLM API key set. Natural-language queries will fail.");
    }
    let translator = Arc::new(CypherTranslator::new(providers));

    let state = web::Data::new(AppState {
        graph: graph.clone(),
        query_service: QueryService::new(graph.clone(), translator.clone()),
        graph_service: GraphService::new(graph.clone()),
    });

    let port = env::var("PORT")
        .unwrap_or_else(|_| "8001".to_string())
        .parse::<u16>()
        .expect("Invalid port number");

    tracing::info!("Starting AeroGraph API on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .route("/graphrag/query", web::post().to(handlers::graphrag_query))
                    .route("/query", web::post().to(handlers::direct_query))
                    .route("/graph/data", web::get().to(handlers::graph_data))
                    .route("/seed-data", web::post().to(handlers::seed_data))
                    .route("/examples", web::get().to(handlers::example_queries)),
            )
            .route("/health", web::get().to(handlers::health))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
