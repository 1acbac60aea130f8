pub mod models;
pub mod services;
pub mod handlers;
pub mod graph_db;
pub mod ingest;
pub mod llm;
pub mod errors;
