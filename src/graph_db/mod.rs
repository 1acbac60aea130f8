pub mod neo4j_client;

pub use neo4j_client::Neo4jClient;
