use crate::errors::{ApiError, ApiResult};
use neo4rs::{query, BoltType, ConfigBuilder, Graph};
use std::collections::HashMap;
use std::sync::Arc;

/// Neo4j client compatible with both local Neo4j and Neo4j AuraDB
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    ///
    /// # Arguments
    /// * `uri` - Neo4j connection URI. Supports:
    ///   - Local: `bolt://localhost:7687`
    ///   - AuraDB: `neo4j+s://xxxxx.databases.neo4j.io` or `neo4j+ssc://...`
    /// * `user` - Database username
    /// * `password` - Database password
    pub async fn new(uri: &str, user: &str, password: &str) -> ApiResult<Self> {
        tracing::info!("Connecting to Neo4j at: {}", uri);

        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db("neo4j")
            .fetch_size(500)
            .max_connections(10)
            .build()
            .map_err(|e| ApiError::Neo4j(format!("Failed to build Neo4j config: {}", e)))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| ApiError::Neo4j(format!("Failed to connect to Neo4j: {}", e)))?;

        // Test the connection
        let mut result = graph
            .execute(query("RETURN 1 as test"))
            .await
            .map_err(|e| ApiError::Neo4j(format!("Connection test failed: {}", e)))?;

        if result
            .next()
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?
            .is_some()
        {
            tracing::info!("Neo4j connection established");
        }

        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Execute a Cypher query and serialize every record to plain JSON.
    /// Nodes and relationships come back as maps of their properties;
    /// lists and nested maps are converted recursively.
    pub async fn run(&self, cypher: &str) -> ApiResult<Vec<serde_json::Value>> {
        let mut result = self
            .graph
            .execute(query(cypher))
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?
        {
            let record = row
                .to::<serde_json::Value>()
                .map_err(|e| ApiError::Neo4j(e.to_string()))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Run one `UNWIND $batch ...` upsert statement. The statement must end
    /// with `RETURN count(..) AS upserted`; rows the statement's MATCH
    /// clauses fail to bind simply drop out of the count.
    pub async fn upsert_batch(
        &self,
        cypher: &str,
        batch: Vec<HashMap<String, BoltType>>,
    ) -> ApiResult<usize> {
        let mut result = self
            .graph
            .execute(query(cypher).param("batch", batch))
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?;

        let mut upserted: i64 = 0;
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?
        {
            upserted = row
                .get::<i64>("upserted")
                .map_err(|e| ApiError::Neo4j(e.to_string()))?;
        }

        Ok(upserted as usize)
    }

    /// Destructively remove every node and relationship.
    pub async fn clear_all(&self) -> ApiResult<()> {
        let mut result = self
            .graph
            .execute(query("MATCH (n) DETACH DELETE n"))
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?;

        while result
            .next()
            .await
            .map_err(|e| ApiError::Neo4j(e.to_string()))?
            .is_some()
        {}

        Ok(())
    }
}
