use std::sync::Arc;

use serde_json::Value;

use crate::errors::ApiResult;
use crate::graph_db::Neo4jClient;
use crate::models::{GraphData, GraphLink, GraphNode};

use super::postprocess;

const NODES_QUERY: &str = "MATCH (n)
 WHERE n:Airport OR n:Airline
 RETURN toString(id(n)) AS id, labels(n)[0] AS label, properties(n) AS properties";

const LINKS_QUERY: &str = "MATCH (a)-[r:ROUTE]->(b)
 RETURN toString(id(a)) AS source, toString(id(b)) AS target,
        type(r) AS type, properties(r) AS properties";

pub struct GraphService {
    graph: Arc<Neo4jClient>,
}

impl GraphService {
    pub fn new(graph: Arc<Neo4jClient>) -> Self {
        Self { graph }
    }

    /// Whole-graph snapshot shaped for visualization: airport and airline
    /// nodes with sentinel-filtered properties, plus ROUTE links.
    pub async fn snapshot(&self) -> ApiResult<GraphData> {
        let node_records = self.graph.run(NODES_QUERY).await?;
        let link_records = self.graph.run(LINKS_QUERY).await?;

        let nodes = node_records.iter().map(shape_node).collect();
        let links = link_records.iter().map(shape_link).collect();

        Ok(GraphData { nodes, links })
    }
}

fn string_field(record: &Value, key: &str) -> String {
    record[key].as_str().unwrap_or("").to_string()
}

fn shape_node(record: &Value) -> GraphNode {
    let id = string_field(record, "id");
    let label = string_field(record, "label");

    let properties = postprocess::filter_record(&record["properties"])
        .unwrap_or(Value::Object(serde_json::Map::new()));

    let name = properties["name"]
        .as_str()
        .or_else(|| properties["code"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_{}", label, id));

    GraphNode {
        id,
        label,
        name,
        properties,
    }
}

fn shape_link(record: &Value) -> GraphLink {
    GraphLink {
        source: string_field(record, "source"),
        target: string_field(record, "target"),
        link_type: string_field(record, "type"),
        properties: record
            .get("properties")
            .cloned()
            .unwrap_or(Value::Object(serde_json::Map::new())),
    }
}
