use std::collections::HashMap;

use async_trait::async_trait;
use neo4rs::BoltType;

use crate::errors::ApiResult;
use crate::graph_db::Neo4jClient;
use crate::models::{AirlineRecord, AirportRecord, RouteEdge};

use super::{IngestSummary, NormalizedDataset};

/// The one store capability the loader needs: run a single
/// `UNWIND $batch ...` statement and report how many rows it bound.
#[async_trait]
pub trait BatchUpsert: Send + Sync {
    async fn upsert_batch(
        &self,
        cypher: &str,
        batch: Vec<HashMap<String, BoltType>>,
    ) -> ApiResult<usize>;
}

#[async_trait]
impl BatchUpsert for Neo4jClient {
    async fn upsert_batch(
        &self,
        cypher: &str,
        batch: Vec<HashMap<String, BoltType>>,
    ) -> ApiResult<usize> {
        Neo4jClient::upsert_batch(self, cypher, batch).await
    }
}

const BATCH_SIZE: usize = 500;

// Absent durations travel as a negative sentinel and become null in Cypher;
// ROUTE durations are never legitimately negative.
const NO_DURATION: f64 = -1.0;

const UPSERT_AIRPORTS: &str = "UNWIND $batch AS airport
 MERGE (a:Airport {code: airport.code})
 SET a.name = airport.name,
     a.city = airport.city,
     a.country = airport.country,
     a.latitude = airport.latitude,
     a.longitude = airport.longitude
 RETURN count(a) AS upserted";

const UPSERT_AIRLINES: &str = "UNWIND $batch AS airline
 MERGE (al:Airline {code: airline.code})
 SET al.name = airline.name,
     al.country = airline.country
 RETURN count(al) AS upserted";

// Routes whose endpoints are missing fail the MATCH clauses and drop out
// of the count instead of erroring.
const UPSERT_ROUTES: &str = "UNWIND $batch AS route
 MATCH (a:Airport {code: route.source})
 MATCH (b:Airport {code: route.destination})
 MERGE (a)-[r:ROUTE {airline: route.airline}]->(b)
 SET r.distance_km = route.distance_km,
     r.duration_hours = CASE WHEN route.duration_hours < 0.0 THEN null ELSE route.duration_hours END
 RETURN count(r) AS upserted";

fn airport_to_map(airport: &AirportRecord) -> HashMap<String, BoltType> {
    let mut m: HashMap<String, BoltType> = HashMap::new();
    m.insert("code".to_string(), airport.code.clone().into());
    m.insert("name".to_string(), airport.name.clone().into());
    m.insert("city".to_string(), airport.city.clone().into());
    m.insert("country".to_string(), airport.country.clone().into());
    m.insert("latitude".to_string(), airport.latitude.into());
    m.insert("longitude".to_string(), airport.longitude.into());
    m
}

fn airline_to_map(airline: &AirlineRecord) -> HashMap<String, BoltType> {
    let mut m: HashMap<String, BoltType> = HashMap::new();
    m.insert("code".to_string(), airline.code.clone().into());
    m.insert("name".to_string(), airline.name.clone().into());
    m.insert("country".to_string(), airline.country.clone().into());
    m
}

fn route_to_map(route: &RouteEdge) -> HashMap<String, BoltType> {
    let mut m: HashMap<String, BoltType> = HashMap::new();
    m.insert("source".to_string(), route.source.clone().into());
    m.insert("destination".to_string(), route.destination.clone().into());
    m.insert("airline".to_string(), route.airline.clone().into());
    m.insert("distance_km".to_string(), route.distance_km.into());
    m.insert(
        "duration_hours".to_string(),
        route.duration_hours.unwrap_or(NO_DURATION).into(),
    );
    m
}

async fn run_batches(
    store: &dyn BatchUpsert,
    cypher: &str,
    maps: Vec<HashMap<String, BoltType>>,
) -> ApiResult<usize> {
    let mut total = 0;
    for chunk in maps.chunks(BATCH_SIZE) {
        total += store.upsert_batch(cypher, chunk.to_vec()).await?;
    }
    Ok(total)
}

/// Merge a normalized dataset into the graph in bounded-size batches.
/// Returns counts of records actually upserted; the three record kinds
/// are loaded independently and a failure part-way through leaves earlier
/// kinds in place.
pub async fn load(store: &dyn BatchUpsert, dataset: &NormalizedDataset) -> ApiResult<IngestSummary> {
    let airports = run_batches(
        store,
        UPSERT_AIRPORTS,
        dataset.airports.iter().map(airport_to_map).collect(),
    )
    .await?;

    let airlines = run_batches(
        store,
        UPSERT_AIRLINES,
        dataset.airlines.iter().map(airline_to_map).collect(),
    )
    .await?;

    let routes = run_batches(
        store,
        UPSERT_ROUTES,
        dataset.routes.iter().map(route_to_map).collect(),
    )
    .await?;

    tracing::info!(
        "Ingest complete: {} airports, {} airlines, {} routes",
        airports,
        airlines,
        routes
    );

    Ok(IngestSummary {
        airports,
        airlines,
        routes,
    })
}
