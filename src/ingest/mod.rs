pub mod normalize;
pub mod sources;
pub mod upsert;

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::ApiResult;
use crate::graph_db::Neo4jClient;
use crate::models::{is_sentinel, AirlineRecord, AirportRecord, RouteEdge};

use normalize::{normalize_airlines, normalize_airports, normalize_routes};
use sources::{
    fetch_rows, AIRLINES_BASE_URL, AIRLINES_INFO_URL, AIRLINE_COLUMNS, AIRPORTS_URL,
    AIRPORT_COLUMNS, ROUTES_URL, ROUTE_COLUMNS,
};

/// Dataset selection for an ingestion run. All three modes share one
/// normalization and upsert path; the filter predicate is the only
/// variation point.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestMode {
    /// Embedded fixture set, no network fetch.
    Sample,
    /// Airports filtered to one ISO country, then the route/airline subset
    /// reachable from them.
    Regional(String),
    /// Every validated record from the remote sources.
    Full,
}

impl IngestMode {
    pub fn from_region(region: Option<&str>) -> Self {
        match region {
            None => IngestMode::Sample,
            Some(value) if value.eq_ignore_ascii_case("full") => IngestMode::Full,
            Some(country) => IngestMode::Regional(country.to_ascii_uppercase()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            IngestMode::Sample => "Sample".to_string(),
            IngestMode::Regional(country) => format!("Regional ({})", country),
            IngestMode::Full => "Full".to_string(),
        }
    }

    /// Default policy for routes with a sentinel airline: kept only in
    /// full loads.
    pub fn includes_unknown_airlines(&self) -> bool {
        matches!(self, IngestMode::Full)
    }
}

pub struct IngestOptions {
    pub mode: IngestMode,
    pub clear_existing: bool,
    pub include_unknown_airlines: Option<bool>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct IngestSummary {
    pub airports: usize,
    pub airlines: usize,
    pub routes: usize,
}

/// Validated candidate records ready for batching.
#[derive(Debug, Default)]
pub struct NormalizedDataset {
    pub airports: Vec<AirportRecord>,
    pub airlines: Vec<AirlineRecord>,
    pub routes: Vec<RouteEdge>,
}

/// Run one ingestion pass: optional destructive clear, source selection,
/// filtering, then idempotent batch upserts. The clear is not transactional
/// with the load; a crash in between leaves an empty store.
pub async fn run(graph: &Neo4jClient, options: &IngestOptions) -> ApiResult<IngestSummary> {
    if options.clear_existing {
        tracing::info!("Clearing existing graph data");
        graph.clear_all().await?;
    }

    let dataset = match &options.mode {
        IngestMode::Sample => sources::sample_dataset(),
        _ => fetch_dataset(&options.mode).await?,
    };

    let dataset = prepare_dataset(dataset, options);

    upsert::load(graph, &dataset).await
}

/// Apply the mode's filter predicate and the resolved sentinel-airline
/// policy to a normalized dataset, yielding the records that will be
/// batched. Pure; the only variation point between the three modes.
pub fn prepare_dataset(mut dataset: NormalizedDataset, options: &IngestOptions) -> NormalizedDataset {
    if let IngestMode::Regional(country) = &options.mode {
        apply_region_filter(&mut dataset, country);
    }

    let include_unknown = options
        .include_unknown_airlines
        .unwrap_or_else(|| options.mode.includes_unknown_airlines());
    if !include_unknown {
        dataset.routes.retain(|route| !is_sentinel(&route.airline));
    }

    dataset
}

async fn fetch_dataset(mode: &IngestMode) -> ApiResult<NormalizedDataset> {
    let client = reqwest::Client::new();

    let airports = normalize_airports(&fetch_rows(&client, AIRPORTS_URL).await?, &AIRPORT_COLUMNS);
    let routes = normalize_routes(&fetch_rows(&client, ROUTES_URL).await?, &ROUTE_COLUMNS);

    let mut airline_rows = fetch_rows(&client, AIRLINES_BASE_URL).await?;
    if matches!(mode, IngestMode::Full) {
        airline_rows.extend(fetch_rows(&client, AIRLINES_INFO_URL).await?);
    }
    let airlines = normalize_airlines(&airline_rows, &AIRLINE_COLUMNS);

    tracing::info!(
        "Normalized {} airports, {} airlines, {} routes",
        airports.len(),
        airlines.len(),
        routes.len()
    );

    Ok(NormalizedDataset {
        airports,
        airlines,
        routes,
    })
}

/// Keep airports in the given country, routes touching at least one of
/// them, and airlines referenced by a retained route.
pub fn apply_region_filter(dataset: &mut NormalizedDataset, country: &str) {
    dataset
        .airports
        .retain(|airport| airport.country.eq_ignore_ascii_case(country));

    let codes: HashSet<String> = dataset
        .airports
        .iter()
        .map(|airport| airport.code.clone())
        .collect();
    dataset
        .routes
        .retain(|route| codes.contains(&route.source) || codes.contains(&route.destination));

    let carriers: HashSet<String> = dataset
        .routes
        .iter()
        .map(|route| route.airline.clone())
        .collect();
    dataset
        .airlines
        .retain(|airline| carriers.contains(&airline.code));
}
