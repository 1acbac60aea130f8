use serde::{Deserialize, Serialize};

/// Airport node, keyed by its 3-letter IATA code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Airline node, keyed by the resolved carrier code (IATA, then ICAO,
/// then the generic Code column, falling back to "Unknown").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirlineRecord {
    pub code: String,
    pub name: String,
    pub country: String,
}

/// Directed ROUTE edge, keyed by (source, destination, airline).
/// Both endpoints must already exist as Airport nodes or the upsert
/// is silently skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteEdge {
    pub source: String,
    pub destination: String,
    pub airline: String,
    pub distance_km: f64,
    pub duration_hours: Option<f64>,
}
