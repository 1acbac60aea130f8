use std::collections::{HashMap, HashSet};

use crate::models::{AirlineRecord, AirportRecord, RouteEdge};

pub type RawRow = HashMap<String, String>;

pub const UNKNOWN: &str = "Unknown";

/// Declarative column mapping for an airport feed.
pub struct AirportColumns {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
    pub coordinates: &'static str,
}

/// Declarative column mapping for a route feed.
pub struct RouteColumns {
    pub source: &'static str,
    pub destination: &'static str,
    pub airline: &'static str,
    pub distance: &'static str,
}

/// Declarative column mapping for an airline feed. Code resolution tries
/// `iata`, `icao`, then `code` in order; name resolution tries `name`
/// then `alt_name`.
pub struct AirlineColumns {
    pub iata: &'static str,
    pub icao: &'static str,
    pub code: &'static str,
    pub name: &'static str,
    pub alt_name: &'static str,
    pub country: &'static str,
}

fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("").trim()
}

/// Trim, uppercase, and accept only codes that are exactly 3 ASCII letters.
pub fn normalize_airport_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code)
    } else {
        None
    }
}

/// Parse a "lon,lat" field into (longitude, latitude).
/// Missing or malformed input yields (0.0, 0.0); never errors.
pub fn parse_coordinates(raw: Option<&str>) -> (f64, f64) {
    let Some(raw) = raw else {
        return (0.0, 0.0);
    };

    let mut parts = raw.splitn(2, ',');
    match (parts.next(), parts.next()) {
        (Some(lon), Some(lat)) => match (lon.trim().parse::<f64>(), lat.trim().parse::<f64>()) {
            (Ok(longitude), Ok(latitude)) => (longitude, latitude),
            _ => (0.0, 0.0),
        },
        _ => (0.0, 0.0),
    }
}

/// Validate and deduplicate airport rows. Rows without a valid 3-letter
/// code are dropped; later duplicates of a code are ignored.
pub fn normalize_airports(rows: &[RawRow], columns: &AirportColumns) -> Vec<AirportRecord> {
    let mut seen = HashSet::new();

    rows.iter()
        .filter_map(|row| {
            let code = normalize_airport_code(field(row, columns.code))?;
            if !seen.insert(code.clone()) {
                return None;
            }

            let (longitude, latitude) =
                parse_coordinates(row.get(columns.coordinates).map(String::as_str));

            Some(AirportRecord {
                code,
                name: field(row, columns.name).to_string(),
                city: field(row, columns.city).to_string(),
                country: field(row, columns.country).to_string(),
                latitude,
                longitude,
            })
        })
        .collect()
}

/// Validate and deduplicate route rows. Endpoint codes go through the same
/// 3-letter validation as airports; an empty airline becomes "Unknown" so
/// the mode-level sentinel filter can decide whether to keep it.
pub fn normalize_routes(rows: &[RawRow], columns: &RouteColumns) -> Vec<RouteEdge> {
    let mut seen = HashSet::new();

    rows.iter()
        .filter_map(|row| {
            let source = normalize_airport_code(field(row, columns.source))?;
            let destination = normalize_airport_code(field(row, columns.destination))?;

            let raw_airline = field(row, columns.airline);
            let airline = if raw_airline.is_empty() {
                UNKNOWN.to_string()
            } else {
                raw_airline.to_string()
            };

            if !seen.insert((source.clone(), destination.clone(), airline.clone())) {
                return None;
            }

            let distance_km = field(row, columns.distance).parse().unwrap_or(0.0);

            Some(RouteEdge {
                source,
                destination,
                airline,
                distance_km,
                duration_hours: None,
            })
        })
        .collect()
}

/// Resolve airline codes and names, drop rows with neither, and
/// deduplicate by resolved code.
pub fn normalize_airlines(rows: &[RawRow], columns: &AirlineColumns) -> Vec<AirlineRecord> {
    let mut seen = HashSet::new();

    rows.iter()
        .filter_map(|row| {
            let code = [columns.iata, columns.icao, columns.code]
                .iter()
                .map(|column| field(row, column))
                .find(|value| !value.is_empty())
                .unwrap_or("");

            let name = [columns.name, columns.alt_name]
                .iter()
                .map(|column| field(row, column))
                .find(|value| !value.is_empty())
                .unwrap_or("");

            if code.is_empty() && name.is_empty() {
                return None;
            }

            let code = if code.is_empty() {
                UNKNOWN.to_string()
            } else {
                code.to_string()
            };
            let name = if name.is_empty() {
                UNKNOWN.to_string()
            } else {
                name.to_string()
            };

            if !seen.insert(code.clone()) {
                return None;
            }

            Some(AirlineRecord {
                code,
                name,
                country: field(row, columns.country).to_string(),
            })
        })
        .collect()
}
