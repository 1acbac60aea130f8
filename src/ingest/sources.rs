use crate::errors::ApiResult;
use crate::models::{AirlineRecord, AirportRecord, RouteEdge};

use super::normalize::{AirlineColumns, AirportColumns, RawRow, RouteColumns};
use super::NormalizedDataset;

pub const AIRPORTS_URL: &str =
    "https://raw.githubusercontent.com/datasets/airport-codes/master/data/airport-codes.csv";
pub const ROUTES_URL: &str =
    "https://gist.githubusercontent.com/XimenesJu/23ff54741a6f183b2c7e367d003dcc69/raw/13e519574832172b538fd5588673132cb826cd20/routes.csv";
pub const AIRLINES_BASE_URL: &str =
    "https://gist.githubusercontent.com/XimenesJu/23ff54741a6f183b2c7e367d003dcc69/raw/2697297ee7ae3eed7c679f7d1f195c1f502aa11b/Airlines_Unicas.csv";
pub const AIRLINES_INFO_URL: &str =
    "https://gist.githubusercontent.com/XimenesJu/23ff54741a6f183b2c7e367d003dcc69/raw/2697297ee7ae3eed7c679f7d1f195c1f502aa11b/airline_info.csv";

pub const AIRPORT_COLUMNS: AirportColumns = AirportColumns {
    code: "iata_code",
    name: "name",
    city: "municipality",
    country: "iso_country",
    coordinates: "coordinates",
};

// The routes feed ships with a misspelled destination header.
pub const ROUTE_COLUMNS: RouteColumns = RouteColumns {
    source: "source_airport",
    destination: "destination_apirport",
    airline: "airline",
    distance: "distance",
};

pub const AIRLINE_COLUMNS: AirlineColumns = AirlineColumns {
    iata: "IATA",
    icao: "ICAO",
    code: "Code",
    name: "Name",
    alt_name: "Airline",
    country: "Country",
};

/// Fetch a remote CSV resource and surface its rows as header-keyed maps.
pub async fn fetch_rows(client: &reqwest::Client, url: &str) -> ApiResult<Vec<RawRow>> {
    tracing::info!("Fetching dataset from {}", url);

    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_csv(&body)
}

pub fn parse_csv(text: &str) -> ApiResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Embedded fixture set for sample mode; no network fetch involved.
pub fn sample_dataset() -> NormalizedDataset {
    let airports = [
        ("GRU", "Aeroporto Internacional de São Paulo/Guarulhos", "São Paulo", "Brazil"),
        ("CGH", "Aeroporto de Congonhas", "São Paulo", "Brazil"),
        ("GIG", "Aeroporto Internacional do Rio de Janeiro/Galeão", "Rio de Janeiro", "Brazil"),
        ("BSB", "Aeroporto Internacional de Brasília", "Brasília", "Brazil"),
        ("JFK", "John F. Kennedy International Airport", "New York", "USA"),
        ("LAX", "Los Angeles International Airport", "Los Angeles", "USA"),
        ("LHR", "London Heathrow Airport", "London", "UK"),
        ("CDG", "Charles de Gaulle Airport", "Paris", "France"),
        ("NRT", "Narita International Airport", "Tokyo", "Japan"),
        ("DXB", "Dubai International Airport", "Dubai", "UAE"),
    ]
    .iter()
    .map(|(code, name, city, country)| AirportRecord {
        code: code.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        latitude: 0.0,
        longitude: 0.0,
    })
    .collect();

    let airlines = [
        ("LATAM", "LATAM Airlines", "Brazil"),
        ("GOL", "Gol Linhas Aéreas", "Brazil"),
        ("AA", "American Airlines", "USA"),
        ("BA", "British Airways", "UK"),
        ("EK", "Emirates", "UAE"),
    ]
    .iter()
    .map(|(code, name, country)| AirlineRecord {
        code: code.to_string(),
        name: name.to_string(),
        country: country.to_string(),
    })
    .collect();

    let routes = [
        ("GRU", "GIG", "LATAM", 365.0, 1.0),
        ("GRU", "BSB", "GOL", 872.0, 1.5),
        ("GRU", "JFK", "LATAM", 7680.0, 10.5),
        ("GIG", "JFK", "AA", 7750.0, 10.0),
        ("GRU", "LHR", "BA", 9450.0, 11.5),
        ("JFK", "LAX", "AA", 3970.0, 5.5),
        ("LHR", "CDG", "BA", 340.0, 1.0),
        ("DXB", "LHR", "EK", 5470.0, 7.0),
        ("NRT", "LAX", "AA", 8800.0, 11.0),
        ("CGH", "GIG", "GOL", 365.0, 1.0),
    ]
    .iter()
    .map(|(source, destination, airline, distance_km, duration_hours)| RouteEdge {
        source: source.to_string(),
        destination: destination.to_string(),
        airline: airline.to_string(),
        distance_km: *distance_km,
        duration_hours: Some(*duration_hours),
    })
    .collect();

    NormalizedDataset {
        airports,
        airlines,
        routes,
    }
}
