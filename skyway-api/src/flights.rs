use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skyway_core::search::{Refinement, SortKey};
use skyway_core::{Flight, FlightId, NewFlight, NewSearchQuery};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::Violations;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Raw query string of `GET /api/flights/search`. Everything arrives as text
/// and is checked in [`SearchParams::validate`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub passengers: Option<String>,
    #[serde(rename = "class")]
    pub cabin_class: Option<String>,
    pub trip_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Comma-separated airline names
    pub airlines: Option<String>,
    /// Comma-separated stop counts
    pub stops: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug)]
pub struct ValidatedSearch {
    pub query: NewSearchQuery,
    pub refinement: Refinement,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub flights: Vec<Flight>,
    /// Flights returned after refinement
    pub total: usize,
    /// Flights matching the route before refinement
    pub matched: usize,
}

#[derive(Debug, Serialize)]
pub struct FlightListResponse {
    pub flights: Vec<Flight>,
}

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    pub flight: Flight,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlightRequest {
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
    pub departure_city: Option<String>,
    pub arrival_city: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub stops: Option<u32>,
    #[serde(default, deserialize_with = "crate::validation::amount_text")]
    pub price: Option<String>,
    pub aircraft: Option<String>,
    pub available_seats: Option<u32>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_list(value: Option<String>) -> Vec<String> {
    present(value)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl SearchParams {
    pub fn validate(self) -> Result<ValidatedSearch, AppError> {
        let mut v = Violations::new();

        let origin = v.required("origin", self.origin);
        let destination = v.required("destination", self.destination);
        let departure_date = v.required("departureDate", self.departure_date);

        let passengers = match present(self.passengers) {
            None => None,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => Some(n),
                _ => {
                    v.push("passengers", "passengers must be a whole number of at least 1");
                    None
                }
            },
        };

        let min_price = v.optional_amount("minPrice", self.min_price);
        let max_price = v.optional_amount("maxPrice", self.max_price);
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                v.push("maxPrice", "maxPrice must not be below minPrice");
            }
        }

        let mut stops = Vec::new();
        for item in split_list(self.stops) {
            match item.parse::<u32>() {
                Ok(n) => stops.push(n),
                Err(_) => v.push("stops", format!("`{}` is not a stop count", item)),
            }
        }

        let sort_by = match present(self.sort_by) {
            None => None,
            Some(raw) => match raw.parse::<SortKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    v.push("sortBy", e.to_string());
                    None
                }
            },
        };

        v.finish()?;
        let (Some(origin), Some(destination), Some(departure_date)) =
            (origin, destination, departure_date)
        else {
            return Err(AppError::Internal("search fields missing after validation".to_string()));
        };

        Ok(ValidatedSearch {
            query: NewSearchQuery {
                origin,
                destination,
                departure_date,
                return_date: present(self.return_date),
                passengers,
                trip_type: present(self.trip_type),
                cabin_class: present(self.cabin_class),
            },
            refinement: Refinement {
                min_price,
                max_price,
                airlines: split_list(self.airlines),
                stops,
                sort_by,
            },
        })
    }
}

impl CreateFlightRequest {
    pub fn validate(self) -> Result<NewFlight, AppError> {
        let mut v = Violations::new();

        let flight_number = v.required("flightNumber", self.flight_number);
        let airline = v.required("airline", self.airline);
        let departure_airport = v.required("departureAirport", self.departure_airport);
        let arrival_airport = v.required("arrivalAirport", self.arrival_airport);
        let departure_city = v.required("departureCity", self.departure_city);
        let arrival_city = v.required("arrivalCity", self.arrival_city);
        let departure_time = v.required("departureTime", self.departure_time);
        let arrival_time = v.required("arrivalTime", self.arrival_time);
        let duration = v.required("duration", self.duration);
        let price = v.amount("price", self.price);

        v.finish()?;
        match (
            flight_number,
            airline,
            departure_airport,
            arrival_airport,
            departure_city,
            arrival_city,
            departure_time,
            arrival_time,
            duration,
            price,
        ) {
            (
                Some(flight_number),
                Some(airline),
                Some(departure_airport),
                Some(arrival_airport),
                Some(departure_city),
                Some(arrival_city),
                Some(departure_time),
                Some(arrival_time),
                Some(duration),
                Some(price),
            ) => Ok(NewFlight {
                flight_number,
                airline,
                departure_airport,
                arrival_airport,
                departure_city,
                arrival_city,
                departure_time,
                arrival_time,
                duration,
                stops: self.stops,
                price,
                aircraft: present(self.aircraft),
                available_seats: self.available_seats,
            }),
            _ => Err(AppError::Internal("flight fields missing after validation".to_string())),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/flights/search", get(search_flights))
        .route("/api/flights", get(list_flights).post(create_flight))
        .route("/api/flights/{id}", get(get_flight))
}

/// GET /api/flights/search
/// Logs the search, matches the route, then applies any refinement
async fn search_flights(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(params) = params?;
    let ValidatedSearch { query, refinement } = params.validate()?;

    let logged = state.search_log.save_search_query(query).await?;

    let matched = state
        .flights
        .search_flights(&logged.origin, &logged.destination, &logged.departure_date)
        .await?;
    let matched_count = matched.len();
    let flights = refinement.apply(matched);

    info!(
        search_id = logged.id,
        origin = %logged.origin,
        destination = %logged.destination,
        matched = matched_count,
        returned = flights.len(),
        "Flight search served"
    );

    Ok(Json(SearchResponse {
        total: flights.len(),
        matched: matched_count,
        flights,
    }))
}

/// GET /api/flights
async fn list_flights(State(state): State<AppState>) -> Result<Json<FlightListResponse>, AppError> {
    let flights = state.flights.all_flights().await?;
    Ok(Json(FlightListResponse { flights }))
}

/// GET /api/flights/{id}
async fn get_flight(
    State(state): State<AppState>,
    id: Result<Path<FlightId>, PathRejection>,
) -> Result<Json<FlightResponse>, AppError> {
    let Path(id) = id?;
    debug!(id, "Flight lookup");

    let flight = state
        .flights
        .flight_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    Ok(Json(FlightResponse { flight }))
}

/// POST /api/flights
/// Adds a catalog entry; missing stops/aircraft/seats take store defaults
async fn create_flight(
    State(state): State<AppState>,
    body: Result<Json<CreateFlightRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FlightResponse>), AppError> {
    let Json(req) = body?;
    let new_flight = req.validate()?;
    let flight = state.flights.create_flight(new_flight).await?;
    Ok((StatusCode::CREATED, Json(FlightResponse { flight })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(origin: &str, destination: &str, date: &str) -> SearchParams {
        SearchParams {
            origin: Some(origin.to_string()),
            destination: Some(destination.to_string()),
            departure_date: Some(date.to_string()),
            ..Default::default()
        }
    }

    fn violation_fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(list) => list.into_iter().map(|v| v.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_search_takes_defaults_downstream() {
        let search = params("New York", "Los Angeles", "2025-07-01").validate().unwrap();
        assert_eq!(search.query.passengers, None);
        assert_eq!(search.query.cabin_class, None);
        assert_eq!(search.refinement, Refinement::default());
    }

    #[test]
    fn test_missing_route_fields_reported_together() {
        let err = SearchParams::default().validate().unwrap_err();
        assert_eq!(violation_fields(err), vec!["origin", "destination", "departureDate"]);
    }

    #[test]
    fn test_refinement_parsing() {
        let mut p = params("NYC", "LAX", "2025-07-01");
        p.passengers = Some("2".to_string());
        p.min_price = Some("100".to_string());
        p.max_price = Some("500.50".to_string());
        p.airlines = Some("Delta Airlines, United Airlines,".to_string());
        p.stops = Some("0,1".to_string());
        p.sort_by = Some("duration".to_string());

        let search = p.validate().unwrap();
        assert_eq!(search.query.passengers, Some(2));
        assert_eq!(search.refinement.airlines, vec!["Delta Airlines", "United Airlines"]);
        assert_eq!(search.refinement.stops, vec![0, 1]);
        assert_eq!(search.refinement.sort_by, Some(SortKey::Duration));
        assert_eq!(search.refinement.max_price.map(|m| m.cents()), Some(50050));
    }

    #[test]
    fn test_bad_refinements_rejected() {
        let mut p = params("NYC", "LAX", "2025-07-01");
        p.passengers = Some("zero".to_string());
        p.min_price = Some("300".to_string());
        p.max_price = Some("200".to_string());
        p.stops = Some("none".to_string());
        p.sort_by = Some("cheapest".to_string());

        let err = p.validate().unwrap_err();
        assert_eq!(violation_fields(err), vec!["passengers", "maxPrice", "stops", "sortBy"]);
    }

    #[test]
    fn test_create_flight_requires_core_fields() {
        let err = CreateFlightRequest {
            flight_number: Some("WN1".to_string()),
            price: Some("abc".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        let fields = violation_fields(err);
        assert!(fields.contains(&"airline".to_string()));
        assert!(fields.contains(&"price".to_string()));
        assert!(!fields.contains(&"flightNumber".to_string()));
    }
}
