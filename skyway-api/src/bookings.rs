use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skyway_core::{Booking, BookingId, Flight, FlightId, NewBooking};
use skyway_shared::Masked;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::Violations;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub flight_id: Option<i64>,
    pub passenger_first_name: Option<String>,
    pub passenger_last_name: Option<String>,
    pub passenger_email: Option<String>,
    pub passenger_phone: Option<String>,
    #[serde(default, deserialize_with = "crate::validation::amount_text")]
    pub total_price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: Booking,
}

#[derive(Debug, Serialize)]
pub struct BookingWithFlightResponse {
    pub booking: Booking,
    pub flight: Flight,
}

impl CreateBookingRequest {
    pub fn validate(self) -> Result<NewBooking, AppError> {
        let mut v = Violations::new();

        let flight_id = match self.flight_id {
            None => {
                v.push("flightId", "flightId is required");
                None
            }
            Some(raw) => match FlightId::try_from(raw) {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    v.push("flightId", "flightId must be a positive integer");
                    None
                }
            },
        };
        let first_name = v.min_chars(
            "passengerFirstName",
            self.passenger_first_name,
            2,
            "First name must be at least 2 characters",
        );
        let last_name = v.min_chars(
            "passengerLastName",
            self.passenger_last_name,
            2,
            "Last name must be at least 2 characters",
        );
        let email = v.email("passengerEmail", self.passenger_email);
        let phone = v.min_chars(
            "passengerPhone",
            self.passenger_phone,
            10,
            "Please enter a valid phone number",
        );
        let total_price = v.amount("totalPrice", self.total_price);

        v.finish()?;
        match (flight_id, first_name, last_name, email, phone, total_price) {
            (Some(flight_id), Some(first), Some(last), Some(email), Some(phone), Some(total)) => {
                Ok(NewBooking {
                    flight_id,
                    passenger_first_name: first,
                    passenger_last_name: last,
                    passenger_email: email,
                    passenger_phone: phone,
                    total_price: total,
                })
            }
            _ => Err(AppError::Internal("booking fields missing after validation".to_string())),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{confirmation}", get(get_booking_by_confirmation))
        .route("/api/bookings/id/{id}", get(get_booking_by_id))
}

/// POST /api/bookings
/// The flight must exist before the store is asked to book it
async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let Json(req) = body?;
    let new_booking = req.validate()?;

    if state.flights.flight_by_id(new_booking.flight_id).await?.is_none() {
        warn!(flight_id = new_booking.flight_id, "Booking rejected: unknown flight");
        return Err(AppError::NotFound("Flight not found".to_string()));
    }

    let booking = state.bookings.create_booking(new_booking).await?;

    info!(
        confirmation = %booking.confirmation_number,
        phone = %Masked(&booking.passenger_phone),
        "Booking confirmed"
    );

    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

/// GET /api/bookings/{confirmation}
/// Booking plus the flight it references
async fn get_booking_by_confirmation(
    State(state): State<AppState>,
    confirmation: Result<Path<String>, PathRejection>,
) -> Result<Json<BookingWithFlightResponse>, AppError> {
    let Path(confirmation) = confirmation?;
    let booking = state
        .bookings
        .booking_by_confirmation(&confirmation)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    // Flights are never removed, so a dangling reference is a broken invariant.
    let flight = state.flights.flight_by_id(booking.flight_id).await?.ok_or_else(|| {
        AppError::Internal(format!(
            "booking {} references missing flight {}",
            booking.id, booking.flight_id
        ))
    })?;

    Ok(Json(BookingWithFlightResponse { booking, flight }))
}

/// GET /api/bookings/id/{id}
async fn get_booking_by_id(
    State(state): State<AppState>,
    id: Result<Path<BookingId>, PathRejection>,
) -> Result<Json<BookingResponse>, AppError> {
    let Path(id) = id?;
    let booking = state
        .bookings
        .booking_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    Ok(Json(BookingResponse { booking }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateBookingRequest {
        CreateBookingRequest {
            flight_id: Some(1),
            passenger_first_name: Some("Jo".to_string()),
            passenger_last_name: Some("Li".to_string()),
            passenger_email: Some("jo.li@example.com".to_string()),
            passenger_phone: Some("5550100199".to_string()),
            total_price: Some("459.00".to_string()),
        }
    }

    #[test]
    fn test_valid_booking_passes() {
        let booking = valid().validate().unwrap();
        assert_eq!(booking.flight_id, 1);
        assert_eq!(booking.total_price.cents(), 45900);
    }

    #[test]
    fn test_field_rules() {
        let req = CreateBookingRequest {
            flight_id: Some(-4),
            passenger_first_name: Some("J".to_string()),
            passenger_last_name: None,
            passenger_email: Some("not-an-email".to_string()),
            passenger_phone: Some("555-0100".to_string()),
            total_price: Some("4.599".to_string()),
        };

        match req.validate() {
            Err(AppError::Validation(list)) => {
                let fields: Vec<&str> = list.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec![
                        "flightId",
                        "passengerFirstName",
                        "passengerLastName",
                        "passengerEmail",
                        "passengerPhone",
                        "totalPrice"
                    ]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_and_oversized_flight_ids_rejected() {
        for id in [0, i64::from(u32::MAX) + 1] {
            let mut req = valid();
            req.flight_id = Some(id);
            assert!(matches!(req.validate(), Err(AppError::Validation(_))));
        }
    }
}
