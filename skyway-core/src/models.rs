use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyway_shared::Money;

pub type FlightId = u32;
pub type BookingId = u32;
pub type SearchQueryId = u32;

pub const DEFAULT_STOPS: u32 = 0;
pub const DEFAULT_AVAILABLE_SEATS: u32 = 100;
pub const DEFAULT_PASSENGERS: u32 = 1;
pub const DEFAULT_TRIP_TYPE: &str = "round-trip";
pub const DEFAULT_CABIN_CLASS: &str = "economy";

// ============================================================================
// Flights
// ============================================================================

/// A catalog entry. Times and duration are display strings, never parsed as
/// calendar values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: FlightId,
    pub flight_number: String,
    pub airline: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: u32,
    pub price: Money,
    pub aircraft: Option<String>,
    pub available_seats: u32,
}

/// Flight data before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    pub flight_number: String,
    pub airline: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: Option<u32>,
    pub price: Money,
    pub aircraft: Option<String>,
    pub available_seats: Option<u32>,
}

impl NewFlight {
    pub fn into_flight(self, id: FlightId) -> Flight {
        Flight {
            id,
            flight_number: self.flight_number,
            airline: self.airline,
            departure_airport: self.departure_airport,
            arrival_airport: self.arrival_airport,
            departure_city: self.departure_city,
            arrival_city: self.arrival_city,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration: self.duration,
            stops: self.stops.unwrap_or(DEFAULT_STOPS),
            price: self.price,
            aircraft: self.aircraft,
            available_seats: self.available_seats.unwrap_or(DEFAULT_AVAILABLE_SEATS),
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub flight_id: FlightId,
    pub passenger_first_name: String,
    pub passenger_last_name: String,
    pub passenger_email: String,
    pub passenger_phone: String,
    pub total_price: Money,
    pub booking_date: DateTime<Utc>,
    pub confirmation_number: String,
}

/// Passenger submission; the store adds id, timestamp and confirmation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub flight_id: FlightId,
    pub passenger_first_name: String,
    pub passenger_last_name: String,
    pub passenger_email: String,
    pub passenger_phone: String,
    pub total_price: Money,
}

impl NewBooking {
    pub fn into_booking(
        self,
        id: BookingId,
        confirmation_number: String,
        booking_date: DateTime<Utc>,
    ) -> Booking {
        Booking {
            id,
            flight_id: self.flight_id,
            passenger_first_name: self.passenger_first_name,
            passenger_last_name: self.passenger_last_name,
            passenger_email: self.passenger_email,
            passenger_phone: self.passenger_phone,
            total_price: self.total_price,
            booking_date,
            confirmation_number,
        }
    }
}

// ============================================================================
// Search audit log
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub id: SearchQueryId,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passengers: u32,
    pub trip_type: String,
    #[serde(rename = "class")]
    pub cabin_class: String,
    pub search_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passengers: Option<u32>,
    pub trip_type: Option<String>,
    pub cabin_class: Option<String>,
}

impl NewSearchQuery {
    pub fn into_record(self, id: SearchQueryId, search_date: DateTime<Utc>) -> SearchQuery {
        SearchQuery {
            id,
            origin: self.origin,
            destination: self.destination,
            departure_date: self.departure_date,
            return_date: self.return_date,
            passengers: self.passengers.unwrap_or(DEFAULT_PASSENGERS),
            trip_type: self
                .trip_type
                .unwrap_or_else(|| DEFAULT_TRIP_TYPE.to_string()),
            cabin_class: self
                .cabin_class
                .unwrap_or_else(|| DEFAULT_CABIN_CLASS.to_string()),
            search_date,
        }
    }
}
