use async_trait::async_trait;

use crate::models::{
    Booking, BookingId, Flight, FlightId, NewBooking, NewFlight, NewSearchQuery, SearchQuery,
};
use crate::CoreResult;

/// Flight catalog access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Flights whose departure side matches `origin` and arrival side matches
    /// `destination`. `departure_date` is informational and does not filter.
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
    ) -> CoreResult<Vec<Flight>>;

    async fn all_flights(&self) -> CoreResult<Vec<Flight>>;

    async fn flight_by_id(&self, id: FlightId) -> CoreResult<Option<Flight>>;

    async fn create_flight(&self, flight: NewFlight) -> CoreResult<Flight>;
}

/// Booking ledger access. Callers must check the referenced flight exists
/// before `create_booking`.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: NewBooking) -> CoreResult<Booking>;

    async fn booking_by_id(&self, id: BookingId) -> CoreResult<Option<Booking>>;

    async fn booking_by_confirmation(&self, code: &str) -> CoreResult<Option<Booking>>;

    async fn booking_count(&self) -> CoreResult<usize>;
}

/// Write-only audit trail of search requests
#[async_trait]
pub trait SearchLogRepository: Send + Sync {
    async fn save_search_query(&self, query: NewSearchQuery) -> CoreResult<SearchQuery>;
}
