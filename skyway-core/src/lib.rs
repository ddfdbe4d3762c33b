pub mod confirmation;
pub mod models;
pub mod repository;
pub mod search;

pub use confirmation::ConfirmationCodeGenerator;
pub use models::{Booking, BookingId, Flight, FlightId, NewBooking, NewFlight, NewSearchQuery, SearchQuery};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Internal service error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
