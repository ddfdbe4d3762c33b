use std::sync::Arc;
use skyway_core::repository::{BookingRepository, FlightRepository, SearchLogRepository};
use skyway_store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub search_log: Arc<dyn SearchLogRepository>,
}

impl AppState {
    /// All three repositories backed by one store.
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            flights: store.clone(),
            bookings: store.clone(),
            search_log: store,
        }
    }
}
