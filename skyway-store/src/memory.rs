use async_trait::async_trait;
use chrono::Utc;
use skyway_core::repository::{BookingRepository, FlightRepository, SearchLogRepository};
use skyway_core::search::RouteQuery;
use skyway_core::{
    Booking, BookingId, ConfirmationCodeGenerator, CoreError, CoreResult, Flight, FlightId,
    NewBooking, NewFlight, NewSearchQuery, SearchQuery,
};
use skyway_shared::Masked;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::app_config::Config;
use crate::confirmation::RandomCodeGenerator;
use crate::seed;

/// Regeneration budget when a generated confirmation code is already taken.
pub const MAX_CODE_ATTEMPTS: usize = 8;

/// Records keyed by a strictly increasing id starting at 1.
#[derive(Debug)]
struct Collection<T> {
    records: BTreeMap<u32, T>,
    next_id: u32,
}

impl<T> Collection<T> {
    fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Claims the next id and stores the record built for it.
    fn insert_with(&mut self, build: impl FnOnce(u32) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.records.entry(id).or_insert(build(id))
    }

    fn get(&self, id: u32) -> Option<&T> {
        self.records.get(&id)
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug)]
struct BookingLedger {
    bookings: Collection<Booking>,
    by_confirmation: HashMap<String, BookingId>,
}

/// In-memory record store for flights, bookings and the search audit log.
///
/// Each collection has its own lock; id assignment and insertion happen under
/// a single write guard.
pub struct MemoryStore {
    flights: RwLock<Collection<Flight>>,
    bookings: RwLock<BookingLedger>,
    searches: RwLock<Collection<SearchQuery>>,
    codes: Arc<dyn ConfirmationCodeGenerator>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new(codes: Arc<dyn ConfirmationCodeGenerator>) -> Self {
        Self::with_flights(codes, Vec::new())
    }

    /// A store preloaded with the demo catalog.
    pub fn seeded(codes: Arc<dyn ConfirmationCodeGenerator>) -> Self {
        let catalog = seed::sample_flights();
        info!("Seeding store with {} sample flights", catalog.len());
        Self::with_flights(codes, catalog)
    }

    pub fn from_config(config: &Config) -> Self {
        let codes = Arc::new(RandomCodeGenerator::new(
            config.booking.confirmation_prefix.clone(),
        ));
        if config.store.seed_sample_flights {
            Self::seeded(codes)
        } else {
            Self::new(codes)
        }
    }

    fn with_flights(codes: Arc<dyn ConfirmationCodeGenerator>, catalog: Vec<NewFlight>) -> Self {
        let mut flights = Collection::new();
        for new in catalog {
            flights.insert_with(|id| new.into_flight(id));
        }

        Self {
            flights: RwLock::new(flights),
            bookings: RwLock::new(BookingLedger {
                bookings: Collection::new(),
                by_confirmation: HashMap::new(),
            }),
            searches: RwLock::new(Collection::new()),
            codes,
        }
    }

    fn unique_code(&self, ledger: &BookingLedger) -> CoreResult<String> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = self.codes.generate();
            if !ledger.by_confirmation.contains_key(&code) {
                return Ok(code);
            }
            warn!(attempt, "Confirmation code collision, regenerating");
        }
        Err(CoreError::Internal(format!(
            "no unique confirmation code after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
    ) -> CoreResult<Vec<Flight>> {
        let route = RouteQuery::new(origin, destination);
        let flights = self.flights.read().await;
        let matches: Vec<Flight> = flights.values().filter(|f| route.matches(f)).cloned().collect();
        debug!(
            origin,
            destination,
            departure_date,
            matched = matches.len(),
            "Searched flight catalog"
        );
        Ok(matches)
    }

    async fn all_flights(&self) -> CoreResult<Vec<Flight>> {
        Ok(self.flights.read().await.values().cloned().collect())
    }

    async fn flight_by_id(&self, id: FlightId) -> CoreResult<Option<Flight>> {
        Ok(self.flights.read().await.get(id).cloned())
    }

    async fn create_flight(&self, flight: NewFlight) -> CoreResult<Flight> {
        let mut flights = self.flights.write().await;
        let created = flights.insert_with(|id| flight.into_flight(id)).clone();
        info!(id = created.id, flight_number = %created.flight_number, "Flight created");
        Ok(created)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_booking(&self, booking: NewBooking) -> CoreResult<Booking> {
        let mut guard = self.bookings.write().await;
        let ledger = &mut *guard;

        let code = self.unique_code(ledger)?;
        let created = ledger
            .bookings
            .insert_with(|id| booking.into_booking(id, code.clone(), Utc::now()))
            .clone();
        ledger.by_confirmation.insert(code, created.id);

        info!(
            id = created.id,
            flight_id = created.flight_id,
            confirmation = %created.confirmation_number,
            email = %Masked(&created.passenger_email),
            "Booking created"
        );
        Ok(created)
    }

    async fn booking_by_id(&self, id: BookingId) -> CoreResult<Option<Booking>> {
        Ok(self.bookings.read().await.bookings.get(id).cloned())
    }

    async fn booking_by_confirmation(&self, code: &str) -> CoreResult<Option<Booking>> {
        let ledger = self.bookings.read().await;
        Ok(ledger
            .by_confirmation
            .get(code)
            .and_then(|id| ledger.bookings.get(*id))
            .cloned())
    }

    async fn booking_count(&self) -> CoreResult<usize> {
        Ok(self.bookings.read().await.bookings.len())
    }
}

#[async_trait]
impl SearchLogRepository for MemoryStore {
    async fn save_search_query(&self, query: NewSearchQuery) -> CoreResult<SearchQuery> {
        let mut searches = self.searches.write().await;
        let saved = searches.insert_with(|id| query.into_record(id, Utc::now())).clone();
        debug!(id = saved.id, origin = %saved.origin, destination = %saved.destination, "Search logged");
        Ok(saved)
    }
}
