use serde::{Deserialize, Serialize};
use skyway_shared::Money;
use std::str::FromStr;

use crate::models::Flight;
use crate::CoreError;

/// Origin/destination match: each side is a case-insensitive substring of
/// either the city name or the airport code.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    origin: String,
    destination: String,
}

impl RouteQuery {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_lowercase(),
            destination: destination.to_lowercase(),
        }
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        let departs = contains_folded(&flight.departure_city, &self.origin)
            || contains_folded(&flight.departure_airport, &self.origin);
        let arrives = contains_folded(&flight.arrival_city, &self.destination)
            || contains_folded(&flight.arrival_airport, &self.destination);
        departs && arrives
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Duration,
    Departure,
    Arrival,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "duration" => Ok(SortKey::Duration),
            "departure" => Ok(SortKey::Departure),
            "arrival" => Ok(SortKey::Arrival),
            other => Err(CoreError::Validation(format!(
                "unknown sort key `{}` (expected price, duration, departure or arrival)",
                other
            ))),
        }
    }
}

/// Post-search narrowing and ordering of a result list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refinement {
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    /// Exact airline names; empty admits all.
    pub airlines: Vec<String>,
    /// Accepted stop counts; empty admits all.
    pub stops: Vec<u32>,
    pub sort_by: Option<SortKey>,
}

impl Refinement {
    pub fn admits(&self, flight: &Flight) -> bool {
        if self.min_price.is_some_and(|min| flight.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| flight.price > max) {
            return false;
        }
        if !self.airlines.is_empty() && !self.airlines.iter().any(|a| *a == flight.airline) {
            return false;
        }
        if !self.stops.is_empty() && !self.stops.contains(&flight.stops) {
            return false;
        }
        true
    }

    pub fn apply(&self, flights: Vec<Flight>) -> Vec<Flight> {
        let mut kept: Vec<Flight> = flights.into_iter().filter(|f| self.admits(f)).collect();

        match self.sort_by {
            Some(SortKey::Price) => kept.sort_by_key(|f| f.price),
            Some(SortKey::Duration) => kept.sort_by_key(|f| {
                let minutes = duration_minutes(&f.duration);
                (minutes.is_none(), minutes)
            }),
            Some(SortKey::Departure) => kept.sort_by(|a, b| a.departure_time.cmp(&b.departure_time)),
            Some(SortKey::Arrival) => kept.sort_by(|a, b| a.arrival_time.cmp(&b.arrival_time)),
            None => {}
        }

        kept
    }
}

/// Total minutes of a display duration such as `"5h 35m"`, `"6h"` or `"45m"`.
pub fn duration_minutes(display: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut seen = false;

    for token in display.split_whitespace() {
        let unit = token.chars().last()?;
        let value: u32 = token[..token.len() - unit.len_utf8()].parse().ok()?;
        let minutes = match unit {
            'h' | 'H' => value.checked_mul(60)?,
            'm' | 'M' => value,
            _ => return None,
        };
        total = total.checked_add(minutes)?;
        seen = true;
    }

    seen.then_some(total)
}
