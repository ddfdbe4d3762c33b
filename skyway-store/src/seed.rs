use skyway_core::NewFlight;
use skyway_shared::Money;

#[allow(clippy::too_many_arguments)]
fn sample(
    flight_number: &str,
    airline: &str,
    (departure_airport, departure_city): (&str, &str),
    (arrival_airport, arrival_city): (&str, &str),
    (departure_time, arrival_time): (&str, &str),
    duration: &str,
    stops: u32,
    price_cents: i64,
    aircraft: &str,
    available_seats: u32,
) -> NewFlight {
    NewFlight {
        flight_number: flight_number.to_string(),
        airline: airline.to_string(),
        departure_airport: departure_airport.to_string(),
        arrival_airport: arrival_airport.to_string(),
        departure_city: departure_city.to_string(),
        arrival_city: arrival_city.to_string(),
        departure_time: departure_time.to_string(),
        arrival_time: arrival_time.to_string(),
        duration: duration.to_string(),
        stops: Some(stops),
        price: Money::from_cents(price_cents),
        aircraft: Some(aircraft.to_string()),
        available_seats: Some(available_seats),
    }
}

/// The fixed demo catalog loaded into a seeded store, in id order.
///
/// B6456 is deliberately a JFK to Miami flight (212.00, 3h 15m) so that
/// New York to Los Angeles resolves to exactly AA1234, DL5678 and UA9012.
pub fn sample_flights() -> Vec<NewFlight> {
    const NYC_JFK: (&str, &str) = ("JFK", "New York");
    const NYC_LGA: (&str, &str) = ("LGA", "New York");
    const NYC_EWR: (&str, &str) = ("EWR", "New York");
    const LAX: (&str, &str) = ("LAX", "Los Angeles");
    const SFO: (&str, &str) = ("SFO", "San Francisco");
    const MIA: (&str, &str) = ("MIA", "Miami");

    vec![
        sample("AA1234", "American Airlines", NYC_JFK, LAX, ("8:45 AM", "11:20 PM"), "5h 35m", 1, 45900, "Boeing 737", 95),
        sample("DL5678", "Delta Airlines", NYC_LGA, LAX, ("6:15 AM", "9:25 AM"), "6h 10m", 0, 38700, "Airbus A320", 120),
        sample("UA9012", "United Airlines", NYC_EWR, LAX, ("2:30 PM", "7:15 PM"), "7h 45m", 1, 52300, "Boeing 777", 88),
        sample("B6456", "JetBlue Airways", NYC_JFK, MIA, ("11:30 AM", "2:45 PM"), "3h 15m", 0, 21200, "Airbus A321", 102),
        sample("AA8765", "American Airlines", NYC_JFK, SFO, ("7:00 AM", "10:30 AM"), "6h 30m", 0, 48600, "Boeing 757", 76),
        sample("DL2345", "Delta Airlines", NYC_LGA, SFO, ("3:15 PM", "6:45 PM"), "6h 30m", 0, 52100, "Airbus A330", 94),
    ]
}
