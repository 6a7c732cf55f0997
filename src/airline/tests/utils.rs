use crate::aircraft::Aircraft;
use crate::airline::Airline;
use crate::client::{Client, CompanySize};
use crate::route::Route;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn add_airport(airline: &mut Airline, code: &str, latitude: f64, longitude: f64) {
    airline
        .create_airport(&format!("{code} Airport"), code, code, latitude, longitude)
        .unwrap();
}

pub fn add_route(
    airline: &mut Airline,
    code: &str,
    origin: &str,
    destination: &str,
    departure: &str,
    arrival: &str,
) {
    let origin = airline.airports().get(origin).unwrap().clone();
    let destination = airline.airports().get(destination).unwrap().clone();
    airline
        .add_route(Route::new(
            code,
            origin,
            destination,
            departure.parse().unwrap(),
            arrival.parse().unwrap(),
        ))
        .unwrap();
}

pub fn add_aircraft(airline: &mut Airline, name: &str, capacity: u32) {
    airline.add_aircraft(Aircraft::new(name, capacity));
}

/// Two routes out of AAA:
/// - "S1" to BBB, one degree north (111 km)
/// - "L1" to CCC, 4.4966 degrees north (500 km)
///
/// Aircraft "Boeing 737" (50 seats) and "ATR 72" (2 seats); clients Alice
/// (natural) and Acme (large corporate).
pub fn sample_airline() -> Airline {
    let mut airline = Airline::new();
    add_airport(&mut airline, "AAA", 0.0, 0.0);
    add_airport(&mut airline, "BBB", 1.0, 0.0);
    add_airport(&mut airline, "CCC", 4.4966, 0.0);
    add_route(&mut airline, "S1", "AAA", "BBB", "715", "830");
    add_route(&mut airline, "L1", "AAA", "CCC", "2200", "130");
    add_aircraft(&mut airline, "Boeing 737", 50);
    add_aircraft(&mut airline, "ATR 72", 2);
    airline.add_client(Client::natural("Alice")).unwrap();
    airline
        .add_client(Client::corporate("Acme", CompanySize::Large))
        .unwrap();
    airline
}

pub fn arb_quantity() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), Just(2u32), Just(3u32), 4..20u32]
}

pub fn arb_client() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Alice"), Just("Acme")]
}

pub fn arb_date() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("2024-06-10"), Just("2024-11-05"), Just("2024-12-24")]
}
