use crate::airline::Airline;
use crate::airline::tests::utils::{add_aircraft, add_airport, add_route, sample_airline};
use crate::client::Client;
use crate::error::AirlineError;
use crate::time::FlightDate;
use std::sync::Arc;

#[test]
fn test_schedule_binds_route_and_aircraft() {
    let mut airline = sample_airline();
    airline.schedule_flight("2024-11-05", "S1", "Boeing 737").unwrap();

    let date = FlightDate::parse("2024-11-05").unwrap();
    let flight = airline.flight("S1", &date).unwrap();
    assert_eq!("Boeing 737", &*flight.aircraft().name);
    assert_eq!(75, flight.route().duration());
    assert_eq!(50, flight.available_seats());
    assert!(flight.tickets().is_empty());
}

#[test]
fn test_unknown_route() {
    let mut airline = sample_airline();
    assert_eq!(
        Err(AirlineError::UnknownRoute(Arc::from("X9"))),
        airline.schedule_flight("2024-11-05", "X9", "Boeing 737")
    );
    assert!(airline.flights().is_empty());
}

#[test]
fn test_unknown_aircraft() {
    let mut airline = sample_airline();
    assert_eq!(
        Err(AirlineError::UnknownAircraft(Arc::from("Concorde"))),
        airline.schedule_flight("2024-11-05", "S1", "Concorde")
    );
    assert!(airline.flights().is_empty());
}

#[test]
fn test_aircraft_flies_once_per_date() {
    let mut airline = sample_airline();
    airline.schedule_flight("2024-11-05", "S1", "Boeing 737").unwrap();

    let err = airline
        .schedule_flight("2024-11-05", "L1", "Boeing 737")
        .unwrap_err();
    assert_eq!(
        AirlineError::DuplicateSchedule {
            aircraft: Arc::from("Boeing 737"),
            date: FlightDate::parse("2024-11-05").unwrap(),
        },
        err
    );

    airline.schedule_flight("2024-11-06", "L1", "Boeing 737").unwrap();
    airline.schedule_flight("2024-11-05", "L1", "ATR 72").unwrap();
    assert_eq!(3, airline.flights().len());
}

#[test]
fn test_malformed_date_is_rejected() {
    let mut airline = sample_airline();
    assert!(matches!(
        airline.schedule_flight("05/11/2024", "S1", "Boeing 737"),
        Err(AirlineError::Time(_))
    ));
    assert!(airline.flights().is_empty());
}

#[test]
fn test_route_codes_are_unique() {
    let mut airline = Airline::new();
    add_airport(&mut airline, "AAA", 0.0, 0.0);
    add_airport(&mut airline, "BBB", 1.0, 0.0);
    add_route(&mut airline, "S1", "AAA", "BBB", "715", "830");

    let again = airline.route("S1").unwrap().as_ref().clone();
    assert_eq!(
        Err(AirlineError::DuplicateRoute(Arc::from("S1"))),
        airline.add_route(again).map(|_| ())
    );
    assert_eq!(1, airline.routes().count());
}

#[test]
fn test_airport_codes_are_unique_per_airline() {
    let mut first = Airline::new();
    add_airport(&mut first, "BOG", 4.7, -74.1);
    assert_eq!(
        Err(AirlineError::DuplicateAirport(Arc::from("BOG"))),
        first.create_airport("Other", "BOG", "Elsewhere", 0.0, 0.0).map(|_| ())
    );

    // registries are not shared between airlines
    let mut second = Airline::new();
    add_airport(&mut second, "BOG", 4.7, -74.1);
}

#[test]
fn test_client_ids_are_unique() {
    let mut airline = sample_airline();
    assert_eq!(
        Err(AirlineError::DuplicateClient(Arc::from("Alice"))),
        airline.add_client(Client::natural("Alice"))
    );
    assert_eq!(2, airline.clients().count());
}

#[test]
fn test_aircraft_names_are_not_enforced() {
    let mut airline = sample_airline();
    add_aircraft(&mut airline, "Boeing 737", 180);
    assert_eq!(3, airline.aircraft().len());
    // lookups resolve to the first aircraft with the name
    assert_eq!(50, airline.aircraft_named("Boeing 737").unwrap().capacity);
}
