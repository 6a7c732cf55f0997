use crate::aircraft::Aircraft;
use crate::airport::{Airport, AirportRegistry};
use crate::client::{Client, ClientId};
use crate::error::AirlineError;
use crate::fare::FareEngine;
use crate::flight::Flight;
use crate::route::{Route, RouteCode};
use crate::ticket::{Ticket, TicketCode, TicketRegistry};
use crate::time::FlightDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// The aggregate root: owns every airport, aircraft, route, flight and
/// client, together with the registries that keep airport and ticket codes
/// unique.
#[derive(Debug, Default)]
pub struct Airline {
    airports: AirportRegistry,
    aircraft: Vec<Arc<Aircraft>>,
    routes: BTreeMap<RouteCode, Arc<Route>>,
    flights: Vec<Flight>,
    clients: BTreeMap<ClientId, Client>,
    tickets: TicketRegistry,
}

impl Airline {
    pub fn new() -> Airline {
        Airline::default()
    }

    pub fn create_airport(
        &mut self,
        name: &str,
        code: &str,
        city: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Arc<Airport>, AirlineError> {
        self.airports.create(name, code, city, latitude, longitude)
    }

    /// Registers an airport record, or returns the known airport with the
    /// same code if both records agree.
    pub fn resolve_airport(&mut self, airport: Airport) -> Result<Arc<Airport>, AirlineError> {
        self.airports.resolve(airport)
    }

    pub fn airports(&self) -> &AirportRegistry {
        &self.airports
    }

    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Arc<Aircraft> {
        let aircraft = Arc::new(aircraft);
        self.aircraft.push(aircraft.clone());
        aircraft
    }

    pub fn aircraft(&self) -> &[Arc<Aircraft>] {
        &self.aircraft
    }

    pub fn aircraft_named(&self, name: &str) -> Option<&Arc<Aircraft>> {
        self.aircraft.iter().find(|a| &*a.name == name)
    }

    pub fn add_route(&mut self, route: Route) -> Result<Arc<Route>, AirlineError> {
        if self.routes.contains_key(&route.code) {
            return Err(AirlineError::DuplicateRoute(route.code));
        }
        let route = Arc::new(route);
        self.routes.insert(route.code.clone(), route.clone());
        Ok(route)
    }

    pub fn route(&self, code: &str) -> Option<&Arc<Route>> {
        self.routes.get(code)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.values()
    }

    pub fn add_client(&mut self, client: Client) -> Result<(), AirlineError> {
        if self.clients.contains_key(client.id()) {
            return Err(AirlineError::DuplicateClient(client.id().clone()));
        }
        self.clients.insert(client.id().clone(), client);
        Ok(())
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn flight(&self, route_code: &str, date: &FlightDate) -> Option<&Flight> {
        self.flight_index(route_code, date).map(|i| &self.flights[i])
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.flights.iter().flat_map(|f| f.tickets())
    }

    pub fn ticket_registry(&self) -> &TicketRegistry {
        &self.tickets
    }

    fn flight_index(&self, route_code: &str, date: &FlightDate) -> Option<usize> {
        self.flights
            .iter()
            .position(|f| &*f.route().code == route_code && f.date() == date)
    }

    pub fn schedule_flight(
        &mut self,
        date: &str,
        route_code: &str,
        aircraft_name: &str,
    ) -> Result<(), AirlineError> {
        let date = FlightDate::parse(date)?;
        let route = self
            .route(route_code)
            .cloned()
            .ok_or_else(|| AirlineError::UnknownRoute(Arc::from(route_code)))?;
        let aircraft = self
            .aircraft_named(aircraft_name)
            .cloned()
            .ok_or_else(|| AirlineError::UnknownAircraft(Arc::from(aircraft_name)))?;

        if self
            .flights
            .iter()
            .any(|f| f.aircraft().name == aircraft.name && *f.date() == date)
        {
            return Err(AirlineError::DuplicateSchedule {
                aircraft: aircraft.name.clone(),
                date,
            });
        }

        info!(route = %route.code, %date, aircraft = %aircraft.name, "flight scheduled");
        self.flights.push(Flight::new(route, date, aircraft));
        Ok(())
    }

    /// Sells `quantity` tickets on the flight of `route_code` on `date`,
    /// priced by the season of that date. Returns the total charged.
    pub fn sell_tickets(
        &mut self,
        client_id: &str,
        date: &str,
        route_code: &str,
        quantity: u32,
    ) -> Result<u64, AirlineError> {
        let date = FlightDate::parse(date)?;
        let flight_idx = self.flight_index(route_code, &date);
        let client = self
            .clients
            .get_mut(client_id)
            .ok_or_else(|| AirlineError::UnknownClient(Arc::from(client_id)))?;
        let flight_idx = flight_idx.ok_or_else(|| AirlineError::UnknownFlight {
            route: Arc::from(route_code),
            date: date.clone(),
        })?;

        let fare_engine = FareEngine::for_date(&date);
        let total = self.flights[flight_idx].sell(client, fare_engine, quantity, &mut self.tickets)?;
        info!(client = client_id, route = route_code, %date, quantity, total, "tickets sold");
        Ok(total)
    }

    /// Sum of the fares of the client's unused tickets. Unknown clients owe
    /// nothing.
    pub fn pending_balance(&self, client_id: &str) -> u64 {
        self.tickets()
            .filter(|t| &*t.client == client_id && !t.is_used())
            .map(|t| t.fare)
            .sum()
    }

    /// Marks the client's tickets on one flight as used. Returns the number
    /// of tickets that changed state.
    pub fn mark_used(
        &mut self,
        client_id: &str,
        date: &str,
        route_code: &str,
    ) -> Result<usize, AirlineError> {
        let date = FlightDate::parse(date)?;
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| AirlineError::UnknownClient(Arc::from(client_id)))?;
        let flight_idx = self.flight_index(route_code, &date).ok_or_else(|| {
            AirlineError::UnknownFlight {
                route: Arc::from(route_code),
                date: date.clone(),
            }
        })?;

        let key = self.flights[flight_idx].key();
        let codes: Vec<TicketCode> = client.tickets_on(&key).cloned().collect();
        let changed = self.flights[flight_idx].mark_used(client.id(), &codes);
        debug!(client = client_id, flight = %key, changed, "tickets marked used");
        Ok(changed)
    }

    /// Records a flight as flown: every holder's tickets on it become used.
    /// Returns the number of tickets that changed state, so completing the
    /// same flight twice returns 0 the second time.
    pub fn complete_flight(&mut self, date: &str, route_code: &str) -> Result<usize, AirlineError> {
        let date = FlightDate::parse(date)?;
        let flight_idx = self.flight_index(route_code, &date).ok_or_else(|| {
            AirlineError::UnknownFlight {
                route: Arc::from(route_code),
                date: date.clone(),
            }
        })?;

        let flight = &mut self.flights[flight_idx];
        let key = flight.key();
        let mut changed = 0;
        for holder in flight.holders() {
            if let Some(client) = self.clients.get(&holder) {
                let codes: Vec<TicketCode> = client.tickets_on(&key).cloned().collect();
                changed += flight.mark_used(&holder, &codes);
            }
        }
        info!(flight = %key, changed, "flight completed");
        Ok(changed)
    }

    /// Attaches a ticket restored from storage to its flight and its
    /// client, registering its code.
    pub(crate) fn restore_ticket(&mut self, ticket: Ticket) -> Result<(), AirlineError> {
        let flight_idx = self
            .flights
            .iter()
            .position(|f| f.key() == ticket.flight)
            .ok_or_else(|| AirlineError::UnknownFlight {
                route: ticket.flight.route.clone(),
                date: ticket.flight.date.clone(),
            })?;
        let client = self
            .clients
            .get_mut(&ticket.client)
            .ok_or_else(|| AirlineError::UnknownClient(ticket.client.clone()))?;
        if !self.tickets.register_existing(&ticket) {
            return Err(AirlineError::DuplicateTicket(ticket.code));
        }

        client.add_ticket(&ticket);
        self.flights[flight_idx].attach(ticket);
        Ok(())
    }

    #[cfg(test)]
    pub fn flight_by_key(&self, key: &crate::flight::FlightKey) -> Option<&Flight> {
        self.flights.iter().find(|f| f.key() == *key)
    }
}
