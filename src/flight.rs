use crate::aircraft::{Aircraft, AircraftName};
use crate::client::{Client, ClientId};
use crate::error::AirlineError;
use crate::fare::FareEngine;
use crate::route::{Route, RouteCode};
use crate::ticket::{Ticket, TicketRegistry};
use crate::time::FlightDate;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Identity of a flight: the same route flown by the same aircraft on the
/// same date is the same flight, whichever instance holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightKey {
    pub date: FlightDate,
    pub route: RouteCode,
    pub aircraft: AircraftName,
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} ({})", self.route, self.date, self.aircraft)
    }
}

#[derive(Debug, Clone)]
pub struct Flight {
    route: Arc<Route>,
    date: FlightDate,
    aircraft: Arc<Aircraft>,
    tickets: Vec<Ticket>,
}

impl Flight {
    pub fn new(route: Arc<Route>, date: FlightDate, aircraft: Arc<Aircraft>) -> Self {
        Flight {
            route,
            date,
            aircraft,
            tickets: vec![],
        }
    }

    pub fn key(&self) -> FlightKey {
        FlightKey {
            date: self.date.clone(),
            route: self.route.code.clone(),
            aircraft: self.aircraft.name.clone(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn date(&self) -> &FlightDate {
        &self.date
    }

    pub fn aircraft(&self) -> &Aircraft {
        &self.aircraft
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn available_seats(&self) -> u32 {
        let sold = u32::try_from(self.tickets.len()).unwrap_or(u32::MAX);
        self.aircraft.capacity.saturating_sub(sold)
    }

    /// Sells `quantity` seats to `client` at one unit fare and returns the
    /// total charged. Either every seat is issued or none is.
    pub fn sell(
        &mut self,
        client: &mut Client,
        fare_engine: FareEngine,
        quantity: u32,
        registry: &mut TicketRegistry,
    ) -> Result<u64, AirlineError> {
        if quantity == 0 {
            return Err(AirlineError::InvalidQuantity);
        }
        let available = self.available_seats();
        if quantity > available {
            warn!(flight = %self.key(), requested = quantity, available, "sale rejected, flight overbooked");
            return Err(AirlineError::Overbooked {
                flight: self.key(),
                requested: quantity,
                available,
            });
        }

        let unit_fare = fare_engine.calculate_fare(self, client);
        let key = self.key();
        for _ in 0..quantity {
            let ticket = registry.generate(key.clone(), client.id().clone(), unit_fare);
            client.add_ticket(&ticket);
            self.tickets.push(ticket);
        }
        debug!(flight = %key, client = %client.id(), quantity, unit_fare, %fare_engine, "tickets issued");

        Ok(unit_fare * u64::from(quantity))
    }

    /// Adds a ticket restored from storage. Capacity is not enforced here:
    /// persisted state is taken as it was sold.
    pub(crate) fn attach(&mut self, ticket: Ticket) {
        self.tickets.push(ticket);
    }

    /// Marks the given client's tickets with the listed codes as used and
    /// returns how many changed state.
    pub(crate) fn mark_used<'a>(
        &mut self,
        client: &ClientId,
        codes: impl IntoIterator<Item = &'a Arc<str>>,
    ) -> usize {
        let mut changed = 0;
        for code in codes {
            if let Some(ticket) = self
                .tickets
                .iter_mut()
                .find(|t| t.code == *code && t.client == *client)
            {
                if !ticket.is_used() {
                    ticket.mark_used();
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Distinct ticket holders in order of first purchase.
    pub fn holders(&self) -> Vec<ClientId> {
        let mut holders: Vec<ClientId> = vec![];
        for ticket in &self.tickets {
            if !holders.contains(&ticket.client) {
                holders.push(ticket.client.clone());
            }
        }
        holders
    }
}

impl PartialEq for Flight {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && self.route == other.route && self.aircraft == other.aircraft
    }
}
