//! Errors raised by the in-memory airline model.
//!
//! Every variant is returned before any state is touched, so a failed
//! operation leaves the airline exactly as it was.

use crate::aircraft::AircraftName;
use crate::airport::AirportCode;
use crate::client::ClientId;
use crate::flight::FlightKey;
use crate::route::RouteCode;
use crate::ticket::TicketCode;
use crate::time::{FlightDate, TimeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AirlineError {
    #[error("airport {0} is already registered")]
    DuplicateAirport(AirportCode),

    #[error("route {0} already exists")]
    DuplicateRoute(RouteCode),

    #[error("client {0} already exists")]
    DuplicateClient(ClientId),

    #[error("ticket code {0} is already registered")]
    DuplicateTicket(TicketCode),

    #[error("aircraft {aircraft} already has a flight on {date}")]
    DuplicateSchedule {
        aircraft: AircraftName,
        date: FlightDate,
    },

    #[error("route {0} does not exist")]
    UnknownRoute(RouteCode),

    #[error("aircraft {0} does not exist")]
    UnknownAircraft(AircraftName),

    #[error("no flight on route {route} for {date}")]
    UnknownFlight { route: RouteCode, date: FlightDate },

    #[error("client {0} does not exist")]
    UnknownClient(ClientId),

    #[error("flight {flight} is overbooked: {requested} seats requested, {available} available")]
    Overbooked {
        flight: FlightKey,
        requested: u32,
        available: u32,
    },

    #[error("ticket quantity must be at least 1")]
    InvalidQuantity,

    #[error(transparent)]
    Time(#[from] TimeError),
}
