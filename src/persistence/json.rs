//! JSON data files.
//!
//! Record types here are the only place that knows the wire layout; domain
//! types never serialize themselves.

use super::{AirlinePersistence, EntityKind, PersistenceError};
use crate::aircraft::Aircraft;
use crate::airline::Airline;
use crate::airport::Airport;
use crate::client::{Client, ClientKind, CompanySize};
use crate::error::AirlineError;
use crate::route::Route;
use crate::ticket::Ticket;
use crate::time::{ClockTime, FlightDate};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct JsonPersistence;

#[derive(Debug, Serialize, Deserialize)]
struct InfrastructureFile {
    #[serde(rename = "aviones")]
    aircraft: Vec<AircraftRecord>,
    #[serde(rename = "rutas")]
    routes: Vec<RouteRecord>,
    #[serde(rename = "vuelos")]
    flights: Vec<FlightRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AircraftRecord {
    #[serde(rename = "nombre")]
    name: Arc<str>,
    #[serde(rename = "capacidad")]
    capacity: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct AirportRecord {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "codigo")]
    code: Arc<str>,
    #[serde(rename = "ciudad")]
    city: String,
    #[serde(rename = "latitud")]
    latitude: f64,
    #[serde(rename = "longitud")]
    longitude: f64,
}

/// Route times are written as strings ("715") but hand-edited files often
/// carry plain numbers.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ClockField {
    Text(String),
    Number(u16),
}

impl ClockField {
    fn parse(&self) -> Result<ClockTime, AirlineError> {
        let time = match self {
            ClockField::Text(text) => text.parse::<ClockTime>()?,
            ClockField::Number(value) => ClockTime::from_hhmm(*value)?,
        };
        Ok(time)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RouteRecord {
    #[serde(rename = "codigo")]
    code: Arc<str>,
    #[serde(rename = "salida")]
    departure: ClockField,
    #[serde(rename = "llegada")]
    arrival: ClockField,
    #[serde(rename = "origen")]
    origin: AirportRecord,
    #[serde(rename = "destino")]
    destination: AirportRecord,
}

#[derive(Debug, Serialize, Deserialize)]
struct FlightRecord {
    #[serde(rename = "fecha")]
    date: String,
    #[serde(rename = "codigoRuta")]
    route: Arc<str>,
    #[serde(rename = "nombreAvion")]
    aircraft: Arc<str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TicketsFile {
    #[serde(rename = "clientes")]
    clients: Vec<ClientRecord>,
    #[serde(rename = "tiquetes")]
    tickets: Vec<TicketRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
struct SizeTier(CompanySize);

impl TryFrom<u8> for SizeTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CompanySize::try_from(value).map(SizeTier)
    }
}

impl From<SizeTier> for u8 {
    fn from(tier: SizeTier) -> Self {
        tier.0.tier()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "tipoCliente")]
enum ClientRecord {
    #[serde(rename = "Natural")]
    Natural {
        #[serde(rename = "nombre")]
        name: Arc<str>,
    },
    #[serde(rename = "Corporativo")]
    Corporate {
        #[serde(rename = "nombreEmpresa")]
        company_name: Arc<str>,
        #[serde(rename = "tamanoEmpresa")]
        size: SizeTier,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct TicketRecord {
    #[serde(rename = "codigoTiquete")]
    code: Arc<str>,
    #[serde(rename = "codigoRuta")]
    route: Arc<str>,
    #[serde(rename = "fecha")]
    date: String,
    #[serde(rename = "tarifa")]
    fare: u64,
    #[serde(rename = "usado")]
    used: bool,
    #[serde(rename = "cliente")]
    client: Arc<str>,
}

impl From<AirportRecord> for Airport {
    fn from(record: AirportRecord) -> Self {
        Airport {
            name: record.name,
            code: record.code,
            city: record.city,
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

impl From<&Airport> for AirportRecord {
    fn from(airport: &Airport) -> Self {
        AirportRecord {
            name: airport.name.clone(),
            code: airport.code.clone(),
            city: airport.city.clone(),
            latitude: airport.latitude,
            longitude: airport.longitude,
        }
    }
}

impl From<ClientRecord> for Client {
    fn from(record: ClientRecord) -> Self {
        match record {
            ClientRecord::Natural { name } => Client::natural(&name),
            ClientRecord::Corporate { company_name, size } => Client::corporate(&company_name, size.0),
        }
    }
}

impl From<&Client> for ClientRecord {
    fn from(client: &Client) -> Self {
        match &client.kind {
            ClientKind::Natural { name } => ClientRecord::Natural { name: name.clone() },
            ClientKind::Corporate { company_name, size } => ClientRecord::Corporate {
                company_name: company_name.clone(),
                size: SizeTier(*size),
            },
        }
    }
}

impl JsonPersistence {
    fn load_route(record: RouteRecord, airline: &mut Airline) -> Result<(), PersistenceError> {
        let departure = record.departure.parse()?;
        let arrival = record.arrival.parse()?;
        let origin = airline.resolve_airport(record.origin.into())?;
        let destination = airline.resolve_airport(record.destination.into())?;
        airline
            .add_route(Route::new(&record.code, origin, destination, departure, arrival))
            .map_err(|e| match e {
                AirlineError::DuplicateRoute(code) => PersistenceError::duplicate(EntityKind::Route, code),
                other => other.into(),
            })?;
        Ok(())
    }

    fn load_flight(record: FlightRecord, airline: &mut Airline) -> Result<(), PersistenceError> {
        airline
            .schedule_flight(&record.date, &record.route, &record.aircraft)
            .map_err(|e| match e {
                AirlineError::UnknownRoute(code) => PersistenceError::missing(EntityKind::Route, code),
                AirlineError::UnknownAircraft(name) => {
                    PersistenceError::missing(EntityKind::Aircraft, name)
                }
                other => other.into(),
            })
    }

    fn load_client(record: ClientRecord, airline: &mut Airline) -> Result<(), PersistenceError> {
        let client = Client::from(record);
        if airline.client(client.id()).is_some() {
            return Err(PersistenceError::duplicate(EntityKind::Client, client.id()));
        }
        airline.add_client(client)?;
        Ok(())
    }

    fn load_ticket(record: TicketRecord, airline: &mut Airline) -> Result<(), PersistenceError> {
        if airline.route(&record.route).is_none() {
            return Err(PersistenceError::missing(EntityKind::Route, &record.route));
        }

        let date = FlightDate::parse(&record.date).map_err(AirlineError::from)?;
        let flight = airline.flight(&record.route, &date).ok_or_else(|| {
            PersistenceError::missing(EntityKind::Flight, format!("{} {}", record.route, date))
        })?;
        let key = flight.key();
        let over_capacity = flight.available_seats() == 0;

        if airline.ticket_registry().is_registered(&record.code) {
            return Err(PersistenceError::duplicate(EntityKind::Ticket, &record.code));
        }
        if airline.client(&record.client).is_none() {
            return Err(PersistenceError::missing(EntityKind::Client, &record.client));
        }

        if over_capacity {
            warn!(flight = %key, code = %record.code, "restored ticket exceeds aircraft capacity");
        }
        let mut ticket = Ticket::new(record.code, key, record.client, record.fare);
        if record.used {
            ticket.mark_used();
        }
        airline.restore_ticket(ticket)?;
        Ok(())
    }
}

impl AirlinePersistence for JsonPersistence {
    fn load_infrastructure(
        &self,
        source: &mut dyn Read,
        airline: &mut Airline,
    ) -> Result<(), PersistenceError> {
        let file: InfrastructureFile = serde_json::from_reader(source)?;

        for record in file.aircraft {
            airline.add_aircraft(Aircraft {
                name: record.name,
                capacity: record.capacity,
            });
        }
        for record in file.routes {
            Self::load_route(record, airline)?;
        }
        for record in file.flights {
            Self::load_flight(record, airline)?;
        }
        debug!(airports = airline.airports().len(), "airports resolved from routes");
        Ok(())
    }

    fn save_infrastructure(
        &self,
        sink: &mut dyn Write,
        airline: &Airline,
    ) -> Result<(), PersistenceError> {
        let file = InfrastructureFile {
            aircraft: airline
                .aircraft()
                .iter()
                .map(|a| AircraftRecord {
                    name: a.name.clone(),
                    capacity: a.capacity,
                })
                .collect(),
            routes: airline
                .routes()
                .map(|r| RouteRecord {
                    code: r.code.clone(),
                    departure: ClockField::Text(r.departure.encoded()),
                    arrival: ClockField::Text(r.arrival.encoded()),
                    origin: AirportRecord::from(&*r.origin),
                    destination: AirportRecord::from(&*r.destination),
                })
                .collect(),
            flights: airline
                .flights()
                .iter()
                .map(|f| FlightRecord {
                    date: f.date().to_string(),
                    route: f.route().code.clone(),
                    aircraft: f.aircraft().name.clone(),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(sink, &file)?;
        Ok(())
    }

    fn load_tickets_and_clients(
        &self,
        source: &mut dyn Read,
        airline: &mut Airline,
    ) -> Result<(), PersistenceError> {
        let file: TicketsFile = serde_json::from_reader(source)?;

        for record in file.clients {
            Self::load_client(record, airline)?;
        }
        for record in file.tickets {
            Self::load_ticket(record, airline)?;
        }
        Ok(())
    }

    fn save_tickets_and_clients(
        &self,
        sink: &mut dyn Write,
        airline: &Airline,
    ) -> Result<(), PersistenceError> {
        let file = TicketsFile {
            clients: airline.clients().map(ClientRecord::from).collect(),
            tickets: airline
                .tickets()
                .map(|t| TicketRecord {
                    code: t.code.clone(),
                    route: t.flight.route.clone(),
                    date: t.flight.date.to_string(),
                    fare: t.fare,
                    used: t.is_used(),
                    client: t.client.clone(),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(sink, &file)?;
        Ok(())
    }
}
