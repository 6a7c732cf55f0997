//! Loading and saving an airline.
//!
//! The airline is stored in two files: the infrastructure (aircraft, routes
//! with their airports, scheduled flights) and the sales (clients and the
//! tickets they hold). Tickets can only be loaded once the infrastructure
//! they point at is in place.

pub mod error;
pub mod json;

use crate::airline::Airline;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub use error::{EntityKind, PersistenceError};
pub use json::JsonPersistence;

pub trait AirlinePersistence {
    /// Adds aircraft and routes, then schedules the stored flights.
    fn load_infrastructure(
        &self,
        source: &mut dyn Read,
        airline: &mut Airline,
    ) -> Result<(), PersistenceError>;

    fn save_infrastructure(&self, sink: &mut dyn Write, airline: &Airline)
        -> Result<(), PersistenceError>;

    /// Adds clients, then attaches each stored ticket to its flight and
    /// client. Every reference must resolve against what is already loaded.
    fn load_tickets_and_clients(
        &self,
        source: &mut dyn Read,
        airline: &mut Airline,
    ) -> Result<(), PersistenceError>;

    fn save_tickets_and_clients(
        &self,
        sink: &mut dyn Write,
        airline: &Airline,
    ) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
}

impl FileFormat {
    pub fn persistence(self) -> Box<dyn AirlinePersistence> {
        match self {
            FileFormat::Json => Box::new(JsonPersistence),
        }
    }
}

impl FromStr for FileFormat {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FileFormat::Json),
            _ => Err(PersistenceError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl Airline {
    pub fn load_infrastructure_file(
        &mut self,
        path: &Path,
        format: FileFormat,
    ) -> Result<(), PersistenceError> {
        let mut source = BufReader::new(File::open(path)?);
        format.persistence().load_infrastructure(&mut source, self)?;
        info!(
            path = %path.display(),
            aircraft = self.aircraft().len(),
            routes = self.routes().count(),
            flights = self.flights().len(),
            "infrastructure loaded"
        );
        Ok(())
    }

    pub fn save_infrastructure_file(
        &self,
        path: &Path,
        format: FileFormat,
    ) -> Result<(), PersistenceError> {
        let mut sink = BufWriter::new(File::create(path)?);
        format.persistence().save_infrastructure(&mut sink, self)?;
        sink.flush()?;
        info!(path = %path.display(), "infrastructure saved");
        Ok(())
    }

    pub fn load_tickets_file(
        &mut self,
        path: &Path,
        format: FileFormat,
    ) -> Result<(), PersistenceError> {
        let mut source = BufReader::new(File::open(path)?);
        format.persistence().load_tickets_and_clients(&mut source, self)?;
        info!(
            path = %path.display(),
            clients = self.clients().count(),
            tickets = self.tickets().count(),
            "tickets loaded"
        );
        Ok(())
    }

    pub fn save_tickets_file(&self, path: &Path, format: FileFormat) -> Result<(), PersistenceError> {
        let mut sink = BufWriter::new(File::create(path)?);
        format.persistence().save_tickets_and_clients(&mut sink, self)?;
        sink.flush()?;
        info!(path = %path.display(), "tickets saved");
        Ok(())
    }
}
