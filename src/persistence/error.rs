//! Load/save error types.

use crate::error::AirlineError;
use std::fmt;
use std::io;

/// Kind of entity a persisted record points at, labelled with the name the
/// data files use for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Aircraft,
    Route,
    Flight,
    Client,
    Ticket,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Aircraft => "avion",
            EntityKind::Route => "ruta",
            EntityKind::Flight => "vuelo",
            EntityKind::Client => "cliente",
            EntityKind::Ticket => "tiquete",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source is not valid JSON or does not have the expected shape
    #[error("malformed data file: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A record references an entity that has not been loaded
    #[error("inconsistent data: unknown {kind} '{key}'")]
    Missing { kind: EntityKind, key: String },

    /// A record reuses a key that is already taken
    #[error("inconsistent data: {kind} '{key}' is already registered")]
    Duplicate { kind: EntityKind, key: String },

    #[error(transparent)]
    Airline(#[from] AirlineError),
}

impl PersistenceError {
    pub fn missing(kind: EntityKind, key: impl fmt::Display) -> Self {
        PersistenceError::Missing {
            kind,
            key: key.to_string(),
        }
    }

    pub fn duplicate(kind: EntityKind, key: impl fmt::Display) -> Self {
        PersistenceError::Duplicate {
            kind,
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PersistenceError::missing(EntityKind::Route, "4558");
        assert_eq!(err.to_string(), "inconsistent data: unknown ruta '4558'");

        let err = PersistenceError::duplicate(EntityKind::Ticket, 17);
        assert_eq!(err.to_string(), "inconsistent data: tiquete '17' is already registered");

        let err = PersistenceError::UnsupportedFormat("PLAIN".into());
        assert_eq!(err.to_string(), "unsupported file format: PLAIN");
    }
}
