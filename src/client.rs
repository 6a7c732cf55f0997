use crate::flight::FlightKey;
use crate::ticket::{Ticket, TicketCode};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub type ClientId = Arc<str>;

/// Size tier of a corporate client, persisted as 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanySize {
    Large = 1,
    Medium = 2,
    Small = 3,
}

impl CompanySize {
    pub fn tier(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CompanySize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CompanySize::Large),
            2 => Ok(CompanySize::Medium),
            3 => Ok(CompanySize::Small),
            other => Err(format!("unknown company size tier {other}")),
        }
    }
}

impl From<CompanySize> for u8 {
    fn from(size: CompanySize) -> Self {
        size.tier()
    }
}

impl FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "large" | "l" | "1" => Ok(CompanySize::Large),
            "medium" | "m" | "2" => Ok(CompanySize::Medium),
            "small" | "s" | "3" => Ok(CompanySize::Small),
            _ => Err(format!("unknown company size '{s}', expected large, medium or small")),
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompanySize::Large => "large",
            CompanySize::Medium => "medium",
            CompanySize::Small => "small",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientKind {
    Natural { name: ClientId },
    Corporate { company_name: ClientId, size: CompanySize },
}

/// A purchased ticket as seen from the buyer's side. The ticket itself
/// lives on its flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub code: TicketCode,
    pub flight: FlightKey,
    pub fare: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub kind: ClientKind,
    ledger: Vec<LedgerEntry>,
}

impl Client {
    pub const NATURAL: &'static str = "Natural";
    pub const CORPORATE: &'static str = "Corporativo";

    pub fn natural(name: &str) -> Self {
        Client {
            kind: ClientKind::Natural { name: Arc::from(name) },
            ledger: vec![],
        }
    }

    pub fn corporate(company_name: &str, size: CompanySize) -> Self {
        Client {
            kind: ClientKind::Corporate {
                company_name: Arc::from(company_name),
                size,
            },
            ledger: vec![],
        }
    }

    pub fn id(&self) -> &ClientId {
        match &self.kind {
            ClientKind::Natural { name } => name,
            ClientKind::Corporate { company_name, .. } => company_name,
        }
    }

    pub fn type_label(&self) -> &'static str {
        match self.kind {
            ClientKind::Natural { .. } => Self::NATURAL,
            ClientKind::Corporate { .. } => Self::CORPORATE,
        }
    }

    pub fn add_ticket(&mut self, ticket: &Ticket) {
        self.ledger.push(LedgerEntry {
            code: ticket.code.clone(),
            flight: ticket.flight.clone(),
            fare: ticket.fare,
        });
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    pub fn total_purchased(&self) -> u64 {
        self.ledger.iter().map(|e| e.fare).sum()
    }

    /// Codes of this client's tickets on the given flight.
    pub fn tickets_on<'a>(&'a self, flight: &'a FlightKey) -> impl Iterator<Item = &'a TicketCode> {
        self.ledger
            .iter()
            .filter(move |e| e.flight == *flight)
            .map(|e| &e.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FlightDate;

    fn key(date: &str) -> FlightKey {
        FlightKey {
            date: FlightDate::parse(date).unwrap(),
            route: Arc::from("4558"),
            aircraft: Arc::from("Boeing 737"),
        }
    }

    #[test]
    fn test_identifier_per_kind() {
        assert_eq!("Alice", &**Client::natural("Alice").id());
        let acme = Client::corporate("Acme", CompanySize::Medium);
        assert_eq!("Acme", &**acme.id());
        assert_eq!(Client::CORPORATE, acme.type_label());
    }

    #[test]
    fn test_ledger_totals_and_flight_filter() {
        let mut client = Client::natural("Alice");
        client.add_ticket(&Ticket::new(Arc::from("1"), key("2024-11-05"), Arc::from("Alice"), 100));
        client.add_ticket(&Ticket::new(Arc::from("2"), key("2024-11-06"), Arc::from("Alice"), 250));
        client.add_ticket(&Ticket::new(Arc::from("3"), key("2024-11-05"), Arc::from("Alice"), 100));

        assert_eq!(450, client.total_purchased());
        let fifth = key("2024-11-05");
        let on_fifth: Vec<&str> = client.tickets_on(&fifth).map(|c| &**c).collect();
        assert_eq!(vec!["1", "3"], on_fifth);
    }

    #[test]
    fn test_company_size_tiers() {
        assert_eq!(Ok(CompanySize::Large), CompanySize::try_from(1u8));
        assert_eq!(Ok(CompanySize::Small), "small".parse());
        assert!(CompanySize::try_from(4u8).is_err());
        assert_eq!(2u8, u8::from(CompanySize::Medium));
    }
}
