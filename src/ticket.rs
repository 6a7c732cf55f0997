use crate::client::ClientId;
use crate::flight::FlightKey;
use std::collections::HashSet;
use std::sync::Arc;

pub type TicketCode = Arc<str>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub code: TicketCode,
    pub flight: FlightKey,
    pub client: ClientId,
    pub fare: u64,
    used: bool,
}

impl Ticket {
    pub fn new(code: TicketCode, flight: FlightKey, client: ClientId, fare: u64) -> Self {
        Ticket {
            code,
            flight,
            client,
            fare,
            used: false,
        }
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }
}

/// Issues ticket codes and remembers every code it has seen, issued or
/// restored, so no two tickets ever share one.
#[derive(Debug, Default)]
pub struct TicketRegistry {
    codes: HashSet<TicketCode>,
    counter: u64,
}

impl TicketRegistry {
    pub fn generate(&mut self, flight: FlightKey, client: ClientId, fare: u64) -> Ticket {
        let code = self.next_code();
        self.codes.insert(code.clone());
        Ticket::new(code, flight, client, fare)
    }

    /// Records the code of a ticket restored from storage. Returns `false`
    /// when the code was already known.
    pub fn register_existing(&mut self, ticket: &Ticket) -> bool {
        self.codes.insert(ticket.code.clone())
    }

    pub fn is_registered(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    // restored codes may sit ahead of the counter, skip over them
    fn next_code(&mut self) -> TicketCode {
        loop {
            self.counter += 1;
            let candidate = self.counter.to_string();
            if !self.codes.contains(candidate.as_str()) {
                return Arc::from(candidate);
            }
        }
    }
}
