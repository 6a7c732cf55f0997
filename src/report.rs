use crate::airline::Airline;
use crate::client::{Client, ClientKind};
use crate::flight::Flight;
use crate::route::Route;
use crate::ticket::Ticket;
use colored::Colorize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct FlightRow {
    date: String,
    route: String,
    #[tabled(rename = "from")]
    origin: String,
    #[tabled(rename = "to")]
    destination: String,
    departure: String,
    aircraft: String,
    sold: usize,
    free: String,
}

impl From<&Flight> for FlightRow {
    fn from(flight: &Flight) -> Self {
        let free = flight.available_seats();
        FlightRow {
            date: flight.date().to_string(),
            route: flight.route().code.to_string(),
            origin: flight.route().origin.code.to_string(),
            destination: flight.route().destination.code.to_string(),
            departure: flight.route().departure.to_string(),
            aircraft: flight.aircraft().name.to_string(),
            sold: flight.tickets().len(),
            free: if free == 0 {
                "full".red().to_string()
            } else {
                free.to_string()
            },
        }
    }
}

#[derive(Tabled)]
pub struct RouteRow {
    code: String,
    #[tabled(rename = "from")]
    origin: String,
    #[tabled(rename = "to")]
    destination: String,
    departure: String,
    arrival: String,
    #[tabled(rename = "minutes")]
    duration: u32,
    #[tabled(rename = "km")]
    distance: u64,
}

impl From<&Route> for RouteRow {
    fn from(route: &Route) -> Self {
        RouteRow {
            code: route.code.to_string(),
            origin: format!("{} ({})", route.origin.code, route.origin.city),
            destination: format!("{} ({})", route.destination.code, route.destination.city),
            departure: route.departure.to_string(),
            arrival: route.arrival.to_string(),
            duration: route.duration(),
            distance: route.distance(),
        }
    }
}

#[derive(Tabled)]
pub struct ClientRow {
    name: String,
    #[tabled(rename = "type")]
    kind: String,
    size: String,
    tickets: usize,
    purchased: u64,
    pending: u64,
}

impl ClientRow {
    pub fn new(client: &Client, airline: &Airline) -> Self {
        let size = match &client.kind {
            ClientKind::Corporate { size, .. } => size.to_string(),
            ClientKind::Natural { .. } => String::new(),
        };
        ClientRow {
            name: client.id().to_string(),
            kind: client.type_label().to_string(),
            size,
            tickets: client.ledger().len(),
            purchased: client.total_purchased(),
            pending: airline.pending_balance(client.id()),
        }
    }
}

#[derive(Tabled)]
pub struct TicketRow {
    code: String,
    date: String,
    route: String,
    client: String,
    fare: u64,
    status: String,
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        TicketRow {
            code: ticket.code.to_string(),
            date: ticket.flight.date.to_string(),
            route: ticket.flight.route.to_string(),
            client: ticket.client.to_string(),
            fare: ticket.fare,
            status: if ticket.is_used() {
                "used".dimmed().to_string()
            } else {
                "pending".green().to_string()
            },
        }
    }
}

pub fn render<T: Tabled>(rows: &[T]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Aircraft;
    use crate::client::CompanySize;

    fn airline() -> Airline {
        let mut airline = Airline::new();
        let bog = airline
            .create_airport("El Dorado", "BOG", "Bogota", 4.70159, -74.1469)
            .unwrap();
        let mde = airline
            .create_airport("Jose Maria Cordova", "MDE", "Medellin", 6.16454, -75.4231)
            .unwrap();
        airline
            .add_route(Route::new("4558", bog, mde, "715".parse().unwrap(), "830".parse().unwrap()))
            .unwrap();
        airline.add_aircraft(Aircraft::new("ATR 72", 1));
        airline
            .add_client(Client::corporate("Acme", CompanySize::Medium))
            .unwrap();
        airline.schedule_flight("2024-11-05", "4558", "ATR 72").unwrap();
        airline.sell_tickets("Acme", "2024-11-05", "4558", 1).unwrap();
        airline
    }

    #[test]
    fn test_tables_show_domain_values() {
        colored::control::set_override(false);
        let airline = airline();

        let flights: Vec<FlightRow> = airline.flights().iter().map(FlightRow::from).collect();
        let rendered = render(&flights);
        assert!(rendered.contains("2024-11-05"));
        assert!(rendered.contains("07:15"));
        assert!(rendered.contains("full"));

        let routes: Vec<RouteRow> = airline.routes().map(|r| RouteRow::from(&**r)).collect();
        assert!(render(&routes).contains("BOG (Bogota)"));

        let clients: Vec<ClientRow> = airline.clients().map(|c| ClientRow::new(c, &airline)).collect();
        let rendered = render(&clients);
        assert!(rendered.contains("Corporativo"));
        assert!(rendered.contains("medium"));

        let tickets: Vec<TicketRow> = airline.tickets().map(TicketRow::from).collect();
        assert!(render(&tickets).contains("pending"));
    }
}
