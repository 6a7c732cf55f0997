use crate::airline::Airline;
use crate::client::{Client, CompanySize};
use crate::persistence::FileFormat;
use crate::report::{ClientRow, FlightRow, RouteRow, TicketRow};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tabled::Tabled;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod aircraft;
mod airline;
mod airport;
mod client;
mod error;
mod fare;
mod flight;
mod persistence;
mod report;
mod route;
mod ticket;
mod time;

#[derive(Parser)]
struct Args {
    /// Path to the aircraft, routes and flights file
    #[arg(short, long, value_name = "FILE", default_value = "data/airline.json")]
    airline: PathBuf,

    /// Path to the clients and tickets file
    #[arg(short, long, value_name = "FILE", default_value = "data/tickets.json")]
    tickets: PathBuf,

    /// Data file format
    #[arg(short, long, default_value = "json")]
    format: FileFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,
}

const COMMANDS: &[&str] = &[
    "ls", "client", "schedule", "sell", "balance", "use", "complete", "save", "help", "exit",
];
const LISTINGS: &[&str] = &["flights", "routes", "aircraft", "clients", "tickets"];
const CLIENT_KINDS: &[&str] = &["natural", "corporate"];

/// Completes the word under the cursor: a command name first, then the
/// sub-keyword of `ls` and `client`.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct DeskHelper;

impl Completer for DeskHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        let word = &head[start..];
        let words: Vec<&str> = head[..start].split_whitespace().collect();

        let choices = match words.as_slice() {
            [] => COMMANDS,
            ["ls"] => LISTINGS,
            ["client"] => CLIENT_KINDS,
            _ => &[],
        };
        let candidates = choices
            .iter()
            .filter(|c| c.starts_with(word))
            .map(|c| Pair {
                display: c.to_string(),
                replacement: format!("{c} "),
            })
            .collect();

        Ok((start, candidates))
    }
}

/// Pipes long output through the first pager that starts, or prints it
/// directly when none does.
fn page(content: &str) {
    let pagers: [(&str, &[&str]); 2] = [("less", &["-R"]), ("more", &[])];
    let spawned = pagers.iter().find_map(|(program, args)| {
        Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .spawn()
            .ok()
    });

    let Some(mut pager) = spawned else {
        warn!("no pager available");
        println!("{content}");
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        match stdin.write_all(content.as_bytes()) {
            // quitting the pager early closes the pipe
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                warn!(error = %e, "could not write to pager");
            }
            _ => {}
        }
    }
    if let Err(e) = pager.wait() {
        warn!(error = %e, "pager did not exit cleanly");
    }
}

fn show<T: Tabled>(rows: &[T], empty: &str) {
    if rows.is_empty() {
        println!("{}", empty);
    } else if rows.len() > 20 {
        page(&report::render(rows));
    } else {
        println!("{}", report::render(rows));
    }
}

/// Splits a command line on whitespace, keeping double-quoted words
/// together so names like "Boeing 737" stay one argument.
fn split_args(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

struct Desk {
    airline: Airline,
    airline_path: PathBuf,
    tickets_path: PathBuf,
    format: FileFormat,
}

impl Desk {
    fn open(args: &Args) -> Result<Desk, Box<dyn Error>> {
        let mut airline = Airline::new();
        if exists(&args.airline) {
            airline.load_infrastructure_file(&args.airline, args.format)?;
            if exists(&args.tickets) {
                airline.load_tickets_file(&args.tickets, args.format)?;
            }
        }
        Ok(Desk {
            airline,
            airline_path: args.airline.clone(),
            tickets_path: args.tickets.clone(),
            format: args.format,
        })
    }

    fn save(&self) -> Result<(), Box<dyn Error>> {
        self.airline
            .save_infrastructure_file(&self.airline_path, self.format)?;
        self.airline.save_tickets_file(&self.tickets_path, self.format)?;
        Ok(())
    }

    fn list(&self, what: &str) {
        let airline = &self.airline;
        match what {
            "r" | "routes" => {
                let rows: Vec<RouteRow> = airline.routes().map(|r| RouteRow::from(&**r)).collect();
                show(&rows, "No routes registered.");
            }
            "a" | "aircraft" => {
                let rows: Vec<&aircraft::Aircraft> = airline.aircraft().iter().map(|a| &**a).collect();
                show(&rows, "No aircraft registered.");
            }
            "c" | "clients" => {
                let rows: Vec<ClientRow> = airline.clients().map(|c| ClientRow::new(c, airline)).collect();
                show(&rows, "No clients registered.");
            }
            "t" | "tickets" => {
                let rows: Vec<TicketRow> = airline.tickets().map(TicketRow::from).collect();
                show(&rows, "No tickets sold.");
            }
            _ => {
                let rows: Vec<FlightRow> = airline.flights().iter().map(FlightRow::from).collect();
                show(&rows, "No flights scheduled.");
            }
        }
    }

    fn execute(&mut self, parts: &[String]) -> Result<(), Box<dyn Error>> {
        let args: Vec<&str> = parts.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["ls"] => self.list("f"),
            ["ls", what] => self.list(what),
            ["client", "natural", name] => {
                self.airline.add_client(Client::natural(name))?;
                println!("Registered natural client {}.", name);
            }
            ["client", "corporate", name, size] => {
                let size: CompanySize = size.parse()?;
                self.airline.add_client(Client::corporate(name, size))?;
                println!("Registered {} corporate client {}.", size, name);
            }
            ["client", ..] => {
                println!("Usage: client natural <name> | client corporate <name> <large|medium|small>")
            }
            ["schedule", date, route, aircraft] => {
                self.airline.schedule_flight(date, route, aircraft)?;
                println!("Scheduled {} on {} with {}.", route, date, aircraft);
            }
            ["schedule", ..] => println!("Usage: schedule <date> <route> <aircraft>"),
            ["sell", client, date, route, quantity] => {
                let quantity: u32 = quantity.parse()?;
                let total = self.airline.sell_tickets(client, date, route, quantity)?;
                println!("Sold {} tickets to {} for {}.", quantity, client, total.to_string().bold());
            }
            ["sell", ..] => println!("Usage: sell <client> <date> <route> <quantity>"),
            ["balance", client] => {
                if self.airline.client(client).is_none() {
                    println!("{} is not a registered client.", client);
                } else {
                    println!("Pending balance for {}: {}", client, self.airline.pending_balance(client));
                }
            }
            ["balance", ..] => println!("Usage: balance <client>"),
            ["use", client, date, route] => {
                let changed = self.airline.mark_used(client, date, route)?;
                println!("Marked {} tickets as used.", changed);
            }
            ["use", ..] => println!("Usage: use <client> <date> <route>"),
            ["complete", date, route] => {
                let changed = self.airline.complete_flight(date, route)?;
                println!("Flight completed. {} tickets marked as used.", changed);
            }
            ["complete", ..] => println!("Usage: complete <date> <route>"),
            ["save"] => {
                self.save()?;
                println!(
                    "Saved to {} and {}.",
                    self.airline_path.display(),
                    self.tickets_path.display()
                );
            }
            ["help"] | ["?"] => print_help(),
            [cmd, ..] => println!("Unknown command: {}", cmd),
            [] => {}
        }
        Ok(())
    }
}

fn exists(path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    warn!(path = %path.display(), "data file not found, starting without it");
    false
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls [what]                      - List flights, or r - routes, a - aircraft, c - clients, t - tickets");
    println!("  client natural <name>          - Register a natural client");
    println!("  client corporate <name> <size> - Register a corporate client (large, medium, small)");
    println!("  schedule <date> <route> <ac>   - Schedule route <route> on <date> (YYYY-MM-DD) with aircraft <ac>");
    println!("  sell <client> <date> <route> <n> - Sell <n> tickets on a flight");
    println!("  balance <client>               - Show the fares of a client's unused tickets");
    println!("  use <client> <date> <route>    - Mark a client's tickets on a flight as used");
    println!("  complete <date> <route>        - Mark every ticket on a flight as used");
    println!("  save                           - Write both data files");
    println!("  help / ?                       - Show this help menu");
    println!("  exit / quit                    - Exit the desk\n");
    println!("Quote names that contain spaces, e.g. schedule 2024-12-24 4558 \"Boeing 737\"\n");
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut desk = Desk::open(&args)?;
    println!(
        "Desk open. {} routes, {} flights, {} clients loaded from {}",
        desk.airline.routes().count(),
        desk.airline.flights().len(),
        desk.airline.clients().count(),
        args.airline.display()
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(DeskHelper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts = split_args(trimmed);
                if matches!(parts.first().map(String::as_str), Some("exit" | "quit")) {
                    break;
                }
                if let Err(e) = desk.execute(&parts) {
                    println!("{} {}", "Error:".red().bold(), e);
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args_keeps_quoted_names() {
        assert_eq!(
            vec!["schedule", "2024-12-24", "4558", "Boeing 737"],
            split_args(r#"schedule  2024-12-24 4558 "Boeing 737""#)
        );
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn test_completion_follows_command_words() {
        let history = rustyline::history::DefaultHistory::new();
        let ctx = Context::new(&history);
        let replacements = |line: &str| {
            let (start, found) = DeskHelper.complete(line, line.len(), &ctx).unwrap();
            (start, found.into_iter().map(|p| p.replacement).collect::<Vec<_>>())
        };

        assert_eq!((0, vec!["schedule ".to_string(), "sell ".to_string(), "save ".to_string()]), replacements("s"));
        assert_eq!((3, vec!["routes ".to_string()]), replacements("ls ro"));
        assert_eq!((7, vec!["corporate ".to_string()]), replacements("client c"));
        assert!(replacements("sell Alice 2").1.is_empty());
    }

    #[test]
    fn test_format_flag_parses() {
        let args = Args::try_parse_from(["airline-desk", "--format", "JSON"]).unwrap();
        assert_eq!(FileFormat::Json, args.format);
        assert!(Args::try_parse_from(["airline-desk", "--format", "plain"]).is_err());
    }
}
