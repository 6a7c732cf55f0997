//! Seasonal fare policy.
//!
//! Both seasons share one formula: the base cost is discounted and truncated
//! to whole currency units, then a 28% tax on the truncated amount is
//! truncated and added. Fares already persisted were produced with exactly
//! this truncation order.

use crate::client::{Client, ClientKind, CompanySize};
use crate::flight::Flight;
use crate::route::Route;
use crate::time::FlightDate;
use std::fmt;

pub const TAX_RATE: f64 = 0.28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareEngine {
    HighSeason,
    LowSeason,
}

impl FareEngine {
    pub const HIGH_SEASON_MONTHS: [u8; 3] = [6, 7, 12];

    const HIGH_SEASON_PER_KM: u64 = 1000;
    const LOW_SEASON_NATURAL_PER_KM: u64 = 600;
    const LOW_SEASON_CORPORATE_PER_KM: u64 = 900;

    pub fn for_date(date: &FlightDate) -> Self {
        if Self::HIGH_SEASON_MONTHS.contains(&date.month()) {
            FareEngine::HighSeason
        } else {
            FareEngine::LowSeason
        }
    }

    pub fn calculate_fare(self, flight: &Flight, client: &Client) -> u64 {
        self.fare_for(flight.route(), &client.kind)
    }

    pub fn fare_for(self, route: &Route, client: &ClientKind) -> u64 {
        let discounted = (self.base_cost(route, client) as f64 * (1.0 - self.discount(client))) as u64;
        discounted + tax(discounted)
    }

    pub fn base_cost(self, route: &Route, client: &ClientKind) -> u64 {
        let per_km = match (self, client) {
            (FareEngine::HighSeason, _) => Self::HIGH_SEASON_PER_KM,
            (FareEngine::LowSeason, ClientKind::Natural { .. }) => Self::LOW_SEASON_NATURAL_PER_KM,
            (FareEngine::LowSeason, ClientKind::Corporate { .. }) => Self::LOW_SEASON_CORPORATE_PER_KM,
        };
        route.distance() * per_km
    }

    pub fn discount(self, client: &ClientKind) -> f64 {
        match (self, client) {
            (FareEngine::HighSeason, _) | (FareEngine::LowSeason, ClientKind::Natural { .. }) => 0.0,
            (FareEngine::LowSeason, ClientKind::Corporate { size, .. }) => match size {
                CompanySize::Large => 0.2,
                CompanySize::Medium => 0.1,
                CompanySize::Small => 0.05,
            },
        }
    }
}

fn tax(amount: u64) -> u64 {
    (amount as f64 * TAX_RATE) as u64
}

impl fmt::Display for FareEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FareEngine::HighSeason => f.write_str("high season"),
            FareEngine::LowSeason => f.write_str("low season"),
        }
    }
}
