use crate::airport::Airport;
use crate::time::ClockTime;
use std::fmt;
use std::sync::Arc;

pub type RouteCode = Arc<str>;

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub code: RouteCode,
    pub origin: Arc<Airport>,
    pub destination: Arc<Airport>,
    pub departure: ClockTime,
    pub arrival: ClockTime,
}

impl Route {
    pub fn new(
        code: &str,
        origin: Arc<Airport>,
        destination: Arc<Airport>,
        departure: ClockTime,
        arrival: ClockTime,
    ) -> Self {
        Route {
            code: Arc::from(code),
            origin,
            destination,
            departure,
            arrival,
        }
    }

    /// Block time in minutes; an arrival earlier than the departure lands
    /// the next day.
    pub fn duration(&self) -> u32 {
        self.arrival - self.departure
    }

    pub fn distance(&self) -> u64 {
        Airport::distance(&self.origin, &self.destination)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.code, self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(code: &str, latitude: f64, longitude: f64) -> Arc<Airport> {
        Arc::new(Airport {
            name: code.to_string(),
            code: Arc::from(code),
            city: code.to_string(),
            latitude,
            longitude,
        })
    }

    fn route(departure: &str, arrival: &str) -> Route {
        Route::new(
            "4558",
            airport("AAA", 0.0, 0.0),
            airport("BBB", 1.0, 0.0),
            departure.parse().unwrap(),
            arrival.parse().unwrap(),
        )
    }

    #[test]
    fn test_same_day_duration() {
        assert_eq!(75, route("715", "830").duration());
    }

    #[test]
    fn test_overnight_duration() {
        assert_eq!(5 * 60 + 45, route("2200", "345").duration());
    }

    #[test]
    fn test_distance_between_endpoints() {
        assert_eq!(111, route("715", "830").distance());
    }
}
