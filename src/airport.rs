use crate::error::AirlineError;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type AirportCode = Arc<str>;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Airport {
    pub name: String,
    pub code: AirportCode,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Airport {
    /// Distance in whole kilometres using a flat projection around the
    /// mean latitude. Persisted fares were priced with this formula, so it
    /// must not be replaced by a great-circle computation.
    pub fn distance(a: &Airport, b: &Airport) -> u64 {
        let lat1 = a.latitude.to_radians();
        let lon1 = a.longitude.to_radians();
        let lat2 = b.latitude.to_radians();
        let lon2 = b.longitude.to_radians();

        let dx = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
        let dy = lat2 - lat1;

        ((dx * dx + dy * dy).sqrt() * EARTH_RADIUS_KM).round() as u64
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Airports known to one airline, keyed by code.
#[derive(Debug, Default)]
pub struct AirportRegistry {
    airports: BTreeMap<AirportCode, Arc<Airport>>,
}

impl AirportRegistry {
    pub fn create(
        &mut self,
        name: &str,
        code: &str,
        city: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Arc<Airport>, AirlineError> {
        if self.airports.contains_key(code) {
            return Err(AirlineError::DuplicateAirport(Arc::from(code)));
        }
        let airport = Arc::new(Airport {
            name: name.to_string(),
            code: Arc::from(code),
            city: city.to_string(),
            latitude,
            longitude,
        });
        self.airports.insert(airport.code.clone(), airport.clone());
        Ok(airport)
    }

    /// Returns the registered airport with the same code when `airport`
    /// agrees with it, registers `airport` when the code is new, and fails
    /// when the two records disagree.
    pub fn resolve(&mut self, airport: Airport) -> Result<Arc<Airport>, AirlineError> {
        match self.airports.get(&airport.code) {
            Some(known) if **known == airport => Ok(known.clone()),
            Some(_) => Err(AirlineError::DuplicateAirport(airport.code)),
            None => {
                let airport = Arc::new(airport);
                self.airports.insert(airport.code.clone(), airport.clone());
                Ok(airport)
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&Arc<Airport>> {
        self.airports.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Airport>> {
        self.airports.values()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(code: &str, latitude: f64, longitude: f64) -> Airport {
        Airport {
            name: format!("{code} International"),
            code: Arc::from(code),
            city: code.to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_one_degree_of_latitude() {
        assert_eq!(111, Airport::distance(&at("AAA", 0.0, 0.0), &at("BBB", 1.0, 0.0)));
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let bog = at("BOG", 4.70159, -74.1469);
        let mde = at("MDE", 6.16454, -75.4231);
        assert_eq!(Airport::distance(&bog, &mde), Airport::distance(&mde, &bog));
        assert_eq!(0, Airport::distance(&bog, &bog));
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let equator = Airport::distance(&at("A", 0.0, 0.0), &at("B", 0.0, 1.0));
        let north = Airport::distance(&at("C", 60.0, 0.0), &at("D", 60.0, 1.0));
        assert_eq!(111, equator);
        assert_eq!(56, north);
    }

    #[test]
    fn test_duplicate_code_is_rejected() {
        let mut registry = AirportRegistry::default();
        registry.create("El Dorado", "BOG", "Bogota", 4.70159, -74.1469).unwrap();
        let err = registry
            .create("Other", "BOG", "Elsewhere", 0.0, 0.0)
            .unwrap_err();
        assert_eq!(AirlineError::DuplicateAirport(Arc::from("BOG")), err);
        assert_eq!(1, registry.len());
    }

    #[test]
    fn test_resolve_reuses_matching_record() {
        let mut registry = AirportRegistry::default();
        let first = registry.resolve(at("BOG", 4.7, -74.1)).unwrap();
        let second = registry.resolve(at("BOG", 4.7, -74.1)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.resolve(at("BOG", 5.0, -74.1)).is_err());
    }
}
