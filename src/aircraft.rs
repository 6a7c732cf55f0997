use std::sync::Arc;
use tabled::Tabled;

pub type AircraftName = Arc<str>;

#[derive(Clone, Debug, PartialEq, Eq, Tabled)]
pub struct Aircraft {
    pub name: AircraftName,
    #[tabled(rename = "seats")]
    pub capacity: u32,
}

impl Aircraft {
    pub fn new(name: &str, capacity: u32) -> Self {
        Aircraft {
            name: Arc::from(name),
            capacity,
        }
    }
}
