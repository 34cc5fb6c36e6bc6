use serde::{Deserialize, Serialize};

/// Fixed metadata for one observing site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl StationRecord {
    pub fn new(station_id: String, latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            station_id,
            latitude,
            longitude,
            elevation,
        }
    }
}
