use serde::{Deserialize, Serialize};

use crate::models::StationRecord;
use crate::utils::constants::{DEFAULT_QUALITY_FLAG, MISSING_ERROR, MISSING_VALUE};

/// One output row, positionally aligned with the station catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseRecord {
    pub station_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub date_time: String,
    pub value: f64,
    pub error: f64,
    pub quality_flag: i32,
}

impl DenseRecord {
    /// Row for a station that has a report on the target date
    pub fn observed(station: &StationRecord, date_time: &str, value: f64, error: f64) -> Self {
        Self {
            station_id: station.station_id.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
            date_time: date_time.to_string(),
            value,
            error,
            quality_flag: DEFAULT_QUALITY_FLAG,
        }
    }

    /// Sentinel-filled row for a station without a usable report
    pub fn missing(station: &StationRecord, date_time: &str) -> Self {
        Self::observed(station, date_time, MISSING_VALUE, MISSING_ERROR)
    }

    pub fn is_missing(&self) -> bool {
        self.value == MISSING_VALUE
    }
}
