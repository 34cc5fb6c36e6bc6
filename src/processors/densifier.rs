use crate::error::Result;
use crate::models::{DenseRecord, ObservationRecord, StationRecord};
use crate::utils::constants::{DEFAULT_BASE_HOUR, SNOW_DEPTH_ERROR, SNOW_DEPTH_SCALE};
use crate::utils::dates::format_base_datetime;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Joins observations onto the station catalog for a single date, producing
/// exactly one row per station in catalog order.
pub struct Densifier {
    base_hour: u32,
}

impl Densifier {
    pub fn new() -> Self {
        Self {
            base_hour: DEFAULT_BASE_HOUR,
        }
    }

    pub fn with_base_hour(base_hour: u32) -> Self {
        Self { base_hour }
    }

    pub fn densify(
        &self,
        stations: &[StationRecord],
        observations: &[ObservationRecord],
        date: NaiveDate,
    ) -> Result<Vec<DenseRecord>> {
        let date_time = format_base_datetime(date, self.base_hour)?;
        let lookup = self.build_lookup(observations, date);

        let records: Vec<DenseRecord> = stations
            .iter()
            .map(|station| match lookup.get(station.station_id.as_str()) {
                Some(Some(raw)) => DenseRecord::observed(
                    station,
                    &date_time,
                    SNOW_DEPTH_SCALE * raw,
                    SNOW_DEPTH_ERROR,
                ),
                _ => DenseRecord::missing(station, &date_time),
            })
            .collect();

        let reported = records.iter().filter(|r| !r.is_missing()).count();
        info!(
            "Densified {} stations for {}: {} reported, {} missing",
            records.len(),
            date,
            reported,
            records.len() - reported
        );

        Ok(records)
    }

    /// Station ID -> raw value of the first report on `date`, in input order.
    /// An empty value still claims the slot.
    fn build_lookup<'a>(
        &self,
        observations: &'a [ObservationRecord],
        date: NaiveDate,
    ) -> HashMap<&'a str, Option<f64>> {
        let mut lookup = HashMap::new();
        let mut duplicates = 0usize;

        for observation in observations.iter().filter(|o| o.date == date) {
            if lookup.contains_key(observation.station_id.as_str()) {
                duplicates += 1;
                continue;
            }
            lookup.insert(observation.station_id.as_str(), observation.value);
        }

        if duplicates > 0 {
            warn!(
                "{} duplicate reports on {}; keeping the first per station",
                duplicates, date
            );
        }
        debug!("{} stations reported on {}", lookup.len(), date);

        lookup
    }
}

impl Default for Densifier {
    fn default() -> Self {
        Self::new()
    }
}
