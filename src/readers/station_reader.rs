use crate::error::{ProcessingError, Result};
use crate::models::StationRecord;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the station catalog, one record per unique station ID in file order.
    ///
    /// Each line is split on runs of whitespace and the first four tokens are
    /// taken as ID, latitude, longitude and elevation. Remaining columns (state,
    /// name, GSN/HCN flags, WMO ID) are ignored. When an ID repeats, the first
    /// occurrence is kept.
    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationRecord>> {
        if !path.exists() {
            return Err(ProcessingError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path)?;
        let content = decode_catalog(&bytes);

        let mut stations = Vec::new();
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;

        for (index, line) in content.lines().enumerate() {
            let line_number = index as u64 + 1;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let station = self.parse_station_line(line, path, line_number)?;
            if seen.insert(station.station_id.clone()) {
                stations.push(station);
            } else {
                duplicates += 1;
                debug!(
                    "Dropping duplicate station {} at line {}",
                    station.station_id, line_number
                );
            }
        }

        if duplicates > 0 {
            warn!(
                "{} duplicate station IDs in {}; keeping the first occurrence",
                duplicates,
                path.display()
            );
        }

        info!(
            "Read {} stations from {} ({} duplicates dropped)",
            stations.len(),
            path.display(),
            duplicates
        );

        Ok(stations)
    }

    /// Parse a single line from the station catalog
    fn parse_station_line(&self, line: &str, path: &Path, line_number: u64) -> Result<StationRecord> {
        // Expected format: ID LATITUDE LONGITUDE ELEVATION [STATE] NAME [GSN] [HCN/CRN] [WMO]
        let tokens: Vec<&str> = line.split_whitespace().take(4).collect();

        if tokens.len() < 4 {
            return Err(ProcessingError::malformed(
                path,
                line_number,
                format!("expected at least 4 columns, found {}", tokens.len()),
            ));
        }

        let parse_number = |field: &str, token: &str| {
            token.parse::<f64>().map_err(|_| {
                ProcessingError::malformed(path, line_number, format!("invalid {}: '{}'", field, token))
            })
        };

        let latitude = parse_number("latitude", tokens[1])?;
        let longitude = parse_number("longitude", tokens[2])?;
        let elevation = parse_number("elevation", tokens[3])?;

        Ok(StationRecord::new(
            tokens[0].to_string(),
            latitude,
            longitude,
            elevation,
        ))
    }

    /// Read the catalog into a station ID lookup
    pub fn read_stations_map(&self, path: &Path) -> Result<HashMap<String, StationRecord>> {
        let stations = self.read_stations(path)?;
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            map.insert(station.station_id.clone(), station);
        }

        Ok(map)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog names occasionally carry Latin-1 bytes; fall back to Windows-1252
/// rather than failing on columns we never read.
fn decode_catalog(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}
