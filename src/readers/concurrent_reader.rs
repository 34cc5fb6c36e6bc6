use crate::error::Result;
use crate::models::{ObservationRecord, StationRecord};
use crate::readers::{ObservationReader, StationReader};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::debug;

/// Loads the station catalog and the observation extract side by side.
/// The two files are independent, so this only saves wall-clock time.
pub struct ConcurrentReader {
    use_mmap: bool,
}

impl ConcurrentReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub async fn read_inputs(
        &self,
        observations_path: &Path,
        stations_path: &Path,
    ) -> Result<SourceData> {
        let stations_path: PathBuf = stations_path.to_path_buf();
        let observations_path: PathBuf = observations_path.to_path_buf();
        let use_mmap = self.use_mmap;

        let station_handle: JoinHandle<Result<Vec<StationRecord>>> =
            tokio::task::spawn_blocking(move || StationReader::new().read_stations(&stations_path));

        let observation_handle: JoinHandle<Result<Vec<ObservationRecord>>> =
            tokio::task::spawn_blocking(move || {
                ObservationReader::new()
                    .with_mmap(use_mmap)
                    .read_observations(&observations_path)
            });

        let (stations, observations) = tokio::try_join!(station_handle, observation_handle)?;
        let source = SourceData {
            stations: stations?,
            observations: observations?,
        };

        debug!(
            "Loaded {} stations and {} observations",
            source.stations.len(),
            source.observations.len()
        );

        Ok(source)
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Both inputs of a run, fully loaded
#[derive(Debug, Clone)]
pub struct SourceData {
    pub stations: Vec<StationRecord>,
    pub observations: Vec<ObservationRecord>,
}
