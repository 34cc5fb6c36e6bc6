pub mod concurrent_reader;
pub mod observation_reader;
pub mod station_reader;

pub use concurrent_reader::{ConcurrentReader, SourceData};
pub use observation_reader::ObservationReader;
pub use station_reader::StationReader;
