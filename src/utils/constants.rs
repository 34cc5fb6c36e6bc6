/// GHCN-Daily element code for snow depth
pub const SNOW_DEPTH_ELEMENT: &str = "SNWD";

/// Missing value marker written for stations without a report
pub const MISSING_VALUE: f64 = -999.0;

/// Raw snow depth units to meters
pub const SNOW_DEPTH_SCALE: f64 = 0.001;

/// Instrument error assigned to every reported snow depth (m)
pub const SNOW_DEPTH_ERROR: f64 = 0.04;

/// Error assigned to missing rows
pub const MISSING_ERROR: f64 = 0.0;

/// Quality flag assigned to every row
pub const DEFAULT_QUALITY_FLAG: i32 = 0;

/// Synoptic reporting hour (UTC) stamped on every row
pub const DEFAULT_BASE_HOUR: u32 = 18;

/// Output variable names
pub const VAR_SNOW_DEPTH: &str = "totalSnowDepth";
pub const VAR_DATE_TIME: &str = "dateTime";
pub const VAR_STATION_ID: &str = "stationIdentification";
pub const VAR_LATITUDE: &str = "latitude";
pub const VAR_LONGITUDE: &str = "longitude";
pub const VAR_HEIGHT: &str = "height";

/// Output dimension holding one entry per row
pub const DIM_LOCATION: &str = "Location";

/// Attribute names and values
pub const ATTR_UNITS: &str = "units";
pub const ATTR_COORDINATES: &str = "coordinates";
pub const UNITS_METERS: &str = "m";
pub const COORDINATES_LON_LAT: &str = "longitude latitude";

/// Parquet schema metadata keys
pub const META_DIMENSIONS: &str = "dimensions";
pub const META_VARIABLE_DIMENSIONS: &str = "variable_dimensions";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
