/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// Freshness window for health reporting (24 hours)
pub const DEFAULT_FRESHNESS_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Longest accepted freshness window (10 years)
pub const MAX_FRESHNESS_WINDOW_MS: i64 = 10 * 365 * DEFAULT_FRESHNESS_WINDOW_MS;

/// Histogram sizing
pub const DEFAULT_HISTOGRAM_MAX_KEY: f64 = 1000.0;
pub const HISTOGRAM_INDEX_MODULUS: i64 = 10;
pub const MAX_HISTOGRAM_BUCKETS: usize = 100_000;

/// Airport data file layout (airports.dat)
pub const AIRPORT_COLUMN_COUNT: usize = 11;
pub const AIRPORT_CODE_COLUMN: usize = 4;
pub const AIRPORT_LATITUDE_COLUMN: usize = 6;
pub const AIRPORT_LONGITUDE_COLUMN: usize = 7;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "AIRPORT_WEATHER";
