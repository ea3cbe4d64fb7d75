pub mod constants;
pub mod coordinates;
pub mod histogram;

pub use constants::*;
pub use coordinates::{distance_km, haversine_distance, parse_coordinate};
pub use histogram::FrequencyHistogram;
