use crate::error::{Result, WeatherError};
use crate::models::Location;
use crate::utils::constants::EARTH_RADIUS_KM;

/// Parse a decimal-degree coordinate, tolerating surrounding whitespace
///
/// # Examples
/// ```
/// use airport_weather::utils::coordinates::parse_coordinate;
///
/// let latitude = parse_coordinate(" 40.639751 ").unwrap();
/// assert!((latitude - 40.639751).abs() < 1e-9);
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();
    let value = trimmed.parse::<f64>().map_err(|_| {
        WeatherError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    if !value.is_finite() {
        return Err(WeatherError::InvalidCoordinate(format!(
            "Coordinate must be finite, got: '{}'",
            coord_str
        )));
    }

    Ok(value)
}

/// Calculate the distance between two points using the Haversine formula
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + (delta_lon / 2.0).sin().powi(2) * (lat1_rad.cos() * lat2_rad.cos());
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometres between two locations
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}
