use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use validator::Validate;

use crate::error::{Result, WeatherError};

/// A named point on Earth, identified by its (case-sensitive) airport code.
///
/// Two locations are equal when their codes are equal, regardless of coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Location {
    #[serde(rename = "iata")]
    pub code: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Location {
    pub fn new(code: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(WeatherError::InvalidCode(code));
        }

        // range() lets NaN through
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(WeatherError::InvalidCoordinate(format!(
                "Coordinates must be finite, got ({}, {})",
                latitude, longitude
            )));
        }

        let location = Self {
            code,
            latitude,
            longitude,
        };
        location
            .validate()
            .map_err(|e| WeatherError::InvalidCoordinate(e.to_string()))?;

        Ok(location)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        let jfk = Location::new("JFK", 40.639751, -73.778925).unwrap();
        assert_eq!(jfk.code, "JFK");
        assert!(jfk.validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(matches!(
            Location::new("XXX", 91.0, 0.0),
            Err(WeatherError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Location::new("XXX", 0.0, -181.0),
            Err(WeatherError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Location::new("XXX", f64::NAN, 0.0),
            Err(WeatherError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_empty_code_rejected() {
        assert!(matches!(
            Location::new("  ", 0.0, 0.0),
            Err(WeatherError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_equality_by_code() {
        let a = Location::new("JFK", 40.639751, -73.778925).unwrap();
        let b = Location::new("JFK", 0.0, 0.0).unwrap();
        let c = Location::new("jfk", 40.639751, -73.778925).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serializes_code_as_iata() {
        let bos = Location::new("BOS", 42.364347, -71.005181).unwrap();
        let json = serde_json::to_value(&bos).unwrap();
        assert_eq!(json["iata"], "BOS");
        assert_eq!(json["latitude"], 42.364347);
    }
}
