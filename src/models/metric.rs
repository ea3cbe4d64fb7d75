use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WeatherError;

/// The kinds of atmospheric measurement a location can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    Wind,
    Temperature,
    Humidity,
    Pressure,
    CloudCover,
    Precipitation,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Wind,
        MetricKind::Temperature,
        MetricKind::Humidity,
        MetricKind::Pressure,
        MetricKind::CloudCover,
        MetricKind::Precipitation,
    ];

    /// Parse a metric name, case-insensitively.
    ///
    /// `HUMIDTY` and `CLOUDCOVER` are accepted because collectors in the field
    /// still send those spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WIND" => Some(MetricKind::Wind),
            "TEMPERATURE" => Some(MetricKind::Temperature),
            "HUMIDITY" | "HUMIDTY" => Some(MetricKind::Humidity),
            "PRESSURE" => Some(MetricKind::Pressure),
            "CLOUD_COVER" | "CLOUDCOVER" => Some(MetricKind::CloudCover),
            "PRECIPITATION" => Some(MetricKind::Precipitation),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Wind => "WIND",
            MetricKind::Temperature => "TEMPERATURE",
            MetricKind::Humidity => "HUMIDITY",
            MetricKind::Pressure => "PRESSURE",
            MetricKind::CloudCover => "CLOUD_COVER",
            MetricKind::Precipitation => "PRECIPITATION",
        }
    }

    /// Sensor sanity filter: whether a reading mean is plausible for this metric.
    pub fn accepts(&self, mean: f64) -> bool {
        match self {
            MetricKind::Wind => mean >= 0.0,
            MetricKind::Temperature => (-50.0..100.0).contains(&mean),
            MetricKind::Humidity => (0.0..100.0).contains(&mean),
            MetricKind::Pressure => (650.0..800.0).contains(&mean),
            MetricKind::CloudCover => (0.0..100.0).contains(&mean),
            MetricKind::Precipitation => (0.0..100.0).contains(&mean),
        }
    }
}

impl FromStr for MetricKind {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| WeatherError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
