use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ServiceConfig;
use crate::error::{Result, WeatherError};
use crate::models::LocationSummary;
use crate::store::{LocationRegistry, ReadingStore};
use crate::utils::distance_km;

/// Service health: fresh data size plus request frequency statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    #[serde(rename = "datasize")]
    pub data_size: usize,

    #[serde(rename = "iata_freq")]
    pub iata_frequency: BTreeMap<String, f64>,

    #[serde(rename = "radius_freq")]
    pub radius_frequency: Vec<u32>,
}

impl HealthSnapshot {
    pub fn summary(&self) -> String {
        let queried = self
            .iata_frequency
            .values()
            .filter(|&&fraction| fraction > 0.0)
            .count();

        format!(
            "Health:\n  Fresh summaries: {}\n  Known locations: {}\n  Queried locations: {}\n  Radius buckets: {}",
            self.data_size,
            self.iata_frequency.len(),
            queried,
            self.radius_frequency.len()
        )
    }
}

/// Read-side composition of the registry and the reading store.
///
/// Borrows both for the duration of one query; the only writes it performs are
/// the frequency counters.
pub struct QueryEngine<'a> {
    registry: &'a LocationRegistry,
    readings: &'a ReadingStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(registry: &'a LocationRegistry, readings: &'a ReadingStore) -> Self {
        Self { registry, readings }
    }

    /// Summaries within `radius_km` of the location `code`.
    ///
    /// A zero radius returns the summary for `code` itself, readings or not (an
    /// unknown code gives an empty result). Any other radius returns the
    /// summaries holding at least one reading whose location, the reference
    /// included, is within `radius_km`, in registry order. Results are not
    /// sorted by distance.
    pub fn query_by_code(&self, code: &str, radius_km: f64) -> Result<Vec<LocationSummary>> {
        self.registry.record_location_query(code);
        self.readings.record_radius_query(radius_km);

        if radius_km == 0.0 {
            return Ok(self.readings.get_summary(code).into_iter().collect());
        }

        let reference = self
            .registry
            .find_location(code)
            .ok_or_else(|| WeatherError::unknown_location(code))?;

        let locations = self.registry.list_locations();
        let nearby: Vec<&str> = locations
            .par_iter()
            .filter(|candidate| distance_km(&reference, candidate) <= radius_km)
            .map(|candidate| candidate.code.as_str())
            .collect();

        let summaries = self.readings.summaries_with_readings(nearby);
        tracing::debug!(
            code = %code,
            radius = radius_km,
            matches = summaries.len(),
            "Radius query answered"
        );

        Ok(summaries)
    }

    pub fn health_snapshot(&self, now: DateTime<Utc>, config: &ServiceConfig) -> HealthSnapshot {
        HealthSnapshot {
            data_size: self
                .readings
                .fresh_data_count(now, config.freshness_window()),
            iata_frequency: self
                .registry
                .query_frequencies(config.frequency_normalization),
            radius_frequency: self.readings.radius_histogram(),
        }
    }
}
