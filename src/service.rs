//! The programmatic contract consumed by transport adapters.
//!
//! [`WeatherService`] owns one [`LocationRegistry`] and one [`ReadingStore`],
//! wires them together, and answers queries through a short-lived
//! [`QueryEngine`]. It is `Send + Sync`; share it behind an `Arc`.

use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::analyzers::{HealthSnapshot, QueryEngine};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::models::{Location, LocationSummary, Reading};
use crate::store::{IngestOutcome, LocationRegistry, ReadingStore};

#[derive(Debug)]
pub struct WeatherService {
    config: ServiceConfig,
    registry: LocationRegistry,
    readings: Arc<ReadingStore>,
}

impl WeatherService {
    pub fn new(config: ServiceConfig) -> Self {
        let readings = Arc::new(ReadingStore::new());
        let registry = LocationRegistry::new(Arc::clone(&readings));

        Self {
            config,
            registry,
            readings,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn readings(&self) -> &ReadingStore {
        &self.readings
    }

    pub fn add_location(&self, code: &str, latitude: f64, longitude: f64) -> Result<Location> {
        self.registry.add_location(code, latitude, longitude)
    }

    pub fn remove_location(&self, code: &str) -> Option<Location> {
        self.registry.remove_location(code)
    }

    pub fn get_location(&self, code: &str) -> Option<Location> {
        self.registry.find_location(code)
    }

    pub fn list_location_codes(&self) -> BTreeSet<String> {
        self.registry.list_codes()
    }

    pub fn location_count(&self) -> usize {
        self.registry.location_count()
    }

    pub fn ingest_reading(&self, code: &str, metric: &str, reading: Reading) -> Result<IngestOutcome> {
        self.readings.ingest(code, metric, reading)
    }

    pub fn get_summary(&self, code: &str) -> Option<LocationSummary> {
        self.readings.get_summary(code)
    }

    pub fn query(&self, code: &str, radius_km: f64) -> Result<Vec<LocationSummary>> {
        self.engine().query_by_code(code, radius_km)
    }

    pub fn health(&self) -> HealthSnapshot {
        self.engine().health_snapshot(Utc::now(), &self.config)
    }

    /// Forget every location, summary and counter.
    pub fn reset(&self) {
        self.registry.reset();
        self.readings.reset();
    }

    fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.registry, &self.readings)
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
