use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, WeatherError};
use crate::utils::constants::{DEFAULT_FRESHNESS_WINDOW_MS, ENV_PREFIX, MAX_FRESHNESS_WINDOW_MS};

/// Denominator used when turning per-location query counts into fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyNormalization {
    /// Divide by the number of distinct codes ever queried (historical behaviour)
    #[default]
    DistinctEntries,
    /// Divide by the total number of queries
    TotalHits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub freshness_window_ms: i64,
    pub frequency_normalization: FrequencyNormalization,
    pub max_workers: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: DEFAULT_FRESHNESS_WINDOW_MS,
            frequency_normalization: FrequencyNormalization::default(),
            max_workers: num_cpus::get(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration: defaults, then the optional TOML file, then
    /// `AIRPORT_WEATHER_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("freshness_window_ms", defaults.freshness_window_ms)?
            .set_default("frequency_normalization", "distinct_entries")?
            .set_default("max_workers", defaults.max_workers as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize::<ServiceConfig>()?;

        config.validate()?;

        tracing::debug!(?config, "Loaded service configuration");
        Ok(config)
    }

    /// Range checks for values that arrive from files or the environment.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_FRESHNESS_WINDOW_MS).contains(&self.freshness_window_ms) {
            return Err(WeatherError::InvalidConfig(format!(
                "freshness_window_ms must be between 0 and {}, got {}",
                MAX_FRESHNESS_WINDOW_MS, self.freshness_window_ms
            )));
        }

        if self.max_workers == 0 {
            return Err(WeatherError::InvalidConfig(
                "max_workers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// The freshness window, clamped to the accepted range.
    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.freshness_window_ms.clamp(0, MAX_FRESHNESS_WINDOW_MS))
    }

    pub fn with_freshness_window_ms(mut self, window_ms: i64) -> Self {
        self.freshness_window_ms = window_ms;
        self
    }

    pub fn with_frequency_normalization(mut self, normalization: FrequencyNormalization) -> Self {
        self.frequency_normalization = normalization;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }
}
