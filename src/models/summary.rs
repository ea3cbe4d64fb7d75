use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{MetricKind, Reading};

/// Latest accepted reading per metric for one location, plus when it last changed.
///
/// `last_update` is `None` exactly when every slot is empty: slots are only ever
/// filled through [`LocationSummary::apply`], which stamps the time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    #[serde(rename = "iata")]
    code: String,
    temperature: Option<Reading>,
    wind: Option<Reading>,
    humidity: Option<Reading>,
    precipitation: Option<Reading>,
    pressure: Option<Reading>,
    cloud_cover: Option<Reading>,
    #[serde(rename = "lastUpdateTime", with = "chrono::serde::ts_milliseconds_option")]
    last_update: Option<DateTime<Utc>>,
}

impl LocationSummary {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            temperature: None,
            wind: None,
            humidity: None,
            precipitation: None,
            pressure: None,
            cloud_cover: None,
            last_update: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn reading(&self, kind: MetricKind) -> Option<&Reading> {
        match kind {
            MetricKind::Wind => self.wind.as_ref(),
            MetricKind::Temperature => self.temperature.as_ref(),
            MetricKind::Humidity => self.humidity.as_ref(),
            MetricKind::Pressure => self.pressure.as_ref(),
            MetricKind::CloudCover => self.cloud_cover.as_ref(),
            MetricKind::Precipitation => self.precipitation.as_ref(),
        }
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn has_any_reading(&self) -> bool {
        MetricKind::ALL.iter().any(|&kind| self.reading(kind).is_some())
    }

    /// Updated strictly after `cutoff` and holding at least one reading.
    pub fn is_fresh(&self, cutoff: DateTime<Utc>) -> bool {
        self.has_any_reading() && self.last_update.is_some_and(|ts| ts > cutoff)
    }

    /// Store `reading` in the slot for `kind` if its mean is plausible.
    ///
    /// Returns `false` (leaving the summary untouched) when the mean falls
    /// outside the metric's accepted range.
    pub fn apply(&mut self, kind: MetricKind, reading: Reading, now: DateTime<Utc>) -> bool {
        if !kind.accepts(reading.mean) {
            return false;
        }

        let slot = match kind {
            MetricKind::Wind => &mut self.wind,
            MetricKind::Temperature => &mut self.temperature,
            MetricKind::Humidity => &mut self.humidity,
            MetricKind::Pressure => &mut self.pressure,
            MetricKind::CloudCover => &mut self.cloud_cover,
            MetricKind::Precipitation => &mut self.precipitation,
        };
        *slot = Some(reading);
        self.last_update = Some(now);

        true
    }
}
