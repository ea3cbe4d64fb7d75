use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;
use crate::models::Reading;

/// One collected reading addressed to a location and metric, as sent by
/// collection sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingRecord {
    #[serde(rename = "iata")]
    pub code: String,

    /// Metric name, parsed at ingestion time
    #[serde(rename = "pointType")]
    pub metric: String,

    pub reading: Reading,
}

impl ReadingRecord {
    pub fn new(code: impl Into<String>, metric: impl Into<String>, reading: Reading) -> Self {
        Self {
            code: code.into(),
            metric: metric.into(),
            reading,
        }
    }
}

/// Reads a JSON array of [`ReadingRecord`]s.
pub struct ReadingReader;

impl ReadingReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: &Path) -> Result<Vec<ReadingRecord>> {
        let file = File::open(path)?;
        let records = self.read_from(BufReader::new(file))?;

        tracing::debug!(path = %path.display(), count = records.len(), "Read reading records");
        Ok(records)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<ReadingRecord>> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Default for ReadingReader {
    fn default() -> Self {
        Self::new()
    }
}
