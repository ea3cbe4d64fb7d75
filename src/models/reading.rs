use serde::{Deserialize, Serialize};

/// Statistical summary of a batch of sensor samples for one metric.
///
/// Values are stored exactly as observed; plausibility is decided at ingestion
/// by [`MetricKind::accepts`](crate::models::MetricKind::accepts).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reading {
    /// Mean of the observations
    #[serde(default)]
    pub mean: f64,

    /// 1st quartile, useful as a lower bound
    #[serde(rename = "first", default)]
    pub first_quartile: i32,

    /// 2nd quartile
    #[serde(rename = "second", default)]
    pub median: i32,

    /// 3rd quartile, a less noisy upper value
    #[serde(rename = "third", default)]
    pub third_quartile: i32,

    /// Total number of measurements
    #[serde(default)]
    pub count: i32,
}

impl Reading {
    pub fn new(mean: f64, first_quartile: i32, median: i32, third_quartile: i32, count: i32) -> Self {
        Self {
            mean,
            first_quartile,
            median,
            third_quartile,
            count,
        }
    }

    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::new()
    }
}

#[derive(Debug, Default)]
pub struct ReadingBuilder {
    mean: f64,
    first_quartile: i32,
    median: i32,
    third_quartile: i32,
    count: i32,
}

impl ReadingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    pub fn first_quartile(mut self, value: i32) -> Self {
        self.first_quartile = value;
        self
    }

    pub fn median(mut self, value: i32) -> Self {
        self.median = value;
        self
    }

    pub fn third_quartile(mut self, value: i32) -> Self {
        self.third_quartile = value;
        self
    }

    pub fn count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    pub fn build(self) -> Reading {
        Reading::new(
            self.mean,
            self.first_quartile,
            self.median,
            self.third_quartile,
            self.count,
        )
    }
}
