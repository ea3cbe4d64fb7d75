use crate::utils::constants::{
    DEFAULT_HISTOGRAM_MAX_KEY, HISTOGRAM_INDEX_MODULUS, MAX_HISTOGRAM_BUCKETS,
};

/// Turns a `{value -> count}` counter map into a bucketed histogram.
///
/// The bucket array is sized from the largest key (`floor(max) + 1`, or 1001 when
/// there are no keys) while every key lands in bucket `floor(key) mod 10`. Only the
/// first ten buckets can ever be non-zero; the remaining slots are kept so the
/// reported shape matches what clients already consume.
pub struct FrequencyHistogram;

impl FrequencyHistogram {
    /// Build the histogram.
    ///
    /// Negative and non-finite keys carry no bucket and are ignored. The bucket
    /// count is capped at [`MAX_HISTOGRAM_BUCKETS`]; since indices never exceed 9
    /// the cap drops no counts.
    pub fn build<I>(counters: I) -> Vec<u32>
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        let entries: Vec<(f64, u32)> = counters
            .into_iter()
            .filter(|(key, _)| key.is_finite() && *key >= 0.0)
            .collect();

        let max_key = entries
            .iter()
            .map(|(key, _)| *key)
            .reduce(f64::max)
            .unwrap_or(DEFAULT_HISTOGRAM_MAX_KEY);

        let bucket_count = Self::bucket_count(max_key);
        let mut histogram = vec![0u32; bucket_count];

        for (key, count) in entries {
            let index = (key.floor() as i64).rem_euclid(HISTOGRAM_INDEX_MODULUS) as usize;
            if let Some(bucket) = histogram.get_mut(index) {
                *bucket = bucket.saturating_add(count);
            }
        }

        histogram
    }

    fn bucket_count(max_key: f64) -> usize {
        let floor = max_key.floor();
        if floor >= MAX_HISTOGRAM_BUCKETS as f64 {
            MAX_HISTOGRAM_BUCKETS
        } else {
            floor as usize + 1
        }
    }
}
