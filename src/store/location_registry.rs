use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::FrequencyNormalization;
use crate::error::Result;
use crate::models::Location;
use crate::store::ReadingStore;

/// Registry of known locations keyed by code, with per-code query counters.
///
/// Adding or removing a location also creates or drops its summary in the
/// shared [`ReadingStore`]. Iteration order is by code.
#[derive(Debug)]
pub struct LocationRegistry {
    locations: RwLock<BTreeMap<String, Location>>,
    query_frequency: RwLock<HashMap<String, u32>>,
    readings: Arc<ReadingStore>,
}

impl LocationRegistry {
    pub fn new(readings: Arc<ReadingStore>) -> Self {
        Self {
            locations: RwLock::new(BTreeMap::new()),
            query_frequency: RwLock::new(HashMap::new()),
            readings,
        }
    }

    /// Insert or replace the location for `code`.
    ///
    /// Replacing a location also resets its summary to empty.
    pub fn add_location(&self, code: &str, latitude: f64, longitude: f64) -> Result<Location> {
        let location = Location::new(code, latitude, longitude)?;

        let mut locations = self.locations.write().unwrap_or_else(PoisonError::into_inner);
        locations.insert(location.code.clone(), location.clone());
        self.readings.create_summary(&location.code);

        tracing::debug!(code = %location.code, latitude, longitude, "Location added");
        Ok(location)
    }

    /// Remove a location and its summary. Absent codes yield `None`.
    pub fn remove_location(&self, code: &str) -> Option<Location> {
        let mut locations = self.locations.write().unwrap_or_else(PoisonError::into_inner);
        let removed = locations.remove(code);
        self.readings.remove_summary(code);

        tracing::debug!(code = %code, found = removed.is_some(), "Location removed");
        removed
    }

    pub fn find_location(&self, code: &str) -> Option<Location> {
        let locations = self.locations.read().unwrap_or_else(PoisonError::into_inner);
        locations.get(code).cloned()
    }

    pub fn list_codes(&self) -> BTreeSet<String> {
        let locations = self.locations.read().unwrap_or_else(PoisonError::into_inner);
        locations.keys().cloned().collect()
    }

    pub fn list_locations(&self) -> Vec<Location> {
        let locations = self.locations.read().unwrap_or_else(PoisonError::into_inner);
        locations.values().cloned().collect()
    }

    pub fn location_count(&self) -> usize {
        self.locations.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Count a query against `code`. Unknown codes are ignored and return `false`.
    pub fn record_location_query(&self, code: &str) -> bool {
        let locations = self.locations.read().unwrap_or_else(PoisonError::into_inner);
        if !locations.contains_key(code) {
            return false;
        }

        let mut counters = self
            .query_frequency
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let count = counters.entry(code.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        true
    }

    /// Fraction of queries per known location.
    ///
    /// With [`FrequencyNormalization::DistinctEntries`] the denominator is the
    /// number of counter entries, not the number of queries, so fractions do not
    /// sum to one. Counters outlive location removal and still count toward the
    /// denominator. An empty counter set yields 0.0 for every location.
    pub fn query_frequencies(&self, normalization: FrequencyNormalization) -> BTreeMap<String, f64> {
        let locations = self.locations.read().unwrap_or_else(PoisonError::into_inner);
        let counters = self
            .query_frequency
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let denominator = match normalization {
            FrequencyNormalization::DistinctEntries => counters.len() as f64,
            FrequencyNormalization::TotalHits => {
                counters.values().map(|&count| f64::from(count)).sum()
            }
        };

        locations
            .keys()
            .map(|code| {
                let hits = counters.get(code).copied().unwrap_or(0);
                let fraction = if denominator > 0.0 {
                    f64::from(hits) / denominator
                } else {
                    0.0
                };
                (code.clone(), fraction)
            })
            .collect()
    }

    /// Drop every location and counter. Summaries are left to the store's own reset.
    pub fn reset(&self) {
        self.locations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.query_frequency
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::models::Reading;
    use pretty_assertions::assert_eq;

    fn registry() -> (LocationRegistry, Arc<ReadingStore>) {
        let store = Arc::new(ReadingStore::new());
        (LocationRegistry::new(Arc::clone(&store)), store)
    }

    #[test]
    fn test_add_and_find() -> Result<()> {
        let (registry, store) = registry();

        let added = registry.add_location("BOS", 42.364347, -71.005181)?;
        let found = registry.find_location("BOS").unwrap();

        assert_eq!(found, added);
        assert_eq!(found.latitude, 42.364347);
        assert!(store.get_summary("BOS").is_some());
        Ok(())
    }

    #[test]
    fn test_add_is_upsert() -> Result<()> {
        let (registry, store) = registry();
        registry.add_location("BOS", 42.0, -71.0)?;
        store.ingest("BOS", "WIND", Reading::builder().mean(3.0).build())?;

        registry.add_location("BOS", 43.0, -70.0)?;

        assert_eq!(registry.location_count(), 1);
        assert_eq!(registry.find_location("BOS").unwrap().latitude, 43.0);
        assert!(!store.get_summary("BOS").unwrap().has_any_reading());
        Ok(())
    }

    #[test]
    fn test_add_rejects_bad_coordinates() {
        let (registry, store) = registry();

        let err = registry.add_location("BAD", 95.0, 0.0).unwrap_err();

        assert!(matches!(err, WeatherError::InvalidCoordinate(_)));
        assert!(registry.find_location("BAD").is_none());
        assert!(store.get_summary("BAD").is_none());
    }

    #[test]
    fn test_remove() -> Result<()> {
        let (registry, store) = registry();
        registry.add_location("BOS", 42.364347, -71.005181)?;

        let removed = registry.remove_location("BOS").unwrap();

        assert_eq!(removed.code, "BOS");
        assert!(registry.find_location("BOS").is_none());
        assert!(store.get_summary("BOS").is_none());
        assert!(registry.remove_location("BOS").is_none());
        Ok(())
    }

    #[test]
    fn test_codes_are_case_sensitive() -> Result<()> {
        let (registry, _) = registry();
        registry.add_location("BOS", 42.0, -71.0)?;

        assert!(registry.find_location("bos").is_none());
        Ok(())
    }

    #[test]
    fn test_list_codes_sorted() -> Result<()> {
        let (registry, _) = registry();
        registry.add_location("LGA", 40.777245, -73.872608)?;
        registry.add_location("BOS", 42.364347, -71.005181)?;
        registry.add_location("JFK", 40.639751, -73.778925)?;

        let codes: Vec<String> = registry.list_codes().into_iter().collect();
        assert_eq!(codes, vec!["BOS", "JFK", "LGA"]);

        let locations: Vec<String> = registry
            .list_locations()
            .into_iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(locations, codes);
        Ok(())
    }

    #[test]
    fn test_record_unknown_code_is_noop() {
        let (registry, _) = registry();
        assert!(!registry.record_location_query("XXX"));
        assert!(registry
            .query_frequencies(FrequencyNormalization::DistinctEntries)
            .is_empty());
    }

    #[test]
    fn test_frequencies_divide_by_distinct_entries() -> Result<()> {
        let (registry, _) = registry();
        for code in ["BOS", "JFK", "LGA"] {
            registry.add_location(code, 40.0, -73.0)?;
        }

        registry.record_location_query("BOS");
        registry.record_location_query("BOS");
        registry.record_location_query("BOS");
        registry.record_location_query("JFK");

        let frequencies = registry.query_frequencies(FrequencyNormalization::DistinctEntries);
        assert_eq!(frequencies.len(), 3);
        assert_eq!(frequencies["BOS"], 1.5);
        assert_eq!(frequencies["JFK"], 0.5);
        assert_eq!(frequencies["LGA"], 0.0);

        let frequencies = registry.query_frequencies(FrequencyNormalization::TotalHits);
        assert_eq!(frequencies["BOS"], 0.75);
        assert_eq!(frequencies["JFK"], 0.25);
        Ok(())
    }

    #[test]
    fn test_frequencies_without_queries_are_zero() -> Result<()> {
        let (registry, _) = registry();
        registry.add_location("BOS", 42.0, -71.0)?;

        let frequencies = registry.query_frequencies(FrequencyNormalization::DistinctEntries);
        assert_eq!(frequencies["BOS"], 0.0);
        Ok(())
    }

    #[test]
    fn test_removed_location_counter_still_counts() -> Result<()> {
        let (registry, _) = registry();
        registry.add_location("BOS", 42.0, -71.0)?;
        registry.add_location("JFK", 40.0, -73.0)?;
        registry.record_location_query("BOS");
        registry.record_location_query("JFK");

        registry.remove_location("JFK");

        let frequencies = registry.query_frequencies(FrequencyNormalization::DistinctEntries);
        assert_eq!(frequencies.len(), 1);
        assert_eq!(frequencies["BOS"], 0.5);
        Ok(())
    }

    #[test]
    fn test_poisoned_locks_are_recovered() -> Result<()> {
        let store = Arc::new(ReadingStore::new());
        let registry = Arc::new(LocationRegistry::new(Arc::clone(&store)));
        registry.add_location("BOS", 42.0, -71.0)?;

        let poisoner = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _locations = poisoner.locations.write().unwrap();
            let _frequency = poisoner.query_frequency.write().unwrap();
            panic!("writer died holding the locks");
        })
        .join();
        assert!(registry.locations.is_poisoned());
        assert!(registry.query_frequency.is_poisoned());

        registry.add_location("JFK", 40.0, -73.0)?;
        assert!(registry.record_location_query("BOS"));
        assert_eq!(registry.location_count(), 2);
        assert_eq!(
            registry.query_frequencies(FrequencyNormalization::DistinctEntries)["BOS"],
            1.0
        );
        assert!(registry.remove_location("JFK").is_some());
        Ok(())
    }

    #[test]
    fn test_reset() -> Result<()> {
        let (registry, _) = registry();
        registry.add_location("BOS", 42.0, -71.0)?;
        registry.record_location_query("BOS");

        registry.reset();

        assert_eq!(registry.location_count(), 0);
        registry.add_location("BOS", 42.0, -71.0)?;
        assert_eq!(
            registry.query_frequencies(FrequencyNormalization::DistinctEntries)["BOS"],
            0.0
        );
        Ok(())
    }
}
