use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::readers::ReadingRecord;
use crate::service::WeatherService;
use crate::store::IngestOutcome;

/// Totals from one replay of reading records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub out_of_range: usize,
    pub rejected: usize,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.accepted + self.out_of_range + self.rejected
    }

    fn merge(&mut self, other: IngestReport) {
        self.accepted += other.accepted;
        self.out_of_range += other.out_of_range;
        self.rejected += other.rejected;
    }

    pub fn summary(&self) -> String {
        format!(
            "Ingested {} readings: {} accepted, {} out of range, {} rejected",
            self.total(),
            self.accepted,
            self.out_of_range,
            self.rejected
        )
    }
}

/// Feeds reading records into a shared [`WeatherService`] from several
/// blocking tasks at once.
///
/// Records are sharded by location code, so each location is written by a
/// single worker in file order and its last record wins.
pub struct ParallelIngestor {
    max_workers: usize,
}

impl ParallelIngestor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Ingest every record. Domain errors (unknown location or metric) are
    /// counted as rejected; only task failures abort the run.
    pub async fn ingest_all(
        &self,
        service: Arc<WeatherService>,
        records: Vec<ReadingRecord>,
    ) -> Result<IngestReport> {
        if records.is_empty() {
            return Ok(IngestReport::default());
        }

        let shards = self.shard_by_code(records);
        tracing::debug!(workers = shards.len(), "Starting reading replay");

        let handles: Vec<_> = shards
            .into_iter()
            .map(|shard| {
                let service = Arc::clone(&service);
                tokio::task::spawn_blocking(move || Self::ingest_shard(&service, &shard))
            })
            .collect();

        let mut report = IngestReport::default();
        for handle in handles {
            report.merge(handle.await?);
        }

        tracing::info!(
            accepted = report.accepted,
            out_of_range = report.out_of_range,
            rejected = report.rejected,
            "Reading replay finished"
        );
        Ok(report)
    }

    /// Split records into at most `max_workers` shards. Codes are dealt to
    /// shards round-robin in order of first appearance; record order within a
    /// shard follows the input.
    fn shard_by_code(&self, records: Vec<ReadingRecord>) -> Vec<Vec<ReadingRecord>> {
        let mut assignment: HashMap<String, usize> = HashMap::new();
        let mut shards: Vec<Vec<ReadingRecord>> = Vec::new();

        for record in records {
            let next = assignment.len() % self.max_workers;
            let shard = *assignment.entry(record.code.clone()).or_insert(next);
            if shard == shards.len() {
                shards.push(Vec::new());
            }
            shards[shard].push(record);
        }

        shards
    }

    fn ingest_shard(service: &WeatherService, records: &[ReadingRecord]) -> IngestReport {
        let mut report = IngestReport::default();

        for record in records {
            match service.ingest_reading(&record.code, &record.metric, record.reading) {
                Ok(IngestOutcome::Accepted) => report.accepted += 1,
                Ok(IngestOutcome::OutOfRange) => report.out_of_range += 1,
                Err(e) => {
                    tracing::warn!(code = %record.code, metric = %record.metric, error = %e, "Reading rejected");
                    report.rejected += 1;
                }
            }
        }

        report
    }
}
