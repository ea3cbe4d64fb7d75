pub mod parallel_ingestor;

pub use parallel_ingestor::{IngestReport, ParallelIngestor};
