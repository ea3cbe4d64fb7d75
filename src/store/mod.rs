pub mod location_registry;
pub mod reading_store;

pub use location_registry::LocationRegistry;
pub use reading_store::{IngestOutcome, ReadingStore};
