pub mod location;
pub mod metric;
pub mod reading;
pub mod summary;

pub use location::Location;
pub use metric::MetricKind;
pub use reading::{Reading, ReadingBuilder};
pub use summary::LocationSummary;
