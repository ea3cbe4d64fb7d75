pub mod airport_reader;
pub mod reading_reader;

pub use airport_reader::{AirportReader, LoadReport};
pub use reading_reader::{ReadingReader, ReadingRecord};
