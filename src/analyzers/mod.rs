pub mod query_engine;

pub use query_engine::{HealthSnapshot, QueryEngine};
