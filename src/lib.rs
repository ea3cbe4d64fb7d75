pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod processors;
pub mod readers;
pub mod service;
pub mod store;
pub mod utils;

pub use crate::config::{FrequencyNormalization, ServiceConfig};
pub use crate::error::{Result, WeatherError};
pub use crate::service::WeatherService;
