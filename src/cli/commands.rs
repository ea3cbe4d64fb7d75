use std::path::Path;
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::config::ServiceConfig;
use crate::error::{Result, WeatherError};
use crate::logging::init_logging;
use crate::processors::ParallelIngestor;
use crate::readers::{AirportReader, ReadingReader};
use crate::service::WeatherService;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let mut config = ServiceConfig::load(cli.config.as_deref())?;
    if let Some(max_workers) = cli.max_workers {
        config = config.with_max_workers(max_workers);
    }
    let service = Arc::new(WeatherService::new(config));

    match cli.command {
        Commands::Load { airports } => {
            load_airports(&service, &airports)?;

            let codes: Vec<String> = service.list_location_codes().into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&codes)?);
        }

        Commands::Query {
            airports,
            readings,
            code,
            radius,
        } => {
            load_airports(&service, &airports)?;
            if let Some(readings) = readings {
                replay_readings(&service, &readings).await?;
            }

            let summaries = service.query(&code, radius)?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }

        Commands::Health { airports, readings } => {
            load_airports(&service, &airports)?;
            if let Some(readings) = readings {
                replay_readings(&service, &readings).await?;
            }

            let health = service.health();
            eprintln!("{}", health.summary());
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}

fn load_airports(service: &WeatherService, path: &Path) -> Result<()> {
    let report = AirportReader::new().load_path(path, service.registry())?;
    eprintln!("{}", report.summary());

    if !report.any_loaded() {
        return Err(WeatherError::InvalidFormat(format!(
            "{} contains no usable airport rows",
            path.display()
        )));
    }

    Ok(())
}

async fn replay_readings(service: &Arc<WeatherService>, path: &Path) -> Result<()> {
    let records = ReadingReader::new().read_path(path)?;
    let report = ParallelIngestor::new(service.config().max_workers)
        .ingest_all(Arc::clone(service), records)
        .await?;
    eprintln!("{}", report.summary());

    Ok(())
}
