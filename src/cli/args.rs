use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airport-weather")]
#[command(about = "In-memory airport weather aggregation and radius queries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override the configured replay worker count")]
    pub max_workers: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load an airports file and list the codes that were accepted
    Load {
        #[arg(short, long, help = "Airports data file (11-column CSV)")]
        airports: PathBuf,
    },

    /// Answer a radius query around one airport
    Query {
        #[arg(short, long, help = "Airports data file (11-column CSV)")]
        airports: PathBuf,

        #[arg(short, long, help = "JSON file of readings to ingest first")]
        readings: Option<PathBuf>,

        #[arg(short, long, help = "Reference airport code")]
        code: String,

        #[arg(long, default_value = "0", help = "Radius in kilometres")]
        radius: f64,
    },

    /// Print health statistics after loading and ingesting
    Health {
        #[arg(short, long, help = "Airports data file (11-column CSV)")]
        airports: PathBuf,

        #[arg(short, long, help = "JSON file of readings to ingest first")]
        readings: Option<PathBuf>,
    },
}
