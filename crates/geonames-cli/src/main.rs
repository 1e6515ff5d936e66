//! GeoNames command-line host
//!
//! Runs one-shot lookups against the GeoNames services, or an interactive
//! search session driven from stdin.

mod config;
mod error;
mod interactive;
mod output;

use clap::{Parser, Subcommand};
use geonames_client::GeoNamesLookup;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::PrintObserver;

#[derive(Parser)]
#[command(name = "geonames", about = "Look up places with the GeoNames web services")]
struct Cli {
    /// GeoNames username (defaults to GEONAMES_USERNAME)
    #[arg(long)]
    username: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Name of the populated place nearest to a position
    NearbyPlace {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Toponyms around a position
    Toponyms {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long, default_value_t = 10)]
        max_rows: u32,
        /// Search radius in km
        #[arg(long, default_value_t = 10.0)]
        radius: f64,
    },
    /// Wikipedia articles around a position
    Wikipedia {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long, default_value_t = 10)]
        max_rows: u32,
        /// Search radius in km
        #[arg(long, default_value_t = 10.0)]
        radius: f64,
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Free-text search; separate qualifiers with commas
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        max_rows: u32,
        #[arg(long, default_value_t = 0)]
        start_row: u32,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Search as you type, one line of input at a time
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env()
        .add_directive("geonames_cli=info".parse()?)
        .add_directive("geonames_client=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    let cli = Cli::parse();
    let config = Config::from_env(cli.username)?;
    info!(base_url = %config.lookup.base_url, "Using GeoNames service");

    if let Command::Interactive = cli.command {
        return interactive::run(config).await;
    }

    let mut lookup = GeoNamesLookup::with_config(config.username, config.lookup);
    match cli.command {
        Command::NearbyPlace {
            latitude,
            longitude,
        } => lookup.find_nearby_place_name(latitude, longitude),
        Command::Toponyms {
            latitude,
            longitude,
            max_rows,
            radius,
        } => lookup.find_nearby_toponyms(latitude, longitude, max_rows, radius),
        Command::Wikipedia {
            latitude,
            longitude,
            max_rows,
            radius,
            lang,
        } => lookup.find_nearby_wikipedia(latitude, longitude, max_rows, radius, &lang),
        Command::Search {
            query,
            max_rows,
            start_row,
            lang,
        } => {
            let lang = lang.or(config.language);
            lookup.search(&query, max_rows, start_row, lang.as_deref());
        }
        Command::Interactive => return Ok(()),
    }

    let mut observer = PrintObserver::default();
    lookup.run_until_idle(&mut observer).await;

    match observer.failure {
        Some(err) => Err(CliError::Lookup(err)),
        None => Ok(()),
    }
}
