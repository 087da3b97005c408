//! Hearth household report.
//!
//! Reads a household snapshot, aggregates it and prints the overview.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hearth_core::source::{HouseholdDataSource, JsonFileSource};
use hearth_shared::config::LoggingConfig;
use hearth_shared::{AppConfig, AppError, OutputFormat};

use cli::Cli;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("error: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(&config.logging);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(err.downcast_ref::<AppError>().map_or(1, AppError::exit_code))
        }
    }
}

/// Logs go to stderr; stdout carries only the report.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot.path.clone());
    let household = cli.household.or(config.snapshot.household_id);

    let source = JsonFileSource::load(&path, household).map_err(AppError::from)?;
    let household = source.household_id();
    info!(
        household_id = %household,
        path = %path.display(),
        month = ?cli.month,
        "Building household overview"
    );

    let overview = source
        .overview(household, cli.month.as_ref())
        .map_err(AppError::from)?;

    let format = cli.format.map_or(config.display.format, OutputFormat::from);
    let output = match format {
        OutputFormat::Text => overview.render_text(&config.display),
        OutputFormat::Json => serde_json::to_string_pretty(&overview)
            .map_err(|err| AppError::Internal(err.to_string()))?,
    };

    println!("{output}");
    Ok(())
}
