//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::HouseholdId;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Household snapshot configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where household data is read from.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the JSON export of a household's budget tables.
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
    /// Household to report on. When unset the snapshot's own household is used.
    #[serde(default)]
    pub household_id: Option<HouseholdId>,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/household.json")
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            household_id: None,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Report rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Symbol prefixed to amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Decimal places for amounts.
    #[serde(default = "default_amount_decimals")]
    pub amount_decimals: u32,
    /// Decimal places for percentages.
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: u32,
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_amount_decimals() -> u32 {
    2
}

fn default_percent_decimals() -> u32 {
    1
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            amount_decimals: default_amount_decimals(),
            percent_decimals: default_percent_decimals(),
            format: OutputFormat::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "hearth=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("HEARTH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
