//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hearth_shared::OutputFormat;
use hearth_shared::types::{DateRange, HouseholdId};

/// Summarise a household's budgets, categories and transactions.
#[derive(Debug, Parser)]
#[command(name = "hearth-report", version)]
pub struct Cli {
    /// Household snapshot to read [default: `snapshot.path` from configuration]
    pub snapshot: Option<PathBuf>,

    /// Only include budgets and transactions in this calendar month (YYYY-MM)
    #[arg(short, long, value_parser = DateRange::parse_month)]
    pub month: Option<DateRange>,

    /// Household to report on [default: the snapshot's household]
    #[arg(long)]
    pub household: Option<HouseholdId>,

    /// Output format [default: `display.format` from configuration]
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

/// Output format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Plain-text report
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}
