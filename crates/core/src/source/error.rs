//! Data source error types.

use std::path::PathBuf;

use hearth_shared::AppError;
use hearth_shared::types::HouseholdId;
use thiserror::Error;

/// Errors reading household data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Snapshot file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON or does not match the stored row shape.
    #[error("failed to parse household snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// Neither the caller nor the snapshot named a household.
    #[error("snapshot does not name a household")]
    MissingHousehold,

    /// No data is held for the household.
    #[error("unknown household: {0}")]
    UnknownHousehold(HouseholdId),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::UnknownHousehold(_) => Self::NotFound(err.to_string()),
            SourceError::Io { .. } | SourceError::Parse(_) | SourceError::MissingHousehold => {
                Self::DataSource(err.to_string())
            }
        }
    }
}
