//! Household snapshot files.
//!
//! A snapshot is a JSON export of the three budget tables for one household:
//!
//! ```json
//! {
//!   "household_id": "…",
//!   "budgets": [ … ],
//!   "categories": [ … ],
//!   "transactions": [ … ]
//! }
//! ```

use std::path::{Path, PathBuf};

use hearth_shared::types::{DateRange, HouseholdId};
use tracing::info;

use super::{HouseholdDataSource, HouseholdSnapshot, InMemorySource, SourceError};
use crate::budget::{Budget, BudgetCategory, Transaction};

/// A data source backed by a snapshot file, read once at load time.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    household_id: HouseholdId,
    inner: InMemorySource,
}

impl JsonFileSource {
    /// Reads and converts a snapshot.
    ///
    /// `household` overrides the id recorded in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if no
    /// household id is available.
    pub fn load(
        path: impl AsRef<Path>,
        household: Option<HouseholdId>,
    ) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&contents, household).map(|source| Self { path, ..source })
    }

    /// Converts snapshot text without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or no household id is available.
    pub fn from_json(contents: &str, household: Option<HouseholdId>) -> Result<Self, SourceError> {
        let snapshot: HouseholdSnapshot = serde_json::from_str(contents)?;
        let household_id = household
            .or(snapshot.household_id)
            .ok_or(SourceError::MissingHousehold)?;

        let records = snapshot.into_records();
        info!(
            household_id = %household_id,
            budgets = records.budgets.len(),
            categories = records.categories.len(),
            transactions = records.transactions.len(),
            "Loaded household snapshot"
        );

        Ok(Self {
            path: PathBuf::new(),
            household_id,
            inner: InMemorySource::new().with_household(household_id, records),
        })
    }

    /// Household the snapshot was loaded for.
    #[must_use]
    pub const fn household_id(&self) -> HouseholdId {
        self.household_id
    }

    /// File the snapshot was read from; empty for [`from_json`](Self::from_json).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HouseholdDataSource for JsonFileSource {
    fn budgets(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Budget>, SourceError> {
        self.inner.budgets(household, range)
    }

    fn categories(&self, household: HouseholdId) -> Result<Vec<BudgetCategory>, SourceError> {
        self.inner.categories(household)
    }

    fn transactions(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Transaction>, SourceError> {
        self.inner.transactions(household, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"{
        "household_id": "0191c2a0-0000-7000-8000-000000000001",
        "budgets": [],
        "categories": [],
        "transactions": [
            {
                "id": "0191c2a0-0000-7000-8000-0000000000f1",
                "household_id": "0191c2a0-0000-7000-8000-000000000001",
                "transaction_type": "income",
                "amount": "2500.00",
                "created_at": "2024-06-01T09:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let source = JsonFileSource::load(file.path(), None).unwrap();
        let household = HouseholdId::from_str("0191c2a0-0000-7000-8000-000000000001").unwrap();

        assert_eq!(source.household_id(), household);
        assert_eq!(source.path(), file.path());
        let overview = source.overview(household, None).unwrap();
        assert_eq!(overview.stats.total_income, dec!(2500));
        assert_eq!(overview.stats.balance, dec!(2500));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::load(dir.path().join("absent.json"), None).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = JsonFileSource::from_json("{ not json", None).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_missing_household() {
        let err = JsonFileSource::from_json(r#"{"budgets": []}"#, None).unwrap_err();
        assert!(matches!(err, SourceError::MissingHousehold));

        let household = HouseholdId::new();
        let source = JsonFileSource::from_json(r#"{"budgets": []}"#, Some(household)).unwrap();
        assert_eq!(source.household_id(), household);
    }

    #[test]
    fn test_override_household_scopes_rows() {
        let other = HouseholdId::new();
        let source = JsonFileSource::from_json(SNAPSHOT, Some(other)).unwrap();

        // Rows belong to the snapshot's household, not the override.
        let overview = source.overview(other, None).unwrap();
        assert_eq!(overview.stats.total_income, rust_decimal::Decimal::ZERO);
    }
}
