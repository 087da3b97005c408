//! Household data sources.
//!
//! A source answers "give me the budgets, categories and transactions of
//! household H", optionally scoped to a date range. The aggregator never
//! reads storage itself; it is fed whatever a source returns.

pub mod error;
pub mod file;
pub mod memory;
pub mod records;

pub use error::SourceError;
pub use file::JsonFileSource;
pub use memory::InMemorySource;
pub use records::{HouseholdRecords, HouseholdSnapshot, RawBudget, RawCategory, RawTransaction};

use hearth_shared::types::{DateRange, HouseholdId};
use tracing::debug;

use crate::budget::{Budget, BudgetAggregator, BudgetCategory, BudgetOverview, Transaction};

/// Read access to one or more households' budget data.
pub trait HouseholdDataSource: Send + Sync {
    /// Budgets whose window overlaps `range`, or all budgets when `range` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownHousehold`] if the source holds no such household.
    fn budgets(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Budget>, SourceError>;

    /// All categories of the household.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownHousehold`] if the source holds no such household.
    fn categories(&self, household: HouseholdId) -> Result<Vec<BudgetCategory>, SourceError>;

    /// Transactions whose effective date falls in `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownHousehold`] if the source holds no such household.
    fn transactions(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Transaction>, SourceError>;

    /// Fetches the household's data and aggregates it.
    ///
    /// # Errors
    ///
    /// Propagates any error from the three fetches.
    fn overview(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<BudgetOverview, SourceError> {
        let budgets = self.budgets(household, range)?;
        let categories = self.categories(household)?;
        let transactions = self.transactions(household, range)?;

        debug!(
            household_id = %household,
            budgets = budgets.len(),
            categories = categories.len(),
            transactions = transactions.len(),
            "Loaded household data"
        );

        Ok(BudgetAggregator::aggregate(
            &budgets,
            &categories,
            &transactions,
        ))
    }
}
