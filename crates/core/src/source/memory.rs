//! In-memory household data source.

use std::cmp::Reverse;
use std::collections::HashMap;

use hearth_shared::types::{DateRange, HouseholdId};
use tracing::warn;

use super::{HouseholdDataSource, HouseholdRecords, SourceError};
use crate::budget::{Budget, BudgetCategory, Transaction};

/// Holds household records in memory, keyed by household.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    households: HashMap<HouseholdId, HouseholdRecords>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores records for `household`, replacing any held before.
    ///
    /// Rows that belong to another household are dropped.
    pub fn insert(&mut self, household: HouseholdId, mut records: HouseholdRecords) {
        let before =
            records.budgets.len() + records.categories.len() + records.transactions.len();

        records.budgets.retain(|b| b.household_id == household);
        records.categories.retain(|c| c.household_id == household);
        records.transactions.retain(|t| t.household_id == household);

        let dropped = before
            - (records.budgets.len() + records.categories.len() + records.transactions.len());
        if dropped > 0 {
            warn!(household_id = %household, dropped, "Dropped rows belonging to another household");
        }

        self.households.insert(household, records);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_household(mut self, household: HouseholdId, records: HouseholdRecords) -> Self {
        self.insert(household, records);
        self
    }

    fn records(&self, household: HouseholdId) -> Result<&HouseholdRecords, SourceError> {
        self.households
            .get(&household)
            .ok_or(SourceError::UnknownHousehold(household))
    }
}

impl HouseholdDataSource for InMemorySource {
    fn budgets(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Budget>, SourceError> {
        Ok(self
            .records(household)?
            .budgets
            .iter()
            .filter(|b| range.is_none_or(|r| r.overlaps(b.start_date, b.end_date)))
            .cloned()
            .collect())
    }

    fn categories(&self, household: HouseholdId) -> Result<Vec<BudgetCategory>, SourceError> {
        Ok(self.records(household)?.categories.clone())
    }

    fn transactions(
        &self,
        household: HouseholdId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Transaction>, SourceError> {
        let mut transactions: Vec<Transaction> = self
            .records(household)?
            .transactions
            .iter()
            .filter(|t| range.is_none_or(|r| r.contains(t.effective_date())))
            .cloned()
            .collect();
        transactions.sort_by_key(|t| Reverse(t.created_at));
        Ok(transactions)
    }
}
