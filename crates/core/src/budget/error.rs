//! Budget error types.

use chrono::NaiveDate;
use hearth_shared::AppError;
use hearth_shared::types::AmountError;
use thiserror::Error;

/// Errors raised when budget data is rejected at the write boundary.
///
/// Aggregation itself never fails; these only come out of validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Transaction amount is missing, non-numeric, zero or negative.
    #[error("Please enter a valid amount: {0}")]
    InvalidAmount(#[source] AmountError),

    /// Budget allocation is negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Name is empty.
    #[error("Name is required")]
    MissingName,

    /// Monthly limit was given but is not a positive number.
    #[error("Invalid monthly limit: {0}")]
    InvalidMonthlyLimit(#[source] AmountError),

    /// Budget category without a budget.
    #[error("Please select a budget")]
    MissingBudgetReference,

    /// Budget window ends before it starts.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::Validation(err.to_string())
    }
}
