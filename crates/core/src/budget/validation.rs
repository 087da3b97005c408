//! Write-boundary validation for budgets, categories and transactions.
//!
//! Form input arrives as text. Everything that reaches the aggregator through
//! these functions already satisfies the data-model invariants.

use chrono::{DateTime, Utc};
use hearth_shared::types::{
    BudgetId, CategoryId, TransactionId, parse_amount, parse_positive_amount,
};
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{
    Budget, BudgetCategory, CategoryKind, CategoryTypeInput, NewBudget, NewCategory,
    NewTransaction, Transaction,
};

/// Validation rules applied before records are stored.
pub struct BudgetValidator;

impl BudgetValidator {
    /// Validates a transaction amount as typed.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidAmount` if the input is empty, non-numeric, zero or negative.
    pub fn validate_transaction_amount(input: &str) -> Result<Decimal, BudgetError> {
        parse_positive_amount(input).map_err(BudgetError::InvalidAmount)
    }

    /// Validates a new transaction and builds the stored record.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidAmount` if the amount is not a positive number.
    pub fn validate_new_transaction(
        input: NewTransaction,
        id: TransactionId,
        created_at: DateTime<Utc>,
    ) -> Result<Transaction, BudgetError> {
        let amount = Self::validate_transaction_amount(&input.amount)?;

        Ok(Transaction {
            id,
            household_id: input.household_id,
            transaction_type: input.transaction_type,
            amount,
            category_id: input.category_id,
            description: non_empty(input.description),
            date: input.date,
            created_by: input.created_by,
            created_at,
        })
    }

    /// Validates a new or edited category and builds the stored record.
    ///
    /// A general category drops any selected budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MissingName` for a blank name,
    /// `BudgetError::InvalidMonthlyLimit` for a limit that is not a positive number,
    /// and `BudgetError::MissingBudgetReference` for a budget category without a budget.
    pub fn validate_new_category(
        input: NewCategory,
        id: CategoryId,
    ) -> Result<BudgetCategory, BudgetError> {
        let name = required_name(&input.name)?;

        let monthly_limit = if input.monthly_limit.trim().is_empty() {
            None
        } else {
            Some(
                parse_positive_amount(&input.monthly_limit)
                    .map_err(BudgetError::InvalidMonthlyLimit)?,
            )
        };

        let kind = match input.category_type {
            CategoryTypeInput::General => CategoryKind::General,
            CategoryTypeInput::Budget => CategoryKind::Budget(
                input
                    .budget_id
                    .ok_or(BudgetError::MissingBudgetReference)?,
            ),
        };

        Ok(BudgetCategory {
            id,
            household_id: input.household_id,
            name,
            description: non_empty(input.description),
            color: non_empty(input.color),
            monthly_limit,
            kind,
        })
    }

    /// Validates a new budget and builds the stored record.
    ///
    /// An unparsable allocation is stored as zero.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MissingName` for a blank name,
    /// `BudgetError::NegativeAmount` for a negative allocation,
    /// and `BudgetError::InvalidDateRange` if the window ends before it starts.
    pub fn validate_new_budget(
        input: NewBudget,
        id: BudgetId,
        created_at: DateTime<Utc>,
    ) -> Result<Budget, BudgetError> {
        let name = required_name(&input.name)?;

        let total_amount = match parse_amount(&input.total_amount) {
            Ok(amount) if amount < Decimal::ZERO => return Err(BudgetError::NegativeAmount),
            Ok(amount) => amount,
            Err(_) => Decimal::ZERO,
        };

        if input.end_date < input.start_date {
            return Err(BudgetError::InvalidDateRange {
                start: input.start_date,
                end: input.end_date,
            });
        }

        Ok(Budget {
            id,
            household_id: input.household_id,
            name,
            start_date: input.start_date,
            end_date: input.end_date,
            total_amount,
            created_at,
        })
    }
}

fn required_name(name: &str) -> Result<String, BudgetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::MissingName);
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
