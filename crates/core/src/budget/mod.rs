//! Budget tracking: aggregation, validation and display.

pub mod aggregator;
pub mod display;
pub mod error;
pub mod types;
pub mod validation;


pub use aggregator::BudgetAggregator;
pub use display::{BudgetHealth, format_amount, format_usage};
pub use error::BudgetError;
pub use types::{
    Budget, BudgetCategory, BudgetOverview, BudgetSummary, CategoryKind, CategorySummary,
    CategoryTypeInput, HouseholdStats, NewBudget, NewCategory, NewTransaction, Transaction,
    TransactionType,
};
pub use validation::BudgetValidator;
