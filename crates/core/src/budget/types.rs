//! Budget data types.

use chrono::{DateTime, NaiveDate, Utc};
use hearth_shared::types::{BudgetId, CategoryId, HouseholdId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money coming into the household.
    Income,
    /// Money leaving the household.
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Stored values are compared exactly; "Expense" is not an expense.
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}

/// Category classification.
///
/// A budget category always names its budget, a general category never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category_type", content = "budget_id", rename_all = "snake_case")]
pub enum CategoryKind {
    /// Free-standing category, not rolled up into any budget.
    General,
    /// Category whose spending rolls up into the referenced budget.
    Budget(BudgetId),
}

/// A budget record: a named allocation of funds over a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning household.
    pub household_id: HouseholdId,
    /// Budget name.
    pub name: String,
    /// First day of the budget window.
    pub start_date: NaiveDate,
    /// Last day of the budget window.
    pub end_date: NaiveDate,
    /// Total allocated amount.
    pub total_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A spending category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Owning household.
    pub household_id: HouseholdId,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour (e.g. `#3f51b5`).
    pub color: Option<String>,
    /// Optional monthly spending limit.
    pub monthly_limit: Option<Decimal>,
    /// General or budget-linked.
    pub kind: CategoryKind,
}

impl BudgetCategory {
    /// Returns the budget this category rolls up into, if any.
    #[must_use]
    pub const fn budget_id(&self) -> Option<BudgetId> {
        match self.kind {
            CategoryKind::Budget(budget_id) => Some(budget_id),
            CategoryKind::General => None,
        }
    }
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning household.
    pub household_id: HouseholdId,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// Category, if the transaction was categorised.
    pub category_id: Option<CategoryId>,
    /// Optional description.
    pub description: Option<String>,
    /// Day the transaction happened, when recorded separately from creation.
    pub date: Option<NaiveDate>,
    /// Member who recorded the transaction.
    pub created_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns true for expense transactions.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Returns true for income transactions.
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// The day used for date-range scoping: the transaction date, else the creation day.
    #[must_use]
    pub fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| self.created_at.date_naive())
    }
}

/// Household-level totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdStats {
    /// Sum of income transactions.
    pub total_income: Decimal,
    /// Sum of expense transactions.
    pub total_expenses: Decimal,
    /// Sum of all budget allocations.
    pub total_budget_allocated: Decimal,
    /// Allocated funds plus net cash flow.
    pub balance: Decimal,
}

impl HouseholdStats {
    /// Income minus expenses, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn net_income(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expenses)
    }
}

/// Spend figures for one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub name: String,
    /// First day of the budget window.
    pub start_date: NaiveDate,
    /// Last day of the budget window.
    pub end_date: NaiveDate,
    /// Allocated amount.
    pub total_amount: Decimal,
    /// Expenses booked against the budget's categories.
    pub spent: Decimal,
    /// `total_amount - spent`; negative when overspent.
    pub remaining: Decimal,
    /// `spent / total_amount * 100`, unclamped; zero for a zero allocation.
    pub usage_percentage: Decimal,
    /// Categories linked to this budget.
    pub category_ids: Vec<CategoryId>,
}

/// Spend figure for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub name: String,
    /// General or budget-linked.
    pub kind: CategoryKind,
    /// Optional monthly spending limit.
    pub monthly_limit: Option<Decimal>,
    /// Expenses booked against the category.
    pub spent: Decimal,
}

/// Everything derived from a household's budgets, categories and transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverview {
    /// Household totals.
    pub stats: HouseholdStats,
    /// One entry per budget, in input order.
    pub budget_summaries: Vec<BudgetSummary>,
    /// One entry per category, in input order.
    pub category_summaries: Vec<CategorySummary>,
}

impl BudgetOverview {
    /// Looks up the summary for a budget.
    #[must_use]
    pub fn budget(&self, budget_id: BudgetId) -> Option<&BudgetSummary> {
        self.budget_summaries
            .iter()
            .find(|summary| summary.budget_id == budget_id)
    }

    /// Looks up the summary for a category.
    #[must_use]
    pub fn category(&self, category_id: CategoryId) -> Option<&CategorySummary> {
        self.category_summaries
            .iter()
            .find(|summary| summary.category_id == category_id)
    }
}

/// Form input for creating a budget.
#[derive(Debug, Clone)]
pub struct NewBudget {
    /// Owning household.
    pub household_id: HouseholdId,
    /// Budget name.
    pub name: String,
    /// First day of the budget window.
    pub start_date: NaiveDate,
    /// Last day of the budget window.
    pub end_date: NaiveDate,
    /// Allocated amount as typed.
    pub total_amount: String,
}

/// Form input for creating or editing a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning household.
    pub household_id: HouseholdId,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour.
    pub color: Option<String>,
    /// Monthly limit as typed; empty means no limit.
    pub monthly_limit: String,
    /// Requested kind.
    pub category_type: CategoryTypeInput,
    /// Selected budget, required for budget categories.
    pub budget_id: Option<BudgetId>,
}

/// Category type as chosen on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTypeInput {
    /// General category.
    General,
    /// Budget category.
    Budget,
}

/// Form input for recording a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning household.
    pub household_id: HouseholdId,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Amount as typed.
    pub amount: String,
    /// Selected category; `None` leaves the transaction uncategorised.
    pub category_id: Option<CategoryId>,
    /// Optional description.
    pub description: Option<String>,
    /// Day the transaction happened.
    pub date: Option<NaiveDate>,
    /// Member recording the transaction.
    pub created_by: Option<UserId>,
}
