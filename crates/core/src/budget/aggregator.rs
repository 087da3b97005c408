//! Budget aggregation: household totals, per-budget and per-category spend.
//!
//! Every function here is pure. Inputs are borrowed, outputs are freshly
//! allocated, and nothing depends on the order transactions arrive in.
//! Sums that leave the `Decimal` range saturate at its bounds instead of
//! panicking.

use std::collections::HashMap;

use hearth_shared::types::{BudgetId, CategoryId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{
    Budget, BudgetCategory, BudgetOverview, BudgetSummary, CategoryKind, CategorySummary,
    HouseholdStats, Transaction, TransactionType,
};

/// Computes derived budget figures from a household's records.
pub struct BudgetAggregator;

impl BudgetAggregator {
    /// Computes household totals plus one summary per budget and per category.
    ///
    /// Summaries follow the input order of `budgets` and `categories`.
    #[must_use]
    pub fn aggregate(
        budgets: &[Budget],
        categories: &[BudgetCategory],
        transactions: &[Transaction],
    ) -> BudgetOverview {
        let index = SpendIndex::build(categories, transactions);

        let overview = BudgetOverview {
            stats: Self::household_stats(budgets, transactions),
            budget_summaries: budgets
                .iter()
                .map(|budget| index.budget_summary(budget))
                .collect(),
            category_summaries: categories
                .iter()
                .map(|category| index.category_summary(category))
                .collect(),
        };

        debug!(
            budgets = budgets.len(),
            categories = categories.len(),
            transactions = transactions.len(),
            balance = %overview.stats.balance,
            "Aggregated household budget"
        );

        overview
    }

    /// Household totals.
    ///
    /// `balance = total_budget_allocated + (total_income - total_expenses)`.
    #[must_use]
    pub fn household_stats(budgets: &[Budget], transactions: &[Transaction]) -> HouseholdStats {
        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => {
                    total_income = accumulate(total_income, transaction.amount, "total_income");
                }
                TransactionType::Expense => {
                    total_expenses =
                        accumulate(total_expenses, transaction.amount, "total_expenses");
                }
            }
        }

        let total_budget_allocated = budgets.iter().fold(Decimal::ZERO, |total, b| {
            accumulate(total, b.total_amount, "total_budget_allocated")
        });
        let mut stats = HouseholdStats {
            total_income,
            total_expenses,
            total_budget_allocated,
            balance: Decimal::ZERO,
        };
        stats.balance = accumulate(total_budget_allocated, stats.net_income(), "balance");
        stats
    }

    /// One summary per budget.
    #[must_use]
    pub fn budget_summaries(
        budgets: &[Budget],
        categories: &[BudgetCategory],
        transactions: &[Transaction],
    ) -> Vec<BudgetSummary> {
        let index = SpendIndex::build(categories, transactions);
        budgets
            .iter()
            .map(|budget| index.budget_summary(budget))
            .collect()
    }

    /// One summary per category.
    #[must_use]
    pub fn category_summaries(
        categories: &[BudgetCategory],
        transactions: &[Transaction],
    ) -> Vec<CategorySummary> {
        let index = SpendIndex::build(categories, transactions);
        categories
            .iter()
            .map(|category| index.category_summary(category))
            .collect()
    }

    /// Sum of expense transactions booked against `category_id`.
    #[must_use]
    pub fn category_spent(category_id: CategoryId, transactions: &[Transaction]) -> Decimal {
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.category_id == Some(category_id))
            .fold(Decimal::ZERO, |total, t| {
                accumulate(total, t.amount, "category_spent")
            })
    }

    /// `spent / total * 100`, or zero when `total` is not positive.
    ///
    /// The result is not clamped; 150 means 50% overspent. A ratio beyond the
    /// `Decimal` range saturates at `Decimal::MAX` (or `MIN` for negative spend).
    #[must_use]
    pub fn usage_percentage(spent: Decimal, total: Decimal) -> Decimal {
        if total <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        spent
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or_else(|| {
                warn!(%spent, %total, "Usage percentage exceeds the decimal range, saturating");
                if spent.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            })
    }
}

/// Adds `amount` to `total`, saturating at the `Decimal` bounds.
fn accumulate(total: Decimal, amount: Decimal, figure: &'static str) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!(figure, %total, %amount, "Total exceeds the decimal range, saturating");
        total.saturating_add(amount)
    })
}

/// Expense totals keyed by category and by budget, built in one pass.
struct SpendIndex {
    by_category: HashMap<CategoryId, Decimal>,
    by_budget: HashMap<BudgetId, Decimal>,
    members: HashMap<BudgetId, Vec<CategoryId>>,
}

impl SpendIndex {
    fn build(categories: &[BudgetCategory], transactions: &[Transaction]) -> Self {
        // A category id may appear on several rows; each owning budget counts once.
        let mut owners: HashMap<CategoryId, Vec<BudgetId>> = HashMap::new();
        let mut members: HashMap<BudgetId, Vec<CategoryId>> = HashMap::new();

        for category in categories {
            if let CategoryKind::Budget(budget_id) = category.kind {
                let budgets = owners.entry(category.id).or_default();
                if !budgets.contains(&budget_id) {
                    budgets.push(budget_id);
                }
                let ids = members.entry(budget_id).or_default();
                if !ids.contains(&category.id) {
                    ids.push(category.id);
                }
            }
        }

        let mut by_category: HashMap<CategoryId, Decimal> = HashMap::new();
        let mut by_budget: HashMap<BudgetId, Decimal> = HashMap::new();

        for transaction in transactions.iter().filter(|t| t.is_expense()) {
            let Some(category_id) = transaction.category_id else {
                continue;
            };

            let spent = by_category.entry(category_id).or_default();
            *spent = accumulate(*spent, transaction.amount, "category_spent");

            for budget_id in owners.get(&category_id).into_iter().flatten() {
                let spent = by_budget.entry(*budget_id).or_default();
                *spent = accumulate(*spent, transaction.amount, "budget_spent");
            }
        }

        Self {
            by_category,
            by_budget,
            members,
        }
    }

    fn budget_summary(&self, budget: &Budget) -> BudgetSummary {
        let spent = self
            .by_budget
            .get(&budget.id)
            .copied()
            .unwrap_or(Decimal::ZERO);

        BudgetSummary {
            budget_id: budget.id,
            name: budget.name.clone(),
            start_date: budget.start_date,
            end_date: budget.end_date,
            total_amount: budget.total_amount,
            spent,
            remaining: budget.total_amount.checked_sub(spent).unwrap_or_else(|| {
                warn!(budget_id = %budget.id, "Remaining amount exceeds the decimal range, saturating");
                budget.total_amount.saturating_sub(spent)
            }),
            usage_percentage: BudgetAggregator::usage_percentage(spent, budget.total_amount),
            category_ids: self.members.get(&budget.id).cloned().unwrap_or_default(),
        }
    }

    fn category_summary(&self, category: &BudgetCategory) -> CategorySummary {
        CategorySummary {
            category_id: category.id,
            name: category.name.clone(),
            kind: category.kind,
            monthly_limit: category.monthly_limit,
            spent: self
                .by_category
                .get(&category.id)
                .copied()
                .unwrap_or(Decimal::ZERO),
        }
    }
}
