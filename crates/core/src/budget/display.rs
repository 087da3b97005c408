//! Presentation helpers for aggregated budget figures.

use hearth_shared::DisplayConfig;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::types::{BudgetOverview, BudgetSummary, CategoryKind, CategorySummary};

/// Whether a budget still has funds left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Remaining is zero or positive.
    WithinBudget,
    /// Spending exceeded the allocation.
    Overspent,
}

impl BudgetSummary {
    /// Usage clamped to `[0, 100]` for progress bars.
    #[must_use]
    pub fn progress_percentage(&self) -> Decimal {
        self.usage_percentage
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Classifies the budget by its remaining amount.
    #[must_use]
    pub fn health(&self) -> BudgetHealth {
        if self.remaining.is_sign_negative() && !self.remaining.is_zero() {
            BudgetHealth::Overspent
        } else {
            BudgetHealth::WithinBudget
        }
    }
}

/// Formats an amount with the configured symbol and precision, e.g. `$120.00` or `-$50.00`.
#[must_use]
pub fn format_amount(amount: Decimal, display: &DisplayConfig) -> String {
    let rounded = round(amount, display.amount_decimals);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{:.prec$}",
        display.currency_symbol,
        rounded.abs(),
        prec = display.amount_decimals as usize
    )
}

/// Formats a usage percentage, e.g. `24.0% used`.
#[must_use]
pub fn format_usage(percentage: Decimal, display: &DisplayConfig) -> String {
    format!(
        "{:.prec$}% used",
        round(percentage, display.percent_decimals),
        prec = display.percent_decimals as usize
    )
}

fn round(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

impl BudgetOverview {
    /// Renders the overview as a plain-text report.
    #[must_use]
    pub fn render_text(&self, display: &DisplayConfig) -> String {
        let money = |amount: Decimal| format_amount(amount, display);
        let mut lines = vec![
            "Household budget".to_string(),
            format!("  Total income:     {}", money(self.stats.total_income)),
            format!("  Total expenses:   {}", money(self.stats.total_expenses)),
            format!("  Budget allocated: {}", money(self.stats.total_budget_allocated)),
            format!("  Balance:          {}", money(self.stats.balance)),
        ];

        lines.push(String::new());
        lines.push("Budgets".to_string());
        if self.budget_summaries.is_empty() {
            lines.push("  No budgets created yet.".to_string());
        }
        for budget in &self.budget_summaries {
            let flag = match budget.health() {
                BudgetHealth::WithinBudget => "",
                BudgetHealth::Overspent => " [overspent]",
            };
            lines.push(format!(
                "  {} ({} to {}){flag}",
                budget.name, budget.start_date, budget.end_date
            ));
            lines.push(format!(
                "    Budget {} | Spent {} | Remaining {} | {}",
                money(budget.total_amount),
                money(budget.spent),
                money(budget.remaining),
                format_usage(budget.usage_percentage, display)
            ));
            let names: Vec<&str> = budget
                .category_ids
                .iter()
                .filter_map(|id| self.category(*id))
                .map(|category| category.name.as_str())
                .collect();
            if names.is_empty() {
                lines.push("    No categories assigned to this budget.".to_string());
            } else {
                lines.push(format!("    Categories: {}", names.join(", ")));
            }
        }

        lines.push(String::new());
        lines.push("Categories".to_string());
        if self.category_summaries.is_empty() {
            lines.push("  No categories defined.".to_string());
        }
        for category in &self.category_summaries {
            lines.push(self.category_line(category, display));
        }

        lines.join("\n")
    }

    fn category_line(&self, category: &CategorySummary, display: &DisplayConfig) -> String {
        let scope = match category.kind {
            CategoryKind::General => "general".to_string(),
            CategoryKind::Budget(budget_id) => match self.budget(budget_id) {
                Some(budget) => format!("budget: {}", budget.name),
                None => "budget".to_string(),
            },
        };
        let mut line = format!(
            "  {} ({scope}) spent {}",
            category.name,
            format_amount(category.spent, display)
        );
        if let Some(limit) = category.monthly_limit {
            line.push_str(&format!(" of {} monthly limit", format_amount(limit, display)));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hearth_shared::types::{BudgetId, CategoryId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn summary(total_amount: Decimal, spent: Decimal, usage: Decimal) -> BudgetSummary {
        BudgetSummary {
            budget_id: BudgetId::new(),
            name: "Groceries".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            total_amount,
            spent,
            remaining: total_amount - spent,
            usage_percentage: usage,
            category_ids: Vec::new(),
        }
    }

    #[rstest]
    #[case(dec!(24), dec!(24))]
    #[case(dec!(150), dec!(100))]
    #[case(dec!(0), dec!(0))]
    fn test_progress_percentage_is_clamped(#[case] usage: Decimal, #[case] expected: Decimal) {
        let budget = summary(dec!(100), usage, usage);
        assert_eq!(budget.progress_percentage(), expected);
        assert_eq!(budget.usage_percentage, usage);
    }

    #[test]
    fn test_health() {
        assert_eq!(
            summary(dec!(100), dec!(100), dec!(100)).health(),
            BudgetHealth::WithinBudget
        );
        assert_eq!(
            summary(dec!(100), dec!(150), dec!(150)).health(),
            BudgetHealth::Overspent
        );
    }

    #[rstest]
    #[case(dec!(120), "$120.00")]
    #[case(dec!(0.005), "$0.01")]
    #[case(dec!(-50), "-$50.00")]
    #[case(dec!(1380.5), "$1380.50")]
    fn test_format_amount(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(amount, &DisplayConfig::default()), expected);
    }

    #[test]
    fn test_format_usage() {
        let display = DisplayConfig::default();
        assert_eq!(format_usage(dec!(24), &display), "24.0% used");
        assert_eq!(format_usage(dec!(33.333), &display), "33.3% used");
        assert_eq!(format_usage(dec!(150), &display), "150.0% used");
    }

    #[test]
    fn test_render_text_lists_budgets_and_categories() {
        let mut budget = summary(dec!(100), dec!(150), dec!(150));
        let category_id = CategoryId::new();
        budget.category_ids.push(category_id);
        let overview = BudgetOverview {
            stats: crate::budget::types::HouseholdStats::default(),
            category_summaries: vec![CategorySummary {
                category_id,
                name: "Food".to_string(),
                kind: CategoryKind::Budget(budget.budget_id),
                monthly_limit: Some(dec!(200)),
                spent: dec!(150),
            }],
            budget_summaries: vec![budget],
        };

        let text = overview.render_text(&DisplayConfig::default());

        assert!(text.contains("Groceries (2024-06-01 to 2024-06-30) [overspent]"));
        assert!(text.contains("Remaining -$50.00 | 150.0% used"));
        assert!(text.contains("Categories: Food"));
        assert!(text.contains("Food (budget: Groceries) spent $150.00 of $200.00 monthly limit"));
    }

    #[test]
    fn test_render_text_empty_overview() {
        let text = BudgetOverview::default().render_text(&DisplayConfig::default());
        assert!(text.contains("Balance:          $0.00"));
        assert!(text.contains("No budgets created yet."));
        assert!(text.contains("No categories defined."));
    }
}
