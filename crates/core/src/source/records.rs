//! Stored row shapes and their conversion into strict budget types.
//!
//! Rows come from a loosely typed store: amounts may be numbers, numeric
//! strings, empty strings or null, and optional references may be empty
//! strings. Conversion never fails on those; it degrades them and logs.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use hearth_shared::types::{
    BudgetId, CategoryId, HouseholdId, TransactionId, UserId, amount_from_json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::budget::{Budget, BudgetCategory, CategoryKind, Transaction, TransactionType};

/// A `budgets` row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBudget {
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
    /// Allocated amount, loosely typed.
    #[serde(default)]
    pub total_amount: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl RawBudget {
    /// Converts into a strict budget; an unusable allocation becomes zero.
    #[must_use]
    pub fn into_budget(self) -> Budget {
        let total_amount = amount_from_json(&self.total_amount).unwrap_or_else(|| {
            warn!(budget_id = %self.id, value = %self.total_amount, "Budget amount is not a number, using 0");
            Decimal::ZERO
        });

        Budget {
            id: self.id,
            household_id: self.household_id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            total_amount,
            created_at: self.created_at,
        }
    }
}

/// A `budget_categories` row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Owning household.
    pub household_id: HouseholdId,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour.
    pub color: Option<String>,
    /// Monthly limit, loosely typed.
    #[serde(default)]
    pub monthly_limit: Value,
    /// `"general"` or `"budget"`; missing means general.
    pub category_type: Option<String>,
    /// Linked budget, possibly an empty string.
    pub budget_id: Option<String>,
}

impl RawCategory {
    /// Converts into a strict category.
    ///
    /// Only a `"budget"` row with a usable budget id becomes a budget category;
    /// everything else is general.
    #[must_use]
    pub fn into_category(self) -> BudgetCategory {
        let budget_id = self
            .budget_id
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .and_then(|text| match BudgetId::from_str(text) {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(category_id = %self.id, budget_id = text, "Category budget reference is not a valid id");
                    None
                }
            });

        let is_budget_type = self
            .category_type
            .as_deref()
            .is_some_and(|kind| kind == "budget");

        let kind = match (is_budget_type, budget_id) {
            (true, Some(budget_id)) => CategoryKind::Budget(budget_id),
            (true, None) => {
                warn!(category_id = %self.id, "Budget category has no budget, treating as general");
                CategoryKind::General
            }
            (false, _) => CategoryKind::General,
        };

        let monthly_limit = match &self.monthly_limit {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            value => {
                let limit = amount_from_json(value);
                if limit.is_none() {
                    warn!(category_id = %self.id, value = %value, "Monthly limit is not a number, ignoring");
                }
                limit
            }
        };

        BudgetCategory {
            id: self.id,
            household_id: self.household_id,
            name: self.name,
            description: self.description,
            color: self.color,
            monthly_limit,
            kind,
        }
    }
}

/// A `transactions` row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning household.
    pub household_id: HouseholdId,
    /// `"income"` or `"expense"`.
    pub transaction_type: String,
    /// Amount, loosely typed.
    #[serde(default)]
    pub amount: Value,
    /// Category reference, possibly an empty string.
    pub category_id: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Transaction date as an ISO timestamp or `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Member who recorded the transaction.
    pub created_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl RawTransaction {
    /// Converts into a strict transaction.
    ///
    /// Returns `None` for a transaction type other than income or expense; such
    /// rows count toward no total. A malformed amount becomes zero and an
    /// unparsable category reference leaves the transaction uncategorised.
    #[must_use]
    pub fn into_transaction(self) -> Option<Transaction> {
        let Ok(transaction_type) = TransactionType::from_str(&self.transaction_type) else {
            warn!(
                transaction_id = %self.id,
                transaction_type = %self.transaction_type,
                "Skipping transaction with unknown type"
            );
            return None;
        };

        let amount = amount_from_json(&self.amount).unwrap_or_else(|| {
            warn!(transaction_id = %self.id, value = %self.amount, "Transaction amount is not a number, using 0");
            Decimal::ZERO
        });

        let category_id = self
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .and_then(|text| match CategoryId::from_str(text) {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(transaction_id = %self.id, category_id = text, "Category reference is not a valid id");
                    None
                }
            });

        let date = self.date.as_deref().and_then(|text| {
            let parsed = parse_transaction_date(text);
            if parsed.is_none() {
                warn!(transaction_id = %self.id, date = text, "Unrecognised transaction date, using creation day");
            }
            parsed
        });

        Some(Transaction {
            id: self.id,
            household_id: self.household_id,
            transaction_type,
            amount,
            category_id,
            description: self.description,
            date,
            created_by: self.created_by,
            created_at: self.created_at,
        })
    }
}

fn parse_transaction_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

/// A household's three budget tables as exported from storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdSnapshot {
    /// Household the export belongs to.
    #[serde(default)]
    pub household_id: Option<HouseholdId>,
    /// `budgets` rows.
    #[serde(default)]
    pub budgets: Vec<RawBudget>,
    /// `budget_categories` rows.
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    /// `transactions` rows.
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

impl HouseholdSnapshot {
    /// Converts every row into strict records.
    #[must_use]
    pub fn into_records(self) -> HouseholdRecords {
        HouseholdRecords {
            budgets: self.budgets.into_iter().map(RawBudget::into_budget).collect(),
            categories: self
                .categories
                .into_iter()
                .map(RawCategory::into_category)
                .collect(),
            transactions: self
                .transactions
                .into_iter()
                .filter_map(RawTransaction::into_transaction)
                .collect(),
        }
    }
}

/// Strictly typed household records, ready for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseholdRecords {
    /// Budgets.
    pub budgets: Vec<Budget>,
    /// Categories.
    pub categories: Vec<BudgetCategory>,
    /// Transactions.
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::budget::BudgetAggregator;

    const HOUSEHOLD: &str = "0191c2a0-0000-7000-8000-000000000001";
    const BUDGET: &str = "0191c2a0-0000-7000-8000-0000000000b1";
    const CATEGORY: &str = "0191c2a0-0000-7000-8000-0000000000c1";

    fn raw_transaction(amount: Value) -> RawTransaction {
        serde_json::from_value(json!({
            "id": "0191c2a0-0000-7000-8000-0000000000f1",
            "household_id": HOUSEHOLD,
            "transaction_type": "expense",
            "amount": amount,
            "category_id": CATEGORY,
            "created_at": "2024-06-03T10:15:00.000000+00:00",
        }))
        .unwrap()
    }

    fn raw_category(category_type: Value, budget_id: Value) -> RawCategory {
        serde_json::from_value(json!({
            "id": CATEGORY,
            "household_id": HOUSEHOLD,
            "name": "Food",
            "category_type": category_type,
            "budget_id": budget_id,
        }))
        .unwrap()
    }

    #[test]
    fn test_numeric_and_string_amounts() {
        let from_number = raw_transaction(json!(120)).into_transaction().unwrap();
        assert_eq!(from_number.amount, dec!(120));

        let from_string = raw_transaction(json!("45.50")).into_transaction().unwrap();
        assert_eq!(from_string.amount, dec!(45.50));
    }

    #[test]
    fn test_malformed_amounts_become_zero() {
        for amount in [json!(""), Value::Null, json!("twelve"), json!([1])] {
            let transaction = raw_transaction(amount).into_transaction().unwrap();
            assert_eq!(transaction.amount, Decimal::ZERO);
            assert!(transaction.category_id.is_some());
        }
    }

    #[test]
    fn test_missing_amount_field_becomes_zero() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "id": "0191c2a0-0000-7000-8000-0000000000f2",
            "household_id": HOUSEHOLD,
            "transaction_type": "income",
            "created_at": "2024-06-03T10:15:00Z",
        }))
        .unwrap();

        let transaction = raw.into_transaction().unwrap();
        assert_eq!(transaction.amount, Decimal::ZERO);
        assert_eq!(transaction.transaction_type, TransactionType::Income);
        assert_eq!(transaction.category_id, None);
    }

    #[test]
    fn test_empty_or_invalid_category_reference_is_uncategorised() {
        let mut raw = raw_transaction(json!(10));
        raw.category_id = Some(String::new());
        assert_eq!(raw.clone().into_transaction().unwrap().category_id, None);

        raw.category_id = Some("not-an-id".to_string());
        assert_eq!(raw.into_transaction().unwrap().category_id, None);
    }

    #[test]
    fn test_unknown_transaction_type_is_skipped() {
        for transaction_type in ["transfer", "Expense", "INCOME", " expense", ""] {
            let mut raw = raw_transaction(json!(10));
            raw.transaction_type = transaction_type.to_string();
            assert!(raw.into_transaction().is_none(), "{transaction_type:?}");
        }

        let mut raw = raw_transaction(json!(10));
        raw.transaction_type = "income".to_string();
        assert!(raw.into_transaction().unwrap().is_income());
    }

    #[test]
    fn test_transaction_date_formats() {
        let mut raw = raw_transaction(json!(10));
        raw.date = Some("2024-05-31T23:30:00.000Z".to_string());
        assert_eq!(
            raw.clone().into_transaction().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );

        raw.date = Some("2024-05-30".to_string());
        assert_eq!(
            raw.clone().into_transaction().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 5, 30)
        );

        raw.date = Some("yesterday".to_string());
        let transaction = raw.into_transaction().unwrap();
        assert_eq!(transaction.date, None);
        assert_eq!(
            transaction.effective_date(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
        );
    }

    #[test]
    fn test_category_kind_mapping() {
        let budget_id = BudgetId::from_str(BUDGET).unwrap();

        let linked = raw_category(json!("budget"), json!(BUDGET)).into_category();
        assert_eq!(linked.kind, CategoryKind::Budget(budget_id));

        let unlinked = raw_category(json!("budget"), Value::Null).into_category();
        assert_eq!(unlinked.kind, CategoryKind::General);

        let empty_link = raw_category(json!("budget"), json!("")).into_category();
        assert_eq!(empty_link.kind, CategoryKind::General);

        let general = raw_category(json!("general"), json!(BUDGET)).into_category();
        assert_eq!(general.kind, CategoryKind::General);

        let untyped = raw_category(Value::Null, Value::Null).into_category();
        assert_eq!(untyped.kind, CategoryKind::General);
    }

    #[test]
    fn test_monthly_limit_parsing() {
        let mut raw = raw_category(json!("general"), Value::Null);
        assert_eq!(raw.clone().into_category().monthly_limit, None);

        raw.monthly_limit = json!("250.00");
        assert_eq!(raw.clone().into_category().monthly_limit, Some(dec!(250)));

        raw.monthly_limit = json!("");
        assert_eq!(raw.clone().into_category().monthly_limit, None);

        raw.monthly_limit = json!("soon");
        assert_eq!(raw.into_category().monthly_limit, None);
    }

    #[test]
    fn test_budget_amount_fallback() {
        let raw: RawBudget = serde_json::from_value(json!({
            "id": BUDGET,
            "household_id": HOUSEHOLD,
            "name": "June",
            "start_date": "2024-06-01",
            "end_date": "2024-06-30",
            "total_amount": null,
            "created_at": "2024-06-01T08:00:00Z",
        }))
        .unwrap();

        assert_eq!(raw.into_budget().total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_into_records() {
        let snapshot: HouseholdSnapshot = serde_json::from_value(json!({
            "household_id": HOUSEHOLD,
            "transactions": [
                {
                    "id": "0191c2a0-0000-7000-8000-0000000000f1",
                    "household_id": HOUSEHOLD,
                    "transaction_type": "expense",
                    "amount": "12",
                    "created_at": "2024-06-03T10:15:00Z",
                },
                {
                    "id": "0191c2a0-0000-7000-8000-0000000000f2",
                    "household_id": HOUSEHOLD,
                    "transaction_type": "refund",
                    "amount": 5,
                    "created_at": "2024-06-03T10:15:00Z",
                },
            ],
        }))
        .unwrap();

        let records = snapshot.into_records();
        assert!(records.budgets.is_empty());
        assert!(records.categories.is_empty());
        assert_eq!(records.transactions.len(), 1);
        assert_eq!(records.transactions[0].amount, dec!(12));
    }

    #[test]
    fn test_extreme_stored_amounts_aggregate_without_overflow() {
        let snapshot: HouseholdSnapshot = serde_json::from_value(json!({
            "household_id": HOUSEHOLD,
            "transactions": [
                {
                    "id": "0191c2a0-0000-7000-8000-0000000000f1",
                    "household_id": HOUSEHOLD,
                    "transaction_type": "expense",
                    "amount": "79228162514264337593543950335",
                    "created_at": "2024-06-03T10:15:00Z",
                },
                {
                    "id": "0191c2a0-0000-7000-8000-0000000000f2",
                    "household_id": HOUSEHOLD,
                    "transaction_type": "expense",
                    "amount": "1",
                    "created_at": "2024-06-03T10:16:00Z",
                },
            ],
        }))
        .unwrap();

        let records = snapshot.into_records();
        assert_eq!(records.transactions[0].amount, Decimal::MAX);

        let overview = BudgetAggregator::aggregate(
            &records.budgets,
            &records.categories,
            &records.transactions,
        );
        assert_eq!(overview.stats.total_expenses, Decimal::MAX);
        assert_eq!(overview.stats.balance, -Decimal::MAX);
    }
}
