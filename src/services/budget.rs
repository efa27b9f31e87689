//! Budget service
//!
//! Setting monthly budgets and computing their progress. Spending is derived
//! from the month's expense transactions at read time; only the budgeted
//! amount is stored.

use std::collections::HashMap;

use crate::error::{FinDashError, FinDashResult};
use crate::models::{Budget, BudgetStatus, Money, Month, UserId};
use crate::storage::Storage;

/// Service for monthly budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set (or replace) the budget for a category in a month
    pub fn set_budget(
        &self,
        user_id: UserId,
        month: Month,
        category: &str,
        amount: Money,
    ) -> FinDashResult<Budget> {
        let category = category.trim();
        if category.is_empty() {
            return Err(FinDashError::Validation("Category is required".into()));
        }
        if amount.is_negative() {
            return Err(FinDashError::Validation(
                "Budget amount cannot be negative".into(),
            ));
        }

        let budget = Budget::new(user_id, month, category, amount);
        self.storage.budgets.upsert(&budget)?;
        Ok(budget)
    }

    /// Progress for the month, sorted by category name: one row per category
    /// that has a budget or spending. Spending counts only expenses, as
    /// positive totals; categories with spending but no budget show as
    /// budgeted zero.
    pub fn status_for_month(&self, user_id: UserId, month: Month) -> FinDashResult<Vec<BudgetStatus>> {
        let budgets = self.storage.budgets.list_for_month(user_id, month)?;
        let mut spending = self.spending_by_category(user_id, month)?;

        let mut statuses: Vec<BudgetStatus> = budgets
            .into_iter()
            .map(|budget| {
                let spent = spending.remove(budget.category.as_str()).unwrap_or_default();
                BudgetStatus::compute(budget.category, budget.amount, spent)
            })
            .collect();
        for (category, spent) in spending {
            statuses.push(BudgetStatus::compute(category, Money::zero(), spent));
        }
        statuses.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(statuses)
    }

    /// Absolute expense totals per category for one month
    fn spending_by_category(
        &self,
        user_id: UserId,
        month: Month,
    ) -> FinDashResult<HashMap<String, Money>> {
        let mut spending: HashMap<String, Money> = HashMap::new();
        for txn in self.storage.transactions.list_for_user(user_id)? {
            if txn.is_expense() && month.contains(txn.date) {
                *spending.entry(txn.category_name().to_string()).or_default() +=
                    txn.amount.abs();
            }
        }
        Ok(spending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinDashPaths;
    use crate::models::Transaction;
    use crate::storage::DEFAULT_CACHE_TTL;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, DEFAULT_CACHE_TTL).unwrap();
        (temp_dir, storage)
    }

    fn month() -> Month {
        Month::new(2025, 10).unwrap()
    }

    fn expense(user_id: UserId, day: u32, category: &str, cents: i64) -> Transaction {
        let mut txn = Transaction::new(
            user_id,
            NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            "Somewhere",
            Money::from_cents(cents),
        );
        txn.set_category(category, crate::models::CategorySource::Manual);
        txn
    }

    #[test]
    fn test_status_computes_spent_and_percent() {
        let (_dir, storage) = storage();
        let service = BudgetService::new(&storage);
        let user_id = UserId::new();

        service
            .set_budget(user_id, month(), "Groceries", Money::from_cents(50000))
            .unwrap();
        storage
            .transactions
            .append(&expense(user_id, 5, "Groceries", -20000))
            .unwrap();
        storage
            .transactions
            .append(&expense(user_id, 12, "Groceries", -5000))
            .unwrap();

        let statuses = service.status_for_month(user_id, month()).unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent, Money::from_cents(25000));
        assert_eq!(statuses[0].remaining, Money::from_cents(25000));
        assert_eq!(statuses[0].percent_used, Some(50.0));
    }

    #[test]
    fn test_income_and_other_months_do_not_count() {
        let (_dir, storage) = storage();
        let service = BudgetService::new(&storage);
        let user_id = UserId::new();

        service
            .set_budget(user_id, month(), "Groceries", Money::from_cents(10000))
            .unwrap();
        // Income in the same category
        let mut income = expense(user_id, 5, "Groceries", -1);
        income.amount = Money::from_cents(5000);
        storage.transactions.append(&income).unwrap();
        // Expense in a different month
        let mut other_month = expense(user_id, 5, "Groceries", -3000);
        other_month.date = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        storage.transactions.append(&other_month).unwrap();

        let statuses = service.status_for_month(user_id, month()).unwrap();
        assert_eq!(statuses[0].spent, Money::zero());
    }

    #[test]
    fn test_zero_budget_has_undefined_percent() {
        let (_dir, storage) = storage();
        let service = BudgetService::new(&storage);
        let user_id = UserId::new();

        service
            .set_budget(user_id, month(), "Misc", Money::zero())
            .unwrap();
        storage
            .transactions
            .append(&expense(user_id, 5, "Misc", -1000))
            .unwrap();

        let statuses = service.status_for_month(user_id, month()).unwrap();
        assert_eq!(statuses[0].percent_used, None);
        assert!(statuses[0].is_over());
    }

    #[test]
    fn test_negative_budget_rejected() {
        let (_dir, storage) = storage();
        let service = BudgetService::new(&storage);

        let err = service
            .set_budget(UserId::new(), month(), "Misc", Money::from_cents(-100))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unbudgeted_spending_shows_as_zero_budget() {
        let (_dir, storage) = storage();
        let service = BudgetService::new(&storage);
        let user_id = UserId::new();

        service
            .set_budget(user_id, month(), "Groceries", Money::from_cents(50000))
            .unwrap();
        storage
            .transactions
            .append(&expense(user_id, 3, "Entertainment", -2500))
            .unwrap();

        let statuses = service.status_for_month(user_id, month()).unwrap();
        assert_eq!(statuses.len(), 2);
        let entertainment = statuses
            .iter()
            .find(|s| s.category == "Entertainment")
            .unwrap();
        assert_eq!(entertainment.budgeted, Money::zero());
        assert_eq!(entertainment.spent, Money::from_cents(2500));
        assert_eq!(entertainment.percent_used, None);
    }

    #[test]
    fn test_statuses_sorted_by_category() {
        let (_dir, storage) = storage();
        let service = BudgetService::new(&storage);
        let user_id = UserId::new();

        for category in ["Transport", "Dining", "Groceries"] {
            service
                .set_budget(user_id, month(), category, Money::from_cents(100))
                .unwrap();
        }

        let statuses = service.status_for_month(user_id, month()).unwrap();
        let names: Vec<_> = statuses.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Dining", "Groceries", "Transport"]);
    }
}
