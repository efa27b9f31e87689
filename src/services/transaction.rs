//! Transaction service
//!
//! Manual entry, listings, and category assignment. Manually assigned
//! categories are marked as such so rule re-runs leave them alone.

use chrono::NaiveDate;

use crate::error::FinDashResult;
use crate::models::{CategorySource, Money, Transaction, TransactionId, UserId};
use crate::rules::{canonical_category, categorize};
use crate::storage::Storage;

/// Optional fields for a manually entered transaction
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub category: Option<String>,
    pub notes: Option<String>,
    pub account_name: Option<String>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a single transaction. An explicit category counts as manual;
    /// otherwise the rule engine and keyword table decide.
    pub fn add(
        &self,
        user_id: UserId,
        date: NaiveDate,
        payee: &str,
        amount: Money,
        extra: NewTransaction,
    ) -> FinDashResult<Transaction> {
        let mut txn = Transaction::new(user_id, date, payee, amount);
        if let Some(notes) = extra.notes {
            txn.notes = notes;
        }
        if let Some(account_name) = extra.account_name {
            txn.account_name = account_name;
        }

        if let Some(category) = extra.category {
            let category = canonical_category(&category)
                .map(str::to_string)
                .unwrap_or(category);
            txn.set_category(category, CategorySource::Manual);
        } else {
            let rules = self.storage.rules.list_for_user(user_id)?;
            if let Some((category, source)) = categorize(&txn, &rules) {
                txn.set_category(category, source);
            }
        }

        self.storage.transactions.append(&txn)?;
        Ok(txn)
    }

    /// List transactions, newest first, optionally bounded by a date window,
    /// a category, and a row limit
    pub fn list(
        &self,
        user_id: UserId,
        since: Option<NaiveDate>,
        category: Option<&str>,
        limit: Option<usize>,
    ) -> FinDashResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.list_for_user(user_id)?;
        if let Some(since) = since {
            transactions.retain(|txn| txn.date >= since);
        }
        if let Some(category) = category {
            transactions.retain(|txn| txn.category_name().eq_ignore_ascii_case(category));
        }
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Transactions that still have no category, newest first
    pub fn uncategorized(&self, user_id: UserId) -> FinDashResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.list_for_user(user_id)?;
        transactions.retain(Transaction::is_uncategorized);
        Ok(transactions)
    }

    /// Assign a category by hand; rule re-runs will never overwrite it.
    /// Builtin category names are stored in their canonical casing.
    pub fn set_category(
        &self,
        user_id: UserId,
        id: TransactionId,
        category: &str,
    ) -> FinDashResult<Transaction> {
        let mut txn = self.storage.transactions.get(user_id, id)?;
        let category = canonical_category(category).unwrap_or(category);
        txn.set_category(category, CategorySource::Manual);
        self.storage.transactions.update(&txn)?;
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinDashPaths;
    use crate::models::{Rule, RuleCondition, RuleField};
    use crate::storage::DEFAULT_CACHE_TTL;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, DEFAULT_CACHE_TTL).unwrap();
        (temp_dir, storage)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    #[test]
    fn test_add_auto_categorizes() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service
            .add(
                user_id,
                date(1),
                "Starbucks #1234",
                Money::from_cents(-550),
                NewTransaction::default(),
            )
            .unwrap();
        assert_eq!(txn.category.as_deref(), Some("Food & Dining"));
        assert_eq!(txn.category_source, CategorySource::Keyword);
    }

    #[test]
    fn test_add_with_explicit_category_is_manual() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service
            .add(
                user_id,
                date(1),
                "Starbucks #1234",
                Money::from_cents(-550),
                NewTransaction {
                    category: Some("Coffee".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(txn.category.as_deref(), Some("Coffee"));
        assert_eq!(txn.category_source, CategorySource::Manual);
    }

    #[test]
    fn test_add_prefers_rule_over_keyword() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        storage
            .rules
            .append(&Rule::new(
                user_id,
                RuleField::Payee,
                RuleCondition::Contains,
                "starbucks",
                "Coffee Budget",
                1,
            ))
            .unwrap();

        let txn = TransactionService::new(&storage)
            .add(
                user_id,
                date(1),
                "Starbucks #1234",
                Money::from_cents(-550),
                NewTransaction::default(),
            )
            .unwrap();
        assert_eq!(txn.category.as_deref(), Some("Coffee Budget"));
        assert_eq!(txn.category_source, CategorySource::Rule);
    }

    #[test]
    fn test_list_with_window_and_limit() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        for day in 1..=5 {
            service
                .add(
                    user_id,
                    date(day),
                    "Quiet Corner Books",
                    Money::from_cents(-100),
                    NewTransaction::default(),
                )
                .unwrap();
        }

        let windowed = service.list(user_id, Some(date(3)), None, None).unwrap();
        assert_eq!(windowed.len(), 3);

        let limited = service.list(user_id, None, None, Some(2)).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].date, date(5));
    }

    #[test]
    fn test_list_filters_by_category() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        service
            .add(user_id, date(1), "Starbucks", Money::from_cents(-550), NewTransaction::default())
            .unwrap();
        service
            .add(
                user_id,
                date(2),
                "Quiet Corner Books",
                Money::from_cents(-1200),
                NewTransaction::default(),
            )
            .unwrap();

        let dining = service
            .list(user_id, None, Some("food & dining"), None)
            .unwrap();
        assert_eq!(dining.len(), 1);
        assert_eq!(dining[0].payee, "Starbucks");

        let none = service
            .list(user_id, None, Some("Uncategorized"), None)
            .unwrap();
        assert_eq!(none.len(), 1);
        assert_eq!(none[0].payee, "Quiet Corner Books");
    }

    #[test]
    fn test_uncategorized_listing() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        service
            .add(user_id, date(1), "Starbucks", Money::from_cents(-550), NewTransaction::default())
            .unwrap();
        let mystery = service
            .add(
                user_id,
                date(2),
                "Quiet Corner Books",
                Money::from_cents(-1200),
                NewTransaction::default(),
            )
            .unwrap();

        let uncategorized = service.uncategorized(user_id).unwrap();
        assert_eq!(uncategorized.len(), 1);
        assert_eq!(uncategorized[0].id, mystery.id);
    }

    #[test]
    fn test_set_category_marks_manual() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service
            .add(
                user_id,
                date(1),
                "Quiet Corner Books",
                Money::from_cents(-1200),
                NewTransaction::default(),
            )
            .unwrap();

        let updated = service.set_category(user_id, txn.id, "Education").unwrap();
        assert_eq!(updated.category.as_deref(), Some("Education"));
        assert_eq!(updated.category_source, CategorySource::Manual);
    }

    #[test]
    fn test_builtin_category_names_are_canonicalized() {
        let (_dir, storage) = storage();
        let service = TransactionService::new(&storage);
        let user_id = UserId::new();

        let txn = service
            .add(
                user_id,
                date(1),
                "Quiet Corner Books",
                Money::from_cents(-1200),
                NewTransaction {
                    category: Some("education".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(txn.category.as_deref(), Some("Education"));

        let updated = service.set_category(user_id, txn.id, "GIFTS & DONATIONS").unwrap();
        assert_eq!(updated.category.as_deref(), Some("Gifts & Donations"));

        // Names outside the builtin list keep the user's casing
        let custom = service.set_category(user_id, txn.id, "book club").unwrap();
        assert_eq!(custom.category.as_deref(), Some("book club"));
    }
}
