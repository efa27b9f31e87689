//! Rule management service
//!
//! Validates rules before they are stored and re-runs the rule set over a
//! user's transaction history. Re-runs skip manually categorized transactions
//! and write only the rows whose category actually changes, which also makes
//! them idempotent.

use crate::error::FinDashResult;
use crate::models::{CategorySource, Rule, RuleId, UserId};
use crate::rules::{apply_rules, canonical_category};
use crate::storage::Storage;

/// Service for categorization rule management
pub struct RuleService<'a> {
    storage: &'a Storage,
}

impl<'a> RuleService<'a> {
    /// Create a new rule service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a rule. Builtin target category names are stored
    /// in their canonical casing.
    pub fn add(&self, mut rule: Rule) -> FinDashResult<Rule> {
        rule.validate()?;
        if let Some(canonical) = canonical_category(&rule.category) {
            rule.category = canonical.to_string();
        }
        self.storage.rules.append(&rule)?;
        Ok(rule)
    }

    /// All of a user's rules in evaluation order
    pub fn list(&self, user_id: UserId) -> FinDashResult<Vec<Rule>> {
        self.storage.rules.list_for_user(user_id)
    }

    /// Delete a rule the user owns
    pub fn delete(&self, user_id: UserId, id: RuleId) -> FinDashResult<()> {
        self.storage.rules.delete(user_id, id)
    }

    /// Re-run the rule set over the user's whole history. Returns how many
    /// transactions were recategorized.
    pub fn apply_all(&self, user_id: UserId) -> FinDashResult<usize> {
        let rules = self.storage.rules.list_for_user(user_id)?;
        let transactions = self.storage.transactions.list_for_user(user_id)?;

        let mut changed = Vec::new();
        for (txn, resolved) in apply_rules(&transactions, &rules) {
            // Hand-assigned categories are never overwritten
            if txn.category_source == CategorySource::Manual {
                continue;
            }
            if let Some((category, source)) = resolved {
                if txn.category_name() != category {
                    let mut updated = txn.clone();
                    updated.set_category(category, source);
                    changed.push(updated);
                }
            }
        }

        self.storage.transactions.update_many(&changed)?;
        Ok(changed.len())
    }
}
