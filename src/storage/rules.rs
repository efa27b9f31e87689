//! Rule repository
//!
//! Maps between `Rule` and its row in the User_Rules table. Listings come back
//! in evaluation order: ascending priority, creation time breaking ties.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{FinDashError, FinDashResult};
use crate::models::{Rule, RuleId, UserId};

use super::cache::TtlCache;
use super::codec;
use super::table::{tables, TableBackend};

/// Repository for categorization rules with cached per-user listings
pub struct RuleRepository {
    backend: Arc<dyn TableBackend>,
    cache: TtlCache<Vec<Rule>>,
}

impl RuleRepository {
    pub fn new(backend: Arc<dyn TableBackend>, cache_ttl: Duration) -> Self {
        Self {
            backend,
            cache: TtlCache::new(cache_ttl),
        }
    }

    fn to_row(rule: &Rule) -> Vec<String> {
        vec![
            rule.user_id.to_string(),
            rule.id.to_string(),
            rule.priority.to_string(),
            rule.field.to_string(),
            rule.condition.to_string(),
            rule.value.clone(),
            rule.category.clone(),
            codec::encode_datetime(rule.created_at),
        ]
    }

    fn from_row(row: &[String]) -> FinDashResult<Rule> {
        let t = &tables::USER_RULES;
        Ok(Rule {
            id: RuleId::parse(t.cell(row, "rule_id")?)
                .map_err(|e| FinDashError::Store(format!("Bad rule_id in User_Rules: {}", e)))?,
            user_id: UserId::parse(t.cell(row, "user_id")?)
                .map_err(|e| FinDashError::Store(format!("Bad user_id in User_Rules: {}", e)))?,
            field: t.cell(row, "rule_field")?.parse()?,
            condition: t.cell(row, "rule_condition")?.parse()?,
            value: t.cell(row, "rule_value")?.to_string(),
            category: t.cell(row, "rule_category")?.to_string(),
            priority: t.cell(row, "priority")?.parse().map_err(|_| {
                FinDashError::Store(format!(
                    "Bad priority in User_Rules: {}",
                    t.cell(row, "priority").unwrap_or_default()
                ))
            })?,
            created_at: codec::parse_datetime(t.name, t.cell(row, "created_at")?)?,
        })
    }

    /// All rules for a user in evaluation order
    pub fn list_for_user(&self, user_id: UserId) -> FinDashResult<Vec<Rule>> {
        if let Some(cached) = self.cache.get(user_id) {
            return Ok(cached);
        }

        let t = &tables::USER_RULES;
        let key = user_id.to_string();
        let mut rules = Vec::new();
        for row in self.backend.rows(t.name)? {
            if t.cell(&row, "user_id")? == key {
                rules.push(Self::from_row(&row)?);
            }
        }
        rules.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.created_at.cmp(&b.created_at)));

        self.cache.put(user_id, rules.clone());
        Ok(rules)
    }

    /// Fetch one rule, checking ownership
    pub fn get(&self, user_id: UserId, id: RuleId) -> FinDashResult<Rule> {
        self.list_for_user(user_id)?
            .into_iter()
            .find(|rule| rule.id == id)
            .ok_or_else(|| FinDashError::rule_not_found(id.to_string()))
    }

    /// Append a rule
    pub fn append(&self, rule: &Rule) -> FinDashResult<()> {
        self.backend
            .append_row(tables::USER_RULES.name, Self::to_row(rule))?;
        self.cache.invalidate(rule.user_id);
        Ok(())
    }

    /// Delete a rule, checking ownership first
    pub fn delete(&self, user_id: UserId, id: RuleId) -> FinDashResult<()> {
        // Ownership check; also surfaces a typed not-found error
        self.get(user_id, id)?;
        self.backend
            .delete_row(tables::USER_RULES.name, "rule_id", &id.to_string())?;
        self.cache.invalidate(user_id);
        Ok(())
    }
}
