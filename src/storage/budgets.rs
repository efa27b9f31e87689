//! Budget repository
//!
//! Maps between `Budget` and its row in the Budget_Monthly table. A budget is
//! keyed by (user, month, category), so upserts rewrite the row set rather
//! than keying on a single column.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{FinDashError, FinDashResult};
use crate::models::{Budget, Month, UserId};

use super::cache::TtlCache;
use super::codec;
use super::table::{tables, TableBackend};

/// Repository for monthly budgets with cached per-user listings
pub struct BudgetRepository {
    backend: Arc<dyn TableBackend>,
    cache: TtlCache<Vec<Budget>>,
}

impl BudgetRepository {
    pub fn new(backend: Arc<dyn TableBackend>, cache_ttl: Duration) -> Self {
        Self {
            backend,
            cache: TtlCache::new(cache_ttl),
        }
    }

    fn to_row(budget: &Budget) -> Vec<String> {
        vec![
            budget.user_id.to_string(),
            budget.month.to_string(),
            budget.category.clone(),
            codec::encode_cents(budget.amount),
            codec::encode_datetime(budget.updated_at),
        ]
    }

    fn from_row(row: &[String]) -> FinDashResult<Budget> {
        let t = &tables::BUDGET_MONTHLY;
        let month_cell = t.cell(row, "month_year")?;
        Ok(Budget {
            user_id: UserId::parse(t.cell(row, "user_id")?).map_err(|e| {
                FinDashError::Store(format!("Bad user_id in Budget_Monthly: {}", e))
            })?,
            month: month_cell.parse::<Month>().map_err(|e| {
                FinDashError::Store(format!("Bad month_year in Budget_Monthly: {}", e))
            })?,
            category: t.cell(row, "category")?.to_string(),
            amount: codec::parse_cents(t.name, t.cell(row, "budgeted")?)?,
            updated_at: codec::parse_datetime(t.name, t.cell(row, "last_updated")?)?,
        })
    }

    /// All budgets for a user, across all months
    pub fn list_for_user(&self, user_id: UserId) -> FinDashResult<Vec<Budget>> {
        if let Some(cached) = self.cache.get(user_id) {
            return Ok(cached);
        }

        let t = &tables::BUDGET_MONTHLY;
        let key = user_id.to_string();
        let mut budgets = Vec::new();
        for row in self.backend.rows(t.name)? {
            if t.cell(&row, "user_id")? == key {
                budgets.push(Self::from_row(&row)?);
            }
        }

        self.cache.put(user_id, budgets.clone());
        Ok(budgets)
    }

    /// Budgets for one month, sorted by category name
    pub fn list_for_month(&self, user_id: UserId, month: Month) -> FinDashResult<Vec<Budget>> {
        let mut budgets: Vec<_> = self
            .list_for_user(user_id)?
            .into_iter()
            .filter(|b| b.month == month)
            .collect();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    /// Insert or replace the budget for (user, month, category)
    pub fn upsert(&self, budget: &Budget) -> FinDashResult<()> {
        let t = &tables::BUDGET_MONTHLY;
        let user_key = budget.user_id.to_string();
        let month_key = budget.month.to_string();

        let mut rows = self.backend.rows(t.name)?;
        let existing = rows.iter_mut().find(|row| {
            t.cell(row, "user_id").map(|c| c == user_key).unwrap_or(false)
                && t.cell(row, "month_year")
                    .map(|c| c == month_key)
                    .unwrap_or(false)
                && t.cell(row, "category")
                    .map(|c| c == budget.category)
                    .unwrap_or(false)
        });

        match existing {
            Some(row) => *row = Self::to_row(budget),
            None => rows.push(Self::to_row(budget)),
        }
        self.backend.replace_rows(t.name, rows)?;
        self.cache.invalidate(budget.user_id);
        Ok(())
    }
}
