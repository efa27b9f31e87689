//! Monthly budget model
//!
//! One budget row per (user, category, month). Spending against a budget is
//! computed from transactions at read time and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::money::Money;
use super::month::Month;

/// A budget amount for one category in one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Owning user
    pub user_id: UserId,

    /// Calendar month this budget applies to
    pub month: Month,

    /// Category name the budget covers
    pub category: String,

    /// Budgeted amount for the month (always non-negative)
    pub amount: Money,

    /// When the row was last written
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget row
    pub fn new(user_id: UserId, month: Month, category: impl Into<String>, amount: Money) -> Self {
        Self {
            user_id,
            month,
            category: category.into(),
            amount,
            updated_at: Utc::now(),
        }
    }
}

/// Computed progress of one budget against actual spending
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    /// Category name
    pub category: String,

    /// Budgeted amount
    pub budgeted: Money,

    /// Total spent in the month (absolute value of expenses)
    pub spent: Money,

    /// Budgeted minus spent; negative means over budget
    pub remaining: Money,

    /// Spent as a fraction of budgeted, in percent. `None` when the budgeted
    /// amount is zero, since the ratio is undefined.
    pub percent_used: Option<f64>,
}

impl BudgetStatus {
    /// Compute status from a budgeted amount and total spending
    pub fn compute(category: impl Into<String>, budgeted: Money, spent: Money) -> Self {
        let percent_used = if budgeted.is_zero() {
            None
        } else {
            Some(spent.cents() as f64 / budgeted.cents() as f64 * 100.0)
        };
        Self {
            category: category.into(),
            budgeted,
            spent,
            remaining: budgeted - spent,
            percent_used,
        }
    }

    /// Whether spending has exceeded the budgeted amount
    pub fn is_over(&self) -> bool {
        self.spent > self.budgeted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_percent_used() {
        let status = BudgetStatus::compute("Groceries", Money::from_cents(50000), Money::from_cents(25000));
        assert_eq!(status.percent_used, Some(50.0));
        assert_eq!(status.remaining.cents(), 25000);
        assert!(!status.is_over());
    }

    #[test]
    fn test_zero_budget_has_no_percent() {
        let status = BudgetStatus::compute("Misc", Money::zero(), Money::from_cents(1000));
        assert_eq!(status.percent_used, None);
        assert_eq!(status.remaining.cents(), -1000);
        assert!(status.is_over());
    }

    #[test]
    fn test_over_budget() {
        let status = BudgetStatus::compute("Dining", Money::from_cents(10000), Money::from_cents(15000));
        assert_eq!(status.percent_used, Some(150.0));
        assert_eq!(status.remaining.cents(), -5000);
        assert!(status.is_over());
    }
}
