//! Dashboard service
//!
//! Read-only aggregations over a user's history: the headline summary for a
//! date window (60 trailing days by default), per-month totals, top payees by
//! spending, and month-over-month spending trend.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::FinDashResult;
use crate::models::{Money, Month, Transaction, UserId};
use crate::storage::Storage;

/// Inclusive date window
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The trailing window ending today
    pub fn trailing_days(days: i64) -> Self {
        let end = chrono::Local::now().date_naive();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Headline dashboard numbers for one date window
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub range: DateRange,
    /// Net of every transaction ever recorded, not just the window
    pub total_balance: Money,
    /// Income received inside the window
    pub income: Money,
    /// Spending inside the window, as a positive total
    pub expenses: Money,
    /// Income minus spending inside the window
    pub net: Money,
    /// Spending per category inside the window, as positive totals
    pub by_category: BTreeMap<String, Money>,
    /// Most recent transactions, newest first
    pub recent: Vec<Transaction>,
    /// Transactions inside the window that still need a category
    pub uncategorized_count: usize,
}

/// Income and spending totals for one calendar month
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    /// Transactions dated inside the month
    pub transaction_count: usize,
    /// Mean expense size, zero when the month has no expenses
    pub average_expense: Money,
}

/// Direction of a month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// Spending compared to the previous month
#[derive(Debug, Clone, Serialize)]
pub struct SpendingTrend {
    pub month: Month,
    pub current: Money,
    pub previous: Money,
    /// Absolute percent change; zero when the previous month had no spending
    pub percent_change: f64,
    pub direction: TrendDirection,
}

/// Service for dashboard aggregations
pub struct DashboardService<'a> {
    storage: &'a Storage,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Build the headline summary for a window
    pub fn summarize(
        &self,
        user_id: UserId,
        range: DateRange,
        recent_limit: usize,
    ) -> FinDashResult<DashboardSummary> {
        let transactions = self.storage.transactions.list_for_user(user_id)?;

        let total_balance: Money = transactions.iter().map(|t| t.amount).sum();

        let mut income = Money::zero();
        let mut expenses = Money::zero();
        let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut uncategorized_count = 0;

        for txn in transactions.iter().filter(|t| range.contains(t.date)) {
            if txn.is_income() {
                income += txn.amount;
            } else if txn.is_expense() {
                expenses += txn.amount.abs();
                *by_category
                    .entry(txn.category_name().to_string())
                    .or_default() += txn.amount.abs();
            }
            if txn.is_uncategorized() {
                uncategorized_count += 1;
            }
        }

        let recent = transactions.into_iter().take(recent_limit).collect();

        Ok(DashboardSummary {
            range,
            total_balance,
            income,
            expenses,
            net: income - expenses,
            by_category,
            recent,
            uncategorized_count,
        })
    }

    /// Income and spending totals for one month
    pub fn monthly_summary(&self, user_id: UserId, month: Month) -> FinDashResult<MonthlySummary> {
        let mut income = Money::zero();
        let mut expenses = Money::zero();
        let mut transaction_count = 0;
        let mut expense_count: i64 = 0;
        for txn in self.storage.transactions.list_for_user(user_id)? {
            if !month.contains(txn.date) {
                continue;
            }
            transaction_count += 1;
            if txn.is_income() {
                income += txn.amount;
            } else if txn.is_expense() {
                expenses += txn.amount.abs();
                expense_count += 1;
            }
        }
        let average_expense = if expense_count == 0 {
            Money::zero()
        } else {
            Money::from_cents(expenses.cents() / expense_count)
        };
        Ok(MonthlySummary {
            month,
            income,
            expenses,
            net: income - expenses,
            transaction_count,
            average_expense,
        })
    }

    /// Top payees by spending inside a window, largest first
    pub fn top_payees(
        &self,
        user_id: UserId,
        range: DateRange,
        limit: usize,
    ) -> FinDashResult<Vec<(String, Money)>> {
        let mut totals: BTreeMap<String, Money> = BTreeMap::new();
        for txn in self.storage.transactions.list_for_user(user_id)? {
            if txn.is_expense() && range.contains(txn.date) {
                *totals.entry(txn.payee.clone()).or_default() += txn.amount.abs();
            }
        }

        let mut ranked: Vec<_> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Spending for a month compared to the month before it
    pub fn spending_trend(&self, user_id: UserId, month: Month) -> FinDashResult<SpendingTrend> {
        let current = self.monthly_summary(user_id, month)?.expenses;
        let previous = self.monthly_summary(user_id, month.prev())?.expenses;

        let (percent_change, direction) = if previous.is_zero() {
            (0.0, TrendDirection::Neutral)
        } else {
            let change = (current.cents() - previous.cents()) as f64
                / previous.cents().abs() as f64
                * 100.0;
            let direction = if change > 0.0 {
                TrendDirection::Up
            } else if change < 0.0 {
                TrendDirection::Down
            } else {
                TrendDirection::Neutral
            };
            (change.abs(), direction)
        };

        Ok(SpendingTrend {
            month,
            current,
            previous,
            percent_change,
            direction,
        })
    }
}
