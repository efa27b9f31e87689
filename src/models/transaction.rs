//! Transaction model
//!
//! An imported or manually entered bank transaction. Amounts are signed:
//! negative is an expense, positive is income. The category is optional until
//! assigned, and carries a source marker so rule re-runs never clobber a
//! category the user set by hand.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TransactionId, UserId};
use super::money::Money;

/// Display name used for transactions that have no category yet
pub const UNCATEGORIZED: &str = "Uncategorized";

/// How a transaction's category was assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategorySource {
    /// Never categorized
    #[default]
    None,
    /// Matched the builtin keyword table at import time
    Keyword,
    /// Matched a user-defined rule
    Rule,
    /// Set explicitly by the user; rule application never overwrites this
    Manual,
}

impl CategorySource {
    /// Parse from the stored column value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "none" => Some(Self::None),
            "keyword" => Some(Self::Keyword),
            "rule" => Some(Self::Rule),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Keyword => "keyword",
            Self::Rule => "rule",
            Self::Manual => "manual",
        }
    }
}

/// A bank transaction belonging to exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning user
    pub user_id: UserId,

    /// Transaction date
    pub date: NaiveDate,

    /// Payee/merchant name
    pub payee: String,

    /// Signed amount (negative = expense)
    pub amount: Money,

    /// Assigned category, if any
    pub category: Option<String>,

    /// How the category was assigned
    #[serde(default)]
    pub category_source: CategorySource,

    /// Source account name, if known
    #[serde(default)]
    pub account_name: String,

    /// Source account identifier, if known
    #[serde(default)]
    pub account_id: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Whether the transaction has not yet settled
    #[serde(default)]
    pub pending: bool,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last modified
    pub modified_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with the required fields
    pub fn new(user_id: UserId, date: NaiveDate, payee: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            user_id,
            date,
            payee: payee.into(),
            amount,
            category: None,
            category_source: CategorySource::None,
            account_name: String::new(),
            account_id: String::new(),
            notes: String::new(),
            pending: false,
            created_at: now,
            modified_at: now,
        }
    }

    /// Check if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Check if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if the transaction has no category yet
    pub fn is_uncategorized(&self) -> bool {
        self.category.is_none()
    }

    /// The category name for display and aggregation ("Uncategorized" if unset)
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Assign a category, recording where it came from
    pub fn set_category(&mut self, category: impl Into<String>, source: CategorySource) {
        self.category = Some(category.into());
        self.category_source = source;
        self.modified_at = Utc::now();
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.payee,
            self.amount
        )
    }
}
