//! Core data models for FinDash
//!
//! This module contains all the data structures that represent the personal
//! finance domain: users, transactions, categorization rules, and budgets.

pub mod budget;
pub mod ids;
pub mod money;
pub mod month;
pub mod rule;
pub mod transaction;
pub mod user;

pub use budget::{Budget, BudgetStatus};
pub use ids::{RuleId, TransactionId, UserId};
pub use money::Money;
pub use month::Month;
pub use rule::{Rule, RuleCondition, RuleField, DEFAULT_RULE_PRIORITY};
pub use transaction::{CategorySource, Transaction, UNCATEGORIZED};
pub use user::{User, UserData};
