//! Service layer for FinDash
//!
//! Business logic on top of the storage layer: account management, CSV
//! import, categorization, budgets, and dashboard aggregations.

pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod import;
pub mod rule;
pub mod transaction;

pub use auth::AuthService;
pub use budget::BudgetService;
pub use dashboard::{DashboardService, DashboardSummary, DateRange};
pub use import::{ImportReport, ImportService};
pub use rule::RuleService;
pub use transaction::{NewTransaction, TransactionService};
