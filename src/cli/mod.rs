//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. All commands except
//! the account ones require a signed-in session.

pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod import;
pub mod rule;
pub mod transaction;

pub use auth::{
    handle_reset_password, handle_reset_request, handle_signin, handle_signout, handle_signup,
};
pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::{handle_dashboard, DashboardArgs};
pub use import::handle_import;
pub use rule::{handle_rule_command, RuleCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
