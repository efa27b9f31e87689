//! Display formatting for terminal output
//!
//! Table renderers for transactions, rules, budgets, and the dashboard.

pub mod budget;
pub mod dashboard;
pub mod rule;
pub mod transaction;

pub use budget::format_budget_table;
pub use dashboard::{format_dashboard, format_monthly_summary, format_top_payees, format_trend};
pub use rule::format_rule_table;
pub use transaction::{format_import_report, format_transaction_details, format_transaction_table};
