//! Budget CLI commands

use clap::Subcommand;

use crate::auth::Session;
use crate::display::format_budget_table;
use crate::error::{FinDashError, FinDashResult};
use crate::models::{Money, Month};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a category in a month
    Set {
        /// Category name
        category: String,
        /// Budgeted amount (e.g. "500" or "500.00")
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budget progress for a month
    Status {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn parse_month(month: Option<String>) -> FinDashResult<Month> {
    match month {
        Some(raw) => raw
            .parse()
            .map_err(|e: crate::models::month::MonthParseError| {
                FinDashError::Validation(e.to_string())
            }),
        None => Ok(Month::current()),
    }
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    session: &Session,
    cmd: BudgetCommands,
) -> FinDashResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let month = parse_month(month)?;
            let amount =
                Money::parse(&amount).map_err(|e| FinDashError::Validation(e.to_string()))?;
            let budget = service.set_budget(session.user_id, month, &category, amount)?;
            println!(
                "Budget for {} in {} set to {}.",
                budget.category,
                month.display_name(),
                budget.amount
            );
        }

        BudgetCommands::Status { month } => {
            let month = parse_month(month)?;
            let statuses = service.status_for_month(session.user_id, month)?;
            println!("{}", format_budget_table(month, &statuses));
        }
    }

    Ok(())
}
