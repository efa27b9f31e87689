//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::auth::Session;
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{FinDashError, FinDashResult};
use crate::models::{Money, TransactionId};
use crate::services::{NewTransaction, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a transaction by hand
    Add {
        /// Transaction date (YYYY-MM-DD)
        date: String,
        /// Payee name
        payee: String,
        /// Amount (negative for an expense, e.g. "-5.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (skips auto-categorization)
        #[arg(short, long)]
        category: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Account name
        #[arg(short, long)]
        account: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only show the last N days
        #[arg(short, long)]
        days: Option<i64>,
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum rows to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only show transactions without a category
        #[arg(long)]
        uncategorized: bool,
    },

    /// Assign a category to one transaction
    Categorize {
        /// Transaction id (shown by `transaction list --uncategorized`)
        id: String,
        /// Category name
        category: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: TransactionCommands,
) -> FinDashResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            date,
            payee,
            amount,
            category,
            notes,
            account,
        } => {
            let date = NaiveDate::parse_from_str(&date, &settings.date_format)
                .map_err(|_| FinDashError::Validation(format!("Invalid date: {}", date)))?;
            let amount = Money::parse(&amount)
                .map_err(|e| FinDashError::Validation(e.to_string()))?;

            let txn = service.add(
                session.user_id,
                date,
                &payee,
                amount,
                NewTransaction {
                    category,
                    notes,
                    account_name: account,
                },
            )?;
            println!("Added:\n{}", format_transaction_details(&txn));
        }

        TransactionCommands::List {
            days,
            category,
            limit,
            uncategorized,
        } => {
            let transactions = if uncategorized {
                let mut listed = service.uncategorized(session.user_id)?;
                listed.truncate(limit);
                for txn in &listed {
                    println!("{}", format_transaction_details(txn));
                }
                return Ok(());
            } else {
                let since =
                    days.map(|d| chrono::Local::now().date_naive() - chrono::Duration::days(d));
                service.list(session.user_id, since, category.as_deref(), Some(limit))?
            };
            println!("{}", format_transaction_table(&transactions));
        }

        TransactionCommands::Categorize { id, category } => {
            let id: TransactionId = id
                .parse()
                .map_err(|_| FinDashError::Validation(format!("Invalid transaction id: {}", id)))?;
            let txn = service.set_category(session.user_id, id, &category)?;
            println!(
                "Categorized {} as {}.",
                txn.payee,
                txn.category_name()
            );
        }
    }

    Ok(())
}
