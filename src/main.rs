use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use findash::auth::SessionStore;
use findash::cli::{
    handle_budget_command, handle_dashboard, handle_import, handle_reset_password,
    handle_reset_request, handle_rule_command, handle_signin, handle_signout, handle_signup,
    handle_transaction_command, BudgetCommands, DashboardArgs, RuleCommands, TransactionCommands,
};
use findash::config::{paths::FinDashPaths, settings::Settings};
use findash::storage::Storage;

#[derive(Parser)]
#[command(
    name = "findash",
    version,
    about = "Personal finance tracker: CSV import, rule-based categorization, monthly budgets",
    long_about = "FinDash tracks your personal finances from the command line. \
                  Import bank CSV exports, categorize transactions with rules, \
                  set monthly budgets, and review spending on a dashboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        /// Your full name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// Sign in
    Signin {
        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// Sign out
    Signout,

    /// Request a password-reset token
    ResetRequest {
        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password using a reset token
    ResetPassword {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Reset token from `reset-request`
        #[arg(short, long)]
        token: String,
    },

    /// Import transactions from a CSV file
    Import {
        /// Path to the CSV file (columns: date, payee, amount, ...)
        file: PathBuf,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Categorization rule commands
    #[command(subcommand)]
    Rule(RuleCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show the spending dashboard
    Dashboard {
        /// Lookback window in days (default from settings, 60)
        #[arg(short, long)]
        days: Option<i64>,
        /// Show the top N payees by spending
        #[arg(short, long)]
        top: Option<usize>,
        /// Show one month's totals and trend (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinDashPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(&paths, settings.cache_ttl())?;
    let sessions = SessionStore::new(&paths);

    match cli.command {
        Some(Commands::Signup { name, email }) => {
            handle_signup(&storage, &paths, name, email)?;
        }
        Some(Commands::Signin { email }) => {
            handle_signin(&storage, &paths, email)?;
        }
        Some(Commands::Signout) => {
            handle_signout(&paths)?;
        }
        Some(Commands::ResetRequest { email }) => {
            handle_reset_request(&storage, email)?;
        }
        Some(Commands::ResetPassword { email, token }) => {
            handle_reset_password(&storage, email, token)?;
        }
        Some(Commands::Import { file }) => {
            let session = sessions.require()?;
            handle_import(&storage, &session, file)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let session = sessions.require()?;
            handle_transaction_command(&storage, &settings, &session, cmd)?;
        }
        Some(Commands::Rule(cmd)) => {
            let session = sessions.require()?;
            handle_rule_command(&storage, &session, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let session = sessions.require()?;
            handle_budget_command(&storage, &session, cmd)?;
        }
        Some(Commands::Dashboard { days, top, month }) => {
            let session = sessions.require()?;
            handle_dashboard(&storage, &settings, &session, DashboardArgs { days, top, month })?;
        }
        Some(Commands::Config) => {
            println!("FinDash Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Tables directory: {}", paths.tables_dir().display());
            println!();
            println!("Settings:");
            println!("  Cache TTL:          {}s", settings.cache_ttl_secs);
            println!("  Default range:      {} days", settings.default_range_days);
            println!("  Recent limit:       {}", settings.recent_limit);
            match sessions.load()? {
                Some(session) => println!("  Signed in as:       {}", session.email),
                None => println!("  Signed in as:       (not signed in)"),
            }
        }
        None => {
            println!("FinDash - personal finance tracker");
            println!();
            println!("Run 'findash --help' for usage information.");
            println!("Start with 'findash signup --name \"Your Name\" --email you@example.com'.");
        }
    }

    Ok(())
}
