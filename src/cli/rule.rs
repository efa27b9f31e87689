//! Rule CLI commands

use clap::Subcommand;

use crate::auth::Session;
use crate::display::format_rule_table;
use crate::error::{FinDashError, FinDashResult};
use crate::models::{Rule, RuleCondition, RuleField, RuleId, DEFAULT_RULE_PRIORITY};
use crate::services::RuleService;
use crate::storage::Storage;

/// Categorization rule subcommands
#[derive(Subcommand)]
pub enum RuleCommands {
    /// Add a rule
    Add {
        /// Field to match: payee, notes, account_name, or amount
        field: String,
        /// Condition: contains, equals, starts_with, or ends_with
        condition: String,
        /// Value to match against
        value: String,
        /// Category to assign on match
        category: String,
        /// Evaluation priority; lower numbers run first
        #[arg(short, long, default_value_t = DEFAULT_RULE_PRIORITY)]
        priority: i64,
    },

    /// List rules in evaluation order
    List,

    /// Delete a rule
    Delete {
        /// Rule id (shown by `rule list`)
        id: String,
    },

    /// Re-run all rules over your transaction history
    Apply,
}

/// Handle a rule command
pub fn handle_rule_command(
    storage: &Storage,
    session: &Session,
    cmd: RuleCommands,
) -> FinDashResult<()> {
    let service = RuleService::new(storage);

    match cmd {
        RuleCommands::Add {
            field,
            condition,
            value,
            category,
            priority,
        } => {
            let field: RuleField = field.parse()?;
            let condition: RuleCondition = condition.parse()?;
            let rule = service.add(Rule::new(
                session.user_id,
                field,
                condition,
                value,
                category,
                priority,
            ))?;
            println!(
                "Added rule: {} {} {:?} -> {} (priority {})",
                rule.field, rule.condition, rule.value, rule.category, rule.priority
            );
        }

        RuleCommands::List => {
            let rules = service.list(session.user_id)?;
            println!("{}", format_rule_table(&rules));
        }

        RuleCommands::Delete { id } => {
            let id: RuleId = id
                .parse()
                .map_err(|_| FinDashError::Validation(format!("Invalid rule id: {}", id)))?;
            service.delete(session.user_id, id)?;
            println!("Rule deleted.");
        }

        RuleCommands::Apply => {
            let updated = service.apply_all(session.user_id)?;
            println!("Recategorized {} transactions.", updated);
        }
    }

    Ok(())
}
