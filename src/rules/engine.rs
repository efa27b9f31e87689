//! Rule evaluation
//!
//! Rules arrive already sorted into evaluation order (ascending priority,
//! creation time breaking ties); the first match wins. Text predicates compare
//! lowercased values; amount predicates compare exact cents. When no rule
//! matches, the builtin keyword table is consulted as a fallback.

use crate::models::{CategorySource, Money, Rule, RuleCondition, RuleField, Transaction};

use super::keywords::keyword_category;

/// Check whether one rule matches one transaction
pub fn rule_matches(rule: &Rule, txn: &Transaction) -> bool {
    match rule.field {
        RuleField::Amount => {
            // Only exact equality is defined for amounts; anything else was
            // rejected at save time
            if rule.condition != RuleCondition::Equals {
                return false;
            }
            match Money::parse(&rule.value) {
                Ok(amount) => txn.amount == amount,
                Err(_) => false,
            }
        }
        RuleField::Payee | RuleField::Notes | RuleField::AccountName => {
            let field_value = match rule.field {
                RuleField::Payee => txn.payee.as_str(),
                RuleField::Notes => txn.notes.as_str(),
                RuleField::AccountName => txn.account_name.as_str(),
                RuleField::Amount => unreachable!(),
            }
            .to_lowercase();
            let rule_value = rule.value.to_lowercase();

            match rule.condition {
                RuleCondition::Contains => field_value.contains(&rule_value),
                RuleCondition::Equals => field_value == rule_value,
                RuleCondition::StartsWith => field_value.starts_with(&rule_value),
                RuleCondition::EndsWith => field_value.ends_with(&rule_value),
            }
        }
    }
}

/// Resolve the category for a transaction: first matching rule, then the
/// keyword table, then nothing.
pub fn categorize(txn: &Transaction, rules: &[Rule]) -> Option<(String, CategorySource)> {
    for rule in rules {
        if rule_matches(rule, txn) {
            return Some((rule.category.clone(), CategorySource::Rule));
        }
    }
    keyword_category(&txn.payee).map(|category| (category.to_string(), CategorySource::Keyword))
}

/// Lazily resolve categories for a batch of transactions
pub fn apply_rules<'a>(
    transactions: &'a [Transaction],
    rules: &'a [Rule],
) -> impl Iterator<Item = (&'a Transaction, Option<(String, CategorySource)>)> + 'a {
    transactions.iter().map(move |txn| (txn, categorize(txn, rules)))
}
