//! Rule display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Rule;

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Priority")]
    priority: i64,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Condition")]
    condition: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Rule> for RuleRow {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            priority: rule.priority,
            field: rule.field.to_string(),
            condition: rule.condition.to_string(),
            value: rule.value.clone(),
            category: rule.category.clone(),
        }
    }
}

/// Render rules in evaluation order
pub fn format_rule_table(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "No rules defined.".to_string();
    }

    let rows: Vec<RuleRow> = rules.iter().map(RuleRow::from).collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleCondition, RuleField, UserId};

    #[test]
    fn test_empty_rule_listing() {
        assert_eq!(format_rule_table(&[]), "No rules defined.");
    }

    #[test]
    fn test_rule_table_fields() {
        let rule = Rule::new(
            UserId::new(),
            RuleField::Payee,
            RuleCondition::Contains,
            "amazon",
            "Shopping",
            5,
        );
        let rendered = format_rule_table(&[rule]);
        assert!(rendered.contains("payee"));
        assert!(rendered.contains("contains"));
        assert!(rendered.contains("Shopping"));
    }
}
