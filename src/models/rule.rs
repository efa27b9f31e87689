//! Categorization rule model
//!
//! A rule maps a predicate over one transaction field to a category. Rules are
//! evaluated in ascending priority order (lower number first, creation order
//! breaking ties) and the first match wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{RuleId, UserId};
use crate::error::{FinDashError, FinDashResult};

/// Transaction field a rule predicate applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleField {
    Payee,
    Notes,
    AccountName,
    Amount,
}

impl RuleField {
    /// Whether this field holds text (as opposed to a numeric amount)
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Amount)
    }

    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payee => "payee",
            Self::Notes => "notes",
            Self::AccountName => "account_name",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleField {
    type Err = FinDashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "payee" => Ok(Self::Payee),
            "notes" => Ok(Self::Notes),
            "account_name" => Ok(Self::AccountName),
            "amount" => Ok(Self::Amount),
            other => Err(FinDashError::Validation(format!(
                "Unknown rule field: {}",
                other
            ))),
        }
    }
}

/// Predicate applied to the rule's field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
}

impl RuleCondition {
    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
        }
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCondition {
    type Err = FinDashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "contains" => Ok(Self::Contains),
            "equals" => Ok(Self::Equals),
            "starts_with" => Ok(Self::StartsWith),
            "ends_with" => Ok(Self::EndsWith),
            other => Err(FinDashError::Validation(format!(
                "Unknown rule condition: {}",
                other
            ))),
        }
    }
}

/// Default priority for new rules; lower numbers are evaluated first
pub const DEFAULT_RULE_PRIORITY: i64 = 999;

/// A user-defined categorization rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier
    pub id: RuleId,

    /// Owning user
    pub user_id: UserId,

    /// Field the predicate is applied to
    pub field: RuleField,

    /// Predicate kind
    pub condition: RuleCondition,

    /// Value to match against (matched case-insensitively for text fields)
    pub value: String,

    /// Category assigned when the rule matches
    pub category: String,

    /// Evaluation priority, lower = evaluated first
    pub priority: i64,

    /// When the rule was created; breaks priority ties
    pub created_at: DateTime<Utc>,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        user_id: UserId,
        field: RuleField,
        condition: RuleCondition,
        value: impl Into<String>,
        category: impl Into<String>,
        priority: i64,
    ) -> Self {
        Self {
            id: RuleId::new(),
            user_id,
            field,
            condition,
            value: value.into(),
            category: category.into(),
            priority,
            created_at: Utc::now(),
        }
    }

    /// Validate the rule before it is saved.
    ///
    /// String conditions on the numeric `amount` field are rejected here with
    /// a `TypeMismatch`, so evaluation never sees an incompatible predicate.
    pub fn validate(&self) -> FinDashResult<()> {
        if self.value.trim().is_empty() {
            return Err(FinDashError::Validation("Rule value is required".into()));
        }
        if self.category.trim().is_empty() {
            return Err(FinDashError::Validation(
                "Rule category is required".into(),
            ));
        }
        if self.field == RuleField::Amount && self.condition != RuleCondition::Equals {
            return Err(FinDashError::TypeMismatch {
                field: self.field.to_string(),
                condition: self.condition.to_string(),
            });
        }
        if self.field == RuleField::Amount {
            // The value must be a parseable amount for exact-cents comparison
            crate::models::Money::parse(&self.value).map_err(|e| {
                FinDashError::Validation(format!("Rule amount value: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payee_rule(condition: RuleCondition) -> Rule {
        Rule::new(
            UserId::new(),
            RuleField::Payee,
            condition,
            "Amazon",
            "Shopping",
            1,
        )
    }

    #[test]
    fn test_valid_text_rule() {
        assert!(payee_rule(RuleCondition::Contains).validate().is_ok());
        assert!(payee_rule(RuleCondition::StartsWith).validate().is_ok());
    }

    #[test]
    fn test_amount_equals_is_valid() {
        let rule = Rule::new(
            UserId::new(),
            RuleField::Amount,
            RuleCondition::Equals,
            "-5.50",
            "Coffee",
            1,
        );
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_string_condition_on_amount_rejected() {
        for condition in [
            RuleCondition::Contains,
            RuleCondition::StartsWith,
            RuleCondition::EndsWith,
        ] {
            let rule = Rule::new(
                UserId::new(),
                RuleField::Amount,
                condition,
                "5",
                "Coffee",
                1,
            );
            assert!(matches!(
                rule.validate(),
                Err(FinDashError::TypeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_amount_value_must_parse() {
        let rule = Rule::new(
            UserId::new(),
            RuleField::Amount,
            RuleCondition::Equals,
            "not-a-number",
            "Coffee",
            1,
        );
        assert!(matches!(rule.validate(), Err(FinDashError::Validation(_))));
    }

    #[test]
    fn test_empty_value_rejected() {
        let mut rule = payee_rule(RuleCondition::Contains);
        rule.value = "  ".into();
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_field_condition_round_trip() {
        for field in [
            RuleField::Payee,
            RuleField::Notes,
            RuleField::AccountName,
            RuleField::Amount,
        ] {
            assert_eq!(field.as_str().parse::<RuleField>().unwrap(), field);
        }
        for condition in [
            RuleCondition::Contains,
            RuleCondition::Equals,
            RuleCondition::StartsWith,
            RuleCondition::EndsWith,
        ] {
            assert_eq!(
                condition.as_str().parse::<RuleCondition>().unwrap(),
                condition
            );
        }
    }
}
