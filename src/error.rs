//! Custom error types for FinDash
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Nothing here is fatal to the process; every
//! error is scoped to a single user action.

use thiserror::Error;

/// The main error type for FinDash operations
#[derive(Error, Debug)]
pub enum FinDashError {
    /// Bad user input (malformed email, weak password, missing CSV columns)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential mismatch or unknown account
    #[error("Authentication error: {0}")]
    Auth(String),

    /// CSV import failures that abort the whole import (row-level issues are
    /// reported through the import report instead)
    #[error("Import error: {0}")]
    Import(String),

    /// Backing table store unreachable or rejected an operation
    #[error("Storage error: {0}")]
    Store(String),

    /// A rule predicate applied to an incompatible field type; rejected at
    /// rule-save time so it never surfaces during evaluation
    #[error("Condition '{condition}' cannot be applied to numeric field '{field}'")]
    TypeMismatch { field: String, condition: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl FinDashError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for rules
    pub fn rule_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Rule",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for users (email already registered)
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "User",
            identifier: email.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FinDashError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinDashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinDashError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for FinDash operations
pub type FinDashResult<T> = Result<T, FinDashError>;
