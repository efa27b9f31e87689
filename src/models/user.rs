//! User model
//!
//! A registered account holder. The password is stored only as a salted
//! argon2 hash; the reset token fields back the password-reset flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name
    pub full_name: String,

    /// Email address, unique across users (compared case-insensitively)
    pub email: String,

    /// Argon2 PHC-string hash of the password; never the password itself
    pub password_hash: String,

    /// Outstanding password-reset token, if one was requested
    pub reset_token: Option<String>,

    /// Expiry of the reset token
    pub token_expiry: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record with a freshly generated id
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            reset_token: None,
            token_expiry: None,
            created_at: Utc::now(),
        }
    }

    /// Check whether the given reset token matches and has not expired
    pub fn reset_token_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, &self.token_expiry) {
            (Some(stored), Some(expiry)) => stored == token && now < *expiry,
            _ => false,
        }
    }
}

/// Per-user auxiliary data row, created alongside the user on sign-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: UserId,
    /// Last time external data was synced, if ever
    pub last_sync_time: Option<DateTime<Utc>>,
    /// Free-form user settings blob
    pub settings_json: String,
}

impl UserData {
    /// Default user data created at sign-up
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            last_sync_time: None,
            settings_json: "{}".to_string(),
        }
    }
}
