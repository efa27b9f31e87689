//! User repository
//!
//! Maps between `User`/`UserData` and their rows in the Users and User_Data
//! tables. Emails are unique and compared case-insensitively. The user set is
//! small and read rarely, so reads here are uncached.

use std::sync::Arc;

use crate::error::{FinDashError, FinDashResult};
use crate::models::{User, UserData, UserId};

use super::codec;
use super::table::{tables, TableBackend};

/// Repository for user accounts and their auxiliary data rows
pub struct UserRepository {
    backend: Arc<dyn TableBackend>,
}

impl UserRepository {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self { backend }
    }

    fn to_row(user: &User) -> Vec<String> {
        vec![
            user.id.to_string(),
            user.full_name.clone(),
            user.email.clone(),
            user.password_hash.clone(),
            user.reset_token.clone().unwrap_or_default(),
            codec::encode_opt_datetime(user.token_expiry),
            codec::encode_datetime(user.created_at),
        ]
    }

    fn from_row(row: &[String]) -> FinDashResult<User> {
        let t = &tables::USERS;
        let reset_token = t.cell(row, "reset_token")?;
        Ok(User {
            id: UserId::parse(t.cell(row, "user_id")?)
                .map_err(|e| FinDashError::Store(format!("Bad user_id in Users: {}", e)))?,
            full_name: t.cell(row, "full_name")?.to_string(),
            email: t.cell(row, "email")?.to_string(),
            password_hash: t.cell(row, "hashed_password")?.to_string(),
            reset_token: (!reset_token.is_empty()).then(|| reset_token.to_string()),
            token_expiry: codec::parse_opt_datetime(t.name, t.cell(row, "token_expiry")?)?,
            created_at: codec::parse_datetime(t.name, t.cell(row, "created_at")?)?,
        })
    }

    fn user_data_to_row(data: &UserData) -> Vec<String> {
        vec![
            data.user_id.to_string(),
            codec::encode_opt_datetime(data.last_sync_time),
            data.settings_json.clone(),
        ]
    }

    fn user_data_from_row(row: &[String]) -> FinDashResult<UserData> {
        let t = &tables::USER_DATA;
        Ok(UserData {
            user_id: UserId::parse(t.cell(row, "user_id")?)
                .map_err(|e| FinDashError::Store(format!("Bad user_id in User_Data: {}", e)))?,
            last_sync_time: codec::parse_opt_datetime(t.name, t.cell(row, "last_sync_time")?)?,
            settings_json: t.cell(row, "settings_json")?.to_string(),
        })
    }

    /// Persist a new user plus the auxiliary data row created at sign-up.
    /// Fails with a duplicate error if the email is already registered.
    pub fn create(&self, user: &User) -> FinDashResult<()> {
        if self.find_by_email(&user.email)?.is_some() {
            return Err(FinDashError::duplicate_email(&user.email));
        }
        self.backend
            .append_row(tables::USERS.name, Self::to_row(user))?;
        self.backend.append_row(
            tables::USER_DATA.name,
            Self::user_data_to_row(&UserData::new(user.id)),
        )
    }

    /// Look up a user by email, case-insensitively
    pub fn find_by_email(&self, email: &str) -> FinDashResult<Option<User>> {
        let t = &tables::USERS;
        for row in self.backend.rows(t.name)? {
            if t.cell(&row, "email")?.eq_ignore_ascii_case(email.trim()) {
                return Self::from_row(&row).map(Some);
            }
        }
        Ok(None)
    }

    /// Look up a user by id
    pub fn find_by_id(&self, user_id: UserId) -> FinDashResult<Option<User>> {
        let t = &tables::USERS;
        let key = user_id.to_string();
        for row in self.backend.rows(t.name)? {
            if t.cell(&row, "user_id")? == key {
                return Self::from_row(&row).map(Some);
            }
        }
        Ok(None)
    }

    /// Rewrite a user's row (password changes, reset token updates)
    pub fn update(&self, user: &User) -> FinDashResult<()> {
        self.backend.update_row(
            tables::USERS.name,
            "user_id",
            &user.id.to_string(),
            Self::to_row(user),
        )
    }

    /// Fetch the auxiliary data row for a user
    pub fn user_data(&self, user_id: UserId) -> FinDashResult<Option<UserData>> {
        let t = &tables::USER_DATA;
        let key = user_id.to_string();
        for row in self.backend.rows(t.name)? {
            if t.cell(&row, "user_id")? == key {
                return Self::user_data_from_row(&row).map(Some);
            }
        }
        Ok(None)
    }

    /// Rewrite a user's auxiliary data row
    pub fn update_user_data(&self, data: &UserData) -> FinDashResult<()> {
        self.backend.update_row(
            tables::USER_DATA.name,
            "user_id",
            &data.user_id.to_string(),
            Self::user_data_to_row(data),
        )
    }
}
