//! Authentication service
//!
//! Sign-up, sign-in, and the password-reset flow. Sign-in failures are
//! deliberately indistinguishable between an unknown email and a wrong
//! password.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{hash_password, validate_email, validate_password, verify_password};
use crate::error::{FinDashError, FinDashResult};
use crate::models::User;
use crate::storage::Storage;

/// How long a password-reset token stays valid
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Service for account management
pub struct AuthService<'a> {
    storage: &'a Storage,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new account. The email must not be registered yet; the
    /// password is checked for strength and stored only as a hash.
    pub fn sign_up(&self, full_name: &str, email: &str, password: &str) -> FinDashResult<User> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(FinDashError::Validation("Full name is required".into()));
        }
        validate_email(email)?;
        validate_password(password)?;

        let user = User::new(full_name, email.trim(), hash_password(password)?);
        self.storage.users.create(&user)?;
        Ok(user)
    }

    /// Verify credentials and return the account
    pub fn sign_in(&self, email: &str, password: &str) -> FinDashResult<User> {
        let invalid = || FinDashError::Auth("Invalid email or password".into());

        let user = self
            .storage
            .users
            .find_by_email(email)?
            .ok_or_else(invalid)?;
        if !verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }
        Ok(user)
    }

    /// Issue a password-reset token valid for one hour and return it
    pub fn request_password_reset(&self, email: &str) -> FinDashResult<String> {
        let mut user = self
            .storage
            .users
            .find_by_email(email)?
            .ok_or_else(|| FinDashError::user_not_found(email))?;

        let token = Uuid::new_v4().simple().to_string();
        user.reset_token = Some(token.clone());
        user.token_expiry = Some(Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS));
        self.storage.users.update(&user)?;
        Ok(token)
    }

    /// Set a new password given a valid, unexpired reset token. A successful
    /// reset consumes the token.
    pub fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> FinDashResult<()> {
        let mut user = self
            .storage
            .users
            .find_by_email(email)?
            .ok_or_else(|| FinDashError::user_not_found(email))?;

        if !user.reset_token_valid(token, Utc::now()) {
            return Err(FinDashError::Auth(
                "Reset token is invalid or expired".into(),
            ));
        }

        validate_password(new_password)?;
        user.password_hash = hash_password(new_password)?;
        user.reset_token = None;
        user.token_expiry = None;
        self.storage.users.update(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinDashPaths;
    use crate::storage::DEFAULT_CACHE_TTL;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, DEFAULT_CACHE_TTL).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_sign_up_then_sign_in() {
        let (_dir, storage) = storage();
        let service = AuthService::new(&storage);

        let user = service
            .sign_up("Alice Doe", "alice@example.com", "Correct1Horse")
            .unwrap();
        assert!(user.password_hash.starts_with("$argon2"));

        let signed_in = service.sign_in("alice@example.com", "Correct1Horse").unwrap();
        assert_eq!(signed_in.id, user.id);
    }

    #[test]
    fn test_sign_in_failures_look_identical() {
        let (_dir, storage) = storage();
        let service = AuthService::new(&storage);
        service
            .sign_up("Alice Doe", "alice@example.com", "Correct1Horse")
            .unwrap();

        let unknown = service
            .sign_in("nobody@example.com", "Correct1Horse")
            .unwrap_err();
        let wrong = service
            .sign_in("alice@example.com", "WrongPassword1")
            .unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn test_sign_up_rejects_bad_input() {
        let (_dir, storage) = storage();
        let service = AuthService::new(&storage);

        assert!(service
            .sign_up("", "alice@example.com", "Correct1Horse")
            .is_err());
        assert!(service
            .sign_up("Alice Doe", "not-an-email", "Correct1Horse")
            .is_err());
        assert!(service
            .sign_up("Alice Doe", "alice@example.com", "weak")
            .is_err());
    }

    #[test]
    fn test_duplicate_sign_up_rejected() {
        let (_dir, storage) = storage();
        let service = AuthService::new(&storage);

        service
            .sign_up("Alice Doe", "alice@example.com", "Correct1Horse")
            .unwrap();
        let err = service
            .sign_up("Other Alice", "Alice@Example.com", "Correct1Horse")
            .unwrap_err();
        assert!(matches!(err, FinDashError::Duplicate { .. }));
    }

    #[test]
    fn test_password_reset_flow() {
        let (_dir, storage) = storage();
        let service = AuthService::new(&storage);
        service
            .sign_up("Alice Doe", "alice@example.com", "Correct1Horse")
            .unwrap();

        let token = service.request_password_reset("alice@example.com").unwrap();
        service
            .reset_password("alice@example.com", &token, "NewSecret99")
            .unwrap();

        assert!(service.sign_in("alice@example.com", "NewSecret99").is_ok());
        assert!(service
            .sign_in("alice@example.com", "Correct1Horse")
            .is_err());

        // Token is single-use
        let err = service
            .reset_password("alice@example.com", &token, "Another1Pass")
            .unwrap_err();
        assert!(matches!(err, FinDashError::Auth(_)));
    }

    #[test]
    fn test_reset_with_wrong_token() {
        let (_dir, storage) = storage();
        let service = AuthService::new(&storage);
        service
            .sign_up("Alice Doe", "alice@example.com", "Correct1Horse")
            .unwrap();
        service.request_password_reset("alice@example.com").unwrap();

        let err = service
            .reset_password("alice@example.com", "bogus-token", "NewSecret99")
            .unwrap_err();
        assert!(matches!(err, FinDashError::Auth(_)));
    }
}
