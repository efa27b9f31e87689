//! Sign-up input validation
//!
//! Email and password checks run before any credential is stored. Failures are
//! `Validation` errors with a message suitable for direct display.

use crate::error::{FinDashError, FinDashResult};

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate an email address shape: local part, one `@`, and a domain with a
/// dot-separated TLD of at least two letters.
pub fn validate_email(email: &str) -> FinDashResult<()> {
    let email = email.trim();
    let invalid = || FinDashError::Validation(format!("Invalid email address: {}", email));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return Err(invalid());
    }

    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(invalid());
    }
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validate password strength: at least eight characters with an uppercase
/// letter, a lowercase letter, and a digit.
pub fn validate_password(password: &str) -> FinDashResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(FinDashError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(FinDashError::Validation(
            "Password must contain an uppercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(FinDashError::Validation(
            "Password must contain a lowercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(FinDashError::Validation(
            "Password must contain a digit".into(),
        ));
    }
    Ok(())
}
