//! Password hashing with Argon2id
//!
//! Passwords are stored only as PHC-format hash strings. Verification parses
//! the stored string, so parameter upgrades apply to new hashes without
//! invalidating old ones.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{FinDashError, FinDashResult};

/// Hash a password into a PHC-format string with a fresh random salt
pub fn hash_password(password: &str) -> FinDashResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FinDashError::Auth(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash
pub fn verify_password(password: &str, stored_hash: &str) -> FinDashResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| FinDashError::Auth(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("Correct1Horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Correct1Horse", &hash).unwrap());
        assert!(!verify_password("WrongPassword1", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Correct1Horse").unwrap();
        let b = hash_password("Correct1Horse").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
