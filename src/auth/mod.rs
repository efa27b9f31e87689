//! Authentication building blocks
//!
//! Password hashing, sign-up input validation, and the signed-in session file.
//! The sign-up/sign-in flows themselves live in the auth service.

pub mod password;
pub mod session;
pub mod validate;

pub use password::{hash_password, verify_password};
pub use session::{Session, SessionStore};
pub use validate::{validate_email, validate_password};
