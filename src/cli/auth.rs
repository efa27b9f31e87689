//! Account CLI commands
//!
//! Sign-up, sign-in, sign-out, and the password-reset flow. Passwords are
//! prompted without echo, never taken as arguments.

use crate::auth::{Session, SessionStore};
use crate::config::paths::FinDashPaths;
use crate::error::{FinDashError, FinDashResult};
use crate::services::AuthService;
use crate::storage::Storage;

fn prompt_password(prompt: &str) -> FinDashResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| FinDashError::Io(format!("Failed to read password: {}", e)))
}

/// Handle `findash signup`
pub fn handle_signup(
    storage: &Storage,
    paths: &FinDashPaths,
    name: String,
    email: String,
) -> FinDashResult<()> {
    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(FinDashError::Validation("Passwords do not match".into()));
    }

    let service = AuthService::new(storage);
    let user = service.sign_up(&name, &email, &password)?;

    // Sign in right away
    let sessions = SessionStore::new(paths);
    sessions.save(&Session::new(user.id, &user.email, &user.full_name))?;

    println!("Account created for {}. You are signed in.", user.email);
    Ok(())
}

/// Handle `findash signin`
pub fn handle_signin(storage: &Storage, paths: &FinDashPaths, email: String) -> FinDashResult<()> {
    let password = prompt_password("Password: ")?;

    let service = AuthService::new(storage);
    let user = service.sign_in(&email, &password)?;

    let sessions = SessionStore::new(paths);
    sessions.save(&Session::new(user.id, &user.email, &user.full_name))?;

    println!("Signed in as {}.", user.full_name);
    Ok(())
}

/// Handle `findash signout`
pub fn handle_signout(paths: &FinDashPaths) -> FinDashResult<()> {
    SessionStore::new(paths).clear()?;
    println!("Signed out.");
    Ok(())
}

/// Handle `findash reset-request`
pub fn handle_reset_request(storage: &Storage, email: String) -> FinDashResult<()> {
    let token = AuthService::new(storage).request_password_reset(&email)?;
    println!("Reset token (valid for 1 hour): {}", token);
    println!("Run `findash reset-password --email {} --token <token>` to set a new password.", email);
    Ok(())
}

/// Handle `findash reset-password`
pub fn handle_reset_password(
    storage: &Storage,
    email: String,
    token: String,
) -> FinDashResult<()> {
    let password = prompt_password("New password: ")?;
    let confirm = prompt_password("Confirm new password: ")?;
    if password != confirm {
        return Err(FinDashError::Validation("Passwords do not match".into()));
    }

    AuthService::new(storage).reset_password(&email, &token, &password)?;
    println!("Password updated. Sign in with `findash signin --email {}`.", email);
    Ok(())
}
