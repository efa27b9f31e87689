//! Signed-in session persistence
//!
//! The CLI is a sign-in-once tool: a successful sign-in writes session.json
//! and every authenticated command reads it back. Sign-out deletes the file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::paths::FinDashPaths;
use crate::error::{FinDashError, FinDashResult};
use crate::models::UserId;

/// The signed-in user recorded between commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            full_name: full_name.into(),
            started_at: Utc::now(),
        }
    }
}

/// Reads and writes the session file
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(paths: &FinDashPaths) -> Self {
        Self {
            path: paths.session_file(),
        }
    }

    /// The current session, if signed in
    pub fn load(&self) -> FinDashResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| FinDashError::Io(format!("Failed to read session file: {}", e)))?;
        let session = serde_json::from_str(&contents)
            .map_err(|e| FinDashError::Auth(format!("Session file is corrupt: {}", e)))?;
        Ok(Some(session))
    }

    /// The current session, or an auth error telling the user to sign in
    pub fn require(&self) -> FinDashResult<Session> {
        self.load()?.ok_or_else(|| {
            FinDashError::Auth("Not signed in. Run `findash signin` first".into())
        })
    }

    /// Record a sign-in
    pub fn save(&self, session: &Session) -> FinDashResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FinDashError::Io(format!("Failed to create directory: {}", e)))?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)
            .map_err(|e| FinDashError::Io(format!("Failed to write session file: {}", e)))
    }

    /// Record a sign-out. Succeeds even if no session exists.
    pub fn clear(&self) -> FinDashResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FinDashError::Io(format!(
                "Failed to remove session file: {}",
                e
            ))),
        }
    }
}
