//! Per-user read cache with a freshness window
//!
//! The repositories read whole tables per call, so hot per-user reads go
//! through this cache. Entries expire after the configured TTL and every write
//! to the owning table invalidates the user's entry, so a fresh read follows
//! each mutation.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::models::UserId;

/// Default freshness window for cached table reads
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// A TTL cache of per-user values
pub struct TtlCache<T> {
    entries: RwLock<HashMap<UserId, (Instant, T)>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    /// Create a cache with the given freshness window
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a non-expired entry for the user, if present.
    ///
    /// A poisoned lock degrades to a cache miss.
    pub fn get(&self, user_id: UserId) -> Option<T> {
        let entries = self.entries.read().ok()?;
        let (stored_at, value) = entries.get(&user_id)?;
        if stored_at.elapsed() < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    /// Store a value for the user
    pub fn put(&self, user_id: UserId, value: T) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(user_id, (Instant::now(), value));
        }
    }

    /// Drop the user's entry; the next read goes to the backing table
    pub fn invalidate(&self, user_id: UserId) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&user_id);
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
