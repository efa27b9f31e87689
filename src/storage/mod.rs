//! Storage layer for FinDash
//!
//! Typed repositories over a tabular row store. The backend trait models the
//! store itself; repositories own the row mapping and the per-user TTL caches.
//! The default backend keeps each table as an atomically-written JSON file.

pub mod budgets;
pub mod cache;
pub mod codec;
pub mod json_backend;
pub mod rules;
pub mod table;
pub mod transactions;
pub mod users;

pub use budgets::BudgetRepository;
pub use cache::{TtlCache, DEFAULT_CACHE_TTL};
pub use json_backend::JsonTableBackend;
pub use rules::RuleRepository;
pub use table::{initialize_tables, TableBackend, TableSchema};
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use crate::config::paths::FinDashPaths;
use crate::error::FinDashResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub users: UserRepository,
    pub transactions: TransactionRepository,
    pub rules: RuleRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a Storage over any backend, ensuring all tables exist
    pub fn new(backend: Arc<dyn TableBackend>, cache_ttl: Duration) -> FinDashResult<Self> {
        initialize_tables(backend.as_ref())?;
        Ok(Self {
            users: UserRepository::new(Arc::clone(&backend)),
            transactions: TransactionRepository::new(Arc::clone(&backend), cache_ttl),
            rules: RuleRepository::new(Arc::clone(&backend), cache_ttl),
            budgets: BudgetRepository::new(backend, cache_ttl),
        })
    }

    /// Open the JSON-file backend under the configured data directory
    pub fn open(paths: &FinDashPaths, cache_ttl: Duration) -> FinDashResult<Self> {
        paths.ensure_directories()?;
        let backend = Arc::new(JsonTableBackend::new(paths.tables_dir()));
        Self::new(backend, cache_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_all_tables() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());
        Storage::open(&paths, DEFAULT_CACHE_TTL).unwrap();

        for schema in table::tables::ALL {
            assert!(
                paths.tables_dir().join(format!("{}.json", schema.name)).exists(),
                "missing table {}",
                schema.name
            );
        }
    }
}
