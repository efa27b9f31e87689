//! Tabular store abstraction
//!
//! All persistent data lives in named tables: a header row followed by string
//! cells. The `TableBackend` trait is the seam between the typed repositories
//! and whatever actually holds the rows; the shipping implementation is
//! [`JsonTableBackend`](super::json_backend::JsonTableBackend).

use crate::error::{FinDashError, FinDashResult};

/// Static definition of one table: its name and header row
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub headers: &'static [&'static str],
}

impl TableSchema {
    /// Index of a column by header name
    pub fn column_index(&self, name: &str) -> FinDashResult<usize> {
        self.headers
            .iter()
            .position(|h| *h == name)
            .ok_or_else(|| {
                FinDashError::Store(format!("Table {} has no column {}", self.name, name))
            })
    }

    /// Borrow a cell from a row by column name
    pub fn cell<'a>(&self, row: &'a [String], name: &str) -> FinDashResult<&'a str> {
        let idx = self.column_index(name)?;
        row.get(idx).map(String::as_str).ok_or_else(|| {
            FinDashError::Store(format!(
                "Row in table {} is missing column {}",
                self.name, name
            ))
        })
    }
}

/// The full table set. Every table is created at startup; Account_Balances and
/// Recurring_Templates are seeded for schema compatibility but carry no
/// operations yet.
pub mod tables {
    use super::TableSchema;

    pub const USERS: TableSchema = TableSchema {
        name: "Users",
        headers: &[
            "user_id",
            "full_name",
            "email",
            "hashed_password",
            "reset_token",
            "token_expiry",
            "created_at",
        ],
    };

    pub const USER_DATA: TableSchema = TableSchema {
        name: "User_Data",
        headers: &["user_id", "last_sync_time", "settings_json"],
    };

    pub const USER_RULES: TableSchema = TableSchema {
        name: "User_Rules",
        headers: &[
            "user_id",
            "rule_id",
            "priority",
            "rule_field",
            "rule_condition",
            "rule_value",
            "rule_category",
            "created_at",
        ],
    };

    pub const ACCOUNT_BALANCES: TableSchema = TableSchema {
        name: "Account_Balances",
        headers: &[
            "user_id",
            "date",
            "account_name",
            "balance",
            "account_type",
            "account_id",
        ],
    };

    pub const BUDGET_MONTHLY: TableSchema = TableSchema {
        name: "Budget_Monthly",
        headers: &["user_id", "month_year", "category", "budgeted", "last_updated"],
    };

    pub const RECURRING_TEMPLATES: TableSchema = TableSchema {
        name: "Recurring_Templates",
        headers: &[
            "user_id",
            "template_id",
            "description",
            "amount",
            "category",
            "frequency",
            "created_at",
        ],
    };

    pub const TRANSACTIONS: TableSchema = TableSchema {
        name: "Transactions",
        headers: &[
            "user_id",
            "transaction_id",
            "date",
            "payee",
            "amount",
            "category",
            "category_source",
            "account_name",
            "account_id",
            "notes",
            "pending",
            "created_at",
            "modified_at",
        ],
    };

    /// All tables, in creation order
    pub const ALL: [&TableSchema; 7] = [
        &USERS,
        &USER_DATA,
        &USER_RULES,
        &ACCOUNT_BALANCES,
        &BUDGET_MONTHLY,
        &RECURRING_TEMPLATES,
        &TRANSACTIONS,
    ];
}

/// A named-table row store.
///
/// Rows are `Vec<String>` in header order. Implementations must make each
/// mutation durable before returning; concurrency is last-write-wins.
pub trait TableBackend: Send + Sync {
    /// Create the table with its header row if it does not exist yet
    fn ensure_table(&self, schema: &TableSchema) -> FinDashResult<()>;

    /// All data rows of a table (the header row is not included)
    fn rows(&self, table: &str) -> FinDashResult<Vec<Vec<String>>>;

    /// Append a single row
    fn append_row(&self, table: &str, row: Vec<String>) -> FinDashResult<()>;

    /// Append many rows in one durable write
    fn append_rows(&self, table: &str, rows: Vec<Vec<String>>) -> FinDashResult<()>;

    /// Replace the row whose `key_column` cell equals `key`
    fn update_row(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        row: Vec<String>,
    ) -> FinDashResult<()>;

    /// Replace many rows, each identified by its `key_column` cell
    fn update_rows(
        &self,
        table: &str,
        key_column: &str,
        updates: Vec<(String, Vec<String>)>,
    ) -> FinDashResult<()> {
        for (key, row) in updates {
            self.update_row(table, key_column, &key, row)?;
        }
        Ok(())
    }

    /// Delete the row whose `key_column` cell equals `key`
    fn delete_row(&self, table: &str, key_column: &str, key: &str) -> FinDashResult<()>;

    /// Replace the entire row set of a table
    fn replace_rows(&self, table: &str, rows: Vec<Vec<String>>) -> FinDashResult<()>;
}

/// Create every table in the schema set that does not exist yet
pub fn initialize_tables(backend: &dyn TableBackend) -> FinDashResult<()> {
    for schema in tables::ALL {
        backend.ensure_table(schema)?;
    }
    Ok(())
}
