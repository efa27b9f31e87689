//! JSON file implementation of the table backend
//!
//! Each table is one pretty-printed JSON document under the data directory:
//! `{"headers": [...], "rows": [[...], ...]}`. Reads go to disk on every call;
//! freshness caching happens a layer up in the repositories. Writes go through
//! a temp file and an atomic rename so a crash never leaves a half-written
//! table behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FinDashError, FinDashResult};

use super::table::{TableBackend, TableSchema};

/// On-disk shape of one table file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TableFile {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Table backend that stores each table as a JSON file in one directory
pub struct JsonTableBackend {
    dir: PathBuf,
}

impl JsonTableBackend {
    /// Create a backend rooted at the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.json", table))
    }

    fn read_table(&self, table: &str) -> FinDashResult<TableFile> {
        let path = self.table_path(table);
        if !path.exists() {
            return Err(FinDashError::Store(format!("Table not found: {}", table)));
        }

        let file = File::open(&path).map_err(|e| {
            FinDashError::Store(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            FinDashError::Store(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Write a table file atomically (write to temp, sync, then rename)
    fn write_table(&self, table: &str, data: &TableFile) -> FinDashResult<()> {
        let path = self.table_path(table);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FinDashError::Store(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // Temp file in the same directory so the rename stays atomic
        let temp_path = path.with_extension("json.tmp");

        let file = File::create(&temp_path)
            .map_err(|e| FinDashError::Store(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| FinDashError::Store(format!("Failed to serialize table: {}", e)))?;
        writer
            .flush()
            .map_err(|e| FinDashError::Store(format!("Failed to flush table: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| FinDashError::Store(format!("Failed to sync table: {}", e)))?;

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FinDashError::Store(format!("Failed to rename temp file: {}", e))
        })
    }

    fn key_index(table: &str, data: &TableFile, key_column: &str) -> FinDashResult<usize> {
        data.headers
            .iter()
            .position(|h| h == key_column)
            .ok_or_else(|| {
                FinDashError::Store(format!("Table {} has no column {}", table, key_column))
            })
    }

    /// Data directory this backend writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableBackend for JsonTableBackend {
    fn ensure_table(&self, schema: &TableSchema) -> FinDashResult<()> {
        if self.table_path(schema.name).exists() {
            return Ok(());
        }
        let data = TableFile {
            headers: schema.headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        };
        self.write_table(schema.name, &data)
    }

    fn rows(&self, table: &str) -> FinDashResult<Vec<Vec<String>>> {
        Ok(self.read_table(table)?.rows)
    }

    fn append_row(&self, table: &str, row: Vec<String>) -> FinDashResult<()> {
        self.append_rows(table, vec![row])
    }

    fn append_rows(&self, table: &str, rows: Vec<Vec<String>>) -> FinDashResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut data = self.read_table(table)?;
        data.rows.extend(rows);
        self.write_table(table, &data)
    }

    fn update_row(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        row: Vec<String>,
    ) -> FinDashResult<()> {
        self.update_rows(table, key_column, vec![(key.to_string(), row)])
    }

    fn update_rows(
        &self,
        table: &str,
        key_column: &str,
        updates: Vec<(String, Vec<String>)>,
    ) -> FinDashResult<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let mut data = self.read_table(table)?;
        let idx = Self::key_index(table, &data, key_column)?;

        for (key, row) in updates {
            let target = data
                .rows
                .iter_mut()
                .find(|r| r.get(idx).map(String::as_str) == Some(key.as_str()))
                .ok_or_else(|| FinDashError::NotFound {
                    entity_type: "Row",
                    identifier: format!("{}={} in {}", key_column, key, table),
                })?;
            *target = row;
        }
        self.write_table(table, &data)
    }

    fn delete_row(&self, table: &str, key_column: &str, key: &str) -> FinDashResult<()> {
        let mut data = self.read_table(table)?;
        let idx = Self::key_index(table, &data, key_column)?;

        let before = data.rows.len();
        data.rows
            .retain(|r| r.get(idx).map(String::as_str) != Some(key));
        if data.rows.len() == before {
            return Err(FinDashError::NotFound {
                entity_type: "Row",
                identifier: format!("{}={} in {}", key_column, key, table),
            });
        }
        self.write_table(table, &data)
    }

    fn replace_rows(&self, table: &str, rows: Vec<Vec<String>>) -> FinDashResult<()> {
        let mut data = self.read_table(table)?;
        data.rows = rows;
        self.write_table(table, &data)
    }
}
