//! CSV import service
//!
//! Imports bank-export CSVs. The header row must name `date`, `payee`, and
//! `amount` columns (any order, any case); `category`, `notes`, `account_name`,
//! `account_id`, and `pending` are picked up when present. Malformed rows are collected
//! with their file line numbers and never abort the rest of the import. Each
//! imported row is categorized before it is persisted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::error::{FinDashError, FinDashResult};
use crate::models::{CategorySource, Money, Rule, Transaction, UserId};
use crate::rules::{canonical_category, categorize};
use crate::storage::Storage;

/// One row that could not be imported
#[derive(Debug, Clone)]
pub struct RowError {
    /// Line number in the file (the header row is line 1)
    pub line: u64,
    pub message: String,
}

/// Outcome of one import run
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Number of rows persisted
    pub imported: usize,
    /// Rows rejected, in file order
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// Total data rows seen
    pub fn total_rows(&self) -> usize {
        self.imported + self.errors.len()
    }
}

/// Positions of the recognized columns in the header row
#[derive(Debug, Clone)]
struct ColumnMap {
    date: usize,
    payee: usize,
    amount: usize,
    category: Option<usize>,
    notes: Option<usize>,
    account_name: Option<usize>,
    account_id: Option<usize>,
    pending: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> FinDashResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        match (find("date"), find("payee"), find("amount")) {
            (Some(date), Some(payee), Some(amount)) => Ok(Self {
                date,
                payee,
                amount,
                category: find("category"),
                notes: find("notes"),
                account_name: find("account_name"),
                account_id: find("account_id"),
                pending: find("pending"),
            }),
            (date, payee, amount) => {
                let missing: Vec<&str> = [(date, "date"), (payee, "payee"), (amount, "amount")]
                    .into_iter()
                    .filter_map(|(idx, name)| idx.is_none().then_some(name))
                    .collect();
                Err(FinDashError::Import(format!(
                    "Missing required columns: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Service for CSV transaction import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import transactions from a CSV file on disk
    pub fn import_file(&self, user_id: UserId, path: &Path) -> FinDashResult<ImportReport> {
        let file = File::open(path).map_err(|e| {
            FinDashError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.import_reader(user_id, file)
    }

    /// Import transactions from any CSV source
    pub fn import_reader<R: Read>(&self, user_id: UserId, reader: R) -> FinDashResult<ImportReport> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
        let rules = self.storage.rules.list_for_user(user_id)?;

        let mut report = ImportReport::default();
        let mut transactions = Vec::new();

        for result in csv_reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    report.errors.push(RowError {
                        line,
                        message: format!("Unreadable row: {}", e),
                    });
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            match Self::parse_row(user_id, &columns, &record, &rules) {
                Ok(txn) => transactions.push(txn),
                Err(message) => report.errors.push(RowError { line, message }),
            }
        }

        self.storage.transactions.append_many(&transactions)?;
        report.imported = transactions.len();
        Ok(report)
    }

    fn parse_row(
        user_id: UserId,
        columns: &ColumnMap,
        record: &StringRecord,
        rules: &[Rule],
    ) -> Result<Transaction, String> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let date_cell = cell(columns.date);
        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date: {:?} (expected YYYY-MM-DD)", date_cell))?;

        let amount_cell = cell(columns.amount);
        let amount = Money::parse(amount_cell)
            .map_err(|_| format!("Invalid amount: {:?}", amount_cell))?;

        let payee = cell(columns.payee);
        if payee.is_empty() {
            return Err("Missing payee".to_string());
        }

        let mut txn = Transaction::new(user_id, date, payee, amount);
        if let Some(idx) = columns.notes {
            txn.notes = cell(idx).to_string();
        }
        if let Some(idx) = columns.account_name {
            txn.account_name = cell(idx).to_string();
        }
        if let Some(idx) = columns.account_id {
            txn.account_id = cell(idx).to_string();
        }
        if let Some(idx) = columns.pending {
            txn.pending = matches!(
                cell(idx).to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "pending"
            );
        }

        // A category in the file counts as user-assigned; otherwise resolve
        // through rules and the keyword table
        let file_category = columns.category.map(cell).filter(|c| !c.is_empty());
        if let Some(category) = file_category {
            let category = canonical_category(category).unwrap_or(category);
            txn.set_category(category, CategorySource::Manual);
        } else if let Some((category, source)) = categorize(&txn, rules) {
            txn.set_category(category, source);
        }

        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinDashPaths;
    use crate::models::{RuleCondition, RuleField};
    use crate::storage::DEFAULT_CACHE_TTL;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, DEFAULT_CACHE_TTL).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_import_valid_rows() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "date,payee,amount\n\
                   2025-10-01,Starbucks #1234,-5.50\n\
                   2025-10-02,Employer Inc,2500.00\n";

        let report = ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();

        assert_eq!(report.imported, 2);
        assert!(report.errors.is_empty());

        let listed = storage.transactions.list_for_user(user_id).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].amount, Money::from_cents(-550));
    }

    #[test]
    fn test_malformed_rows_are_collected_not_fatal() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "date,payee,amount\n\
                   2025-10-01,Starbucks,-5.50\n\
                   not-a-date,Shop,-1.00\n\
                   2025-10-03,Shop,not-a-number\n\
                   2025-10-04,,\n\
                   2025-10-05,Employer,2500.00\n";

        let report = ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.total_rows(), 5);
        // Header is line 1, so the first bad row is line 3
        assert_eq!(report.errors[0].line, 3);
        assert!(report.errors[0].message.contains("Invalid date"));
        assert_eq!(report.errors[1].line, 4);
        assert!(report.errors[1].message.contains("Invalid amount"));
        assert_eq!(report.errors[2].line, 5);

        assert_eq!(storage.transactions.list_for_user(user_id).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_required_column_aborts() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "date,description,amount\n2025-10-01,Starbucks,-5.50\n";

        let err = ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("payee"));
    }

    #[test]
    fn test_header_order_and_case_do_not_matter() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "Amount,PAYEE,Date,Notes\n-5.50,Starbucks,2025-10-01,morning coffee\n";

        let report = ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();
        assert_eq!(report.imported, 1);

        let listed = storage.transactions.list_for_user(user_id).unwrap();
        assert_eq!(listed[0].notes, "morning coffee");
    }

    #[test]
    fn test_import_categorizes_before_persist() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        storage
            .rules
            .append(&Rule::new(
                user_id,
                RuleField::Payee,
                RuleCondition::Contains,
                "employer",
                "Salary",
                1,
            ))
            .unwrap();

        let csv = "date,payee,amount\n\
                   2025-10-01,Starbucks #1234,-5.50\n\
                   2025-10-02,Employer Inc,2500.00\n\
                   2025-10-03,Quiet Corner Books,-12.00\n";
        ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();

        let listed = storage.transactions.list_for_user(user_id).unwrap();
        let by_payee = |p: &str| listed.iter().find(|t| t.payee.contains(p)).unwrap();

        // Rule match
        assert_eq!(by_payee("Employer").category.as_deref(), Some("Salary"));
        assert_eq!(by_payee("Employer").category_source, CategorySource::Rule);
        // Keyword fallback
        assert_eq!(
            by_payee("Starbucks").category.as_deref(),
            Some("Food & Dining")
        );
        assert_eq!(by_payee("Starbucks").category_source, CategorySource::Keyword);
        // Neither
        assert!(by_payee("Quiet").category.is_none());
    }

    #[test]
    fn test_pending_column_is_parsed() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "date,payee,amount,pending\n\
                   2025-10-01,Starbucks,-5.50,true\n\
                   2025-10-02,Employer,2500.00,false\n";

        ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();

        let listed = storage.transactions.list_for_user(user_id).unwrap();
        let starbucks = listed.iter().find(|t| t.payee == "Starbucks").unwrap();
        let employer = listed.iter().find(|t| t.payee == "Employer").unwrap();
        assert!(starbucks.pending);
        assert!(!employer.pending);
    }

    #[test]
    fn test_file_category_counts_as_manual() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "date,payee,amount,category\n2025-10-01,Starbucks,-5.50,Coffee\n";

        ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();

        let listed = storage.transactions.list_for_user(user_id).unwrap();
        assert_eq!(listed[0].category.as_deref(), Some("Coffee"));
        assert_eq!(listed[0].category_source, CategorySource::Manual);
    }

    #[test]
    fn test_file_category_is_canonicalized() {
        let (_dir, storage) = storage();
        let user_id = UserId::new();
        let csv = "date,payee,amount,category\n2025-10-01,Safeway,-25.00,groceries\n";

        ImportService::new(&storage)
            .import_reader(user_id, csv.as_bytes())
            .unwrap();

        let listed = storage.transactions.list_for_user(user_id).unwrap();
        assert_eq!(listed[0].category.as_deref(), Some("Groceries"));
    }
}
