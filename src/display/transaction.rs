//! Transaction display formatting

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;
use crate::services::ImportReport;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Payee")]
    payee: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            payee: txn.payee.clone(),
            amount: txn.amount.to_string(),
            category: txn.category_name().to_string(),
            notes: truncate(&txn.notes, 30),
        }
    }
}

/// Render a transaction listing
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions.iter().map(TransactionRow::from).collect();
    Table::new(rows)
        .with(Style::sharp())
        .modify(Columns::single(2), Alignment::right())
        .to_string()
}

/// Render one transaction with its identifier, for use with `txn categorize`
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Payee:       {}\n", txn.payee));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Category:    {}\n", txn.category_name()));
    if !txn.account_name.is_empty() {
        output.push_str(&format!("Account:     {}\n", txn.account_name));
    }
    if !txn.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", txn.notes));
    }
    output
}

/// Render an import outcome, including every rejected row
pub fn format_import_report(report: &ImportReport) -> String {
    let mut output = format!(
        "Imported {} of {} rows.\n",
        report.imported,
        report.total_rows()
    );
    if !report.errors.is_empty() {
        output.push_str(&format!("{} rows were skipped:\n", report.errors.len()));
        for error in &report.errors {
            output.push_str(&format!("  line {}: {}\n", error.line, error.message));
        }
    }
    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};
    use crate::services::import::RowError;
    use chrono::NaiveDate;

    fn txn(payee: &str, cents: i64) -> Transaction {
        Transaction::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            payee,
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(format_transaction_table(&[]), "No transactions found.");
    }

    #[test]
    fn test_table_contains_fields() {
        let table = format_transaction_table(&[txn("Starbucks", -550)]);
        assert!(table.contains("Starbucks"));
        assert!(table.contains("-$5.50"));
        assert!(table.contains("Uncategorized"));
    }

    #[test]
    fn test_import_report_lists_line_numbers() {
        let report = ImportReport {
            imported: 2,
            errors: vec![RowError {
                line: 3,
                message: "Invalid date".to_string(),
            }],
        };
        let rendered = format_import_report(&report);
        assert!(rendered.contains("Imported 2 of 3 rows."));
        assert!(rendered.contains("line 3: Invalid date"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long note indeed", 10), "a very lo…");
    }
}
