//! Cell encoding shared by the repositories
//!
//! Table cells are strings. Timestamps are RFC 3339, dates are ISO `YYYY-MM-DD`,
//! amounts are integer cents, and empty cells stand for absent optional values.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{FinDashError, FinDashResult};
use crate::models::Money;

/// Encode a timestamp cell
pub fn encode_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Encode an optional timestamp cell (empty = absent)
pub fn encode_opt_datetime(dt: Option<DateTime<Utc>>) -> String {
    dt.map(encode_datetime).unwrap_or_default()
}

/// Parse a timestamp cell
pub fn parse_datetime(table: &str, cell: &str) -> FinDashResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(cell)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FinDashError::Store(format!("Bad timestamp in {}: {} ({})", table, cell, e)))
}

/// Parse an optional timestamp cell
pub fn parse_opt_datetime(table: &str, cell: &str) -> FinDashResult<Option<DateTime<Utc>>> {
    if cell.is_empty() {
        Ok(None)
    } else {
        parse_datetime(table, cell).map(Some)
    }
}

/// Parse an ISO date cell
pub fn parse_date(table: &str, cell: &str) -> FinDashResult<NaiveDate> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .map_err(|e| FinDashError::Store(format!("Bad date in {}: {} ({})", table, cell, e)))
}

/// Encode an amount cell as integer cents
pub fn encode_cents(amount: Money) -> String {
    amount.cents().to_string()
}

/// Parse an integer-cents amount cell
pub fn parse_cents(table: &str, cell: &str) -> FinDashResult<Money> {
    cell.parse::<i64>()
        .map(Money::from_cents)
        .map_err(|_| FinDashError::Store(format!("Bad amount in {}: {}", table, cell)))
}

/// Encode a boolean cell
pub fn encode_bool(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Parse a boolean cell (empty = false)
pub fn parse_bool(table: &str, cell: &str) -> FinDashResult<bool> {
    match cell {
        "" | "false" => Ok(false),
        "true" => Ok(true),
        other => Err(FinDashError::Store(format!(
            "Bad boolean in {}: {}",
            table, other
        ))),
    }
}
