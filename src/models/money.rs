//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Negative amounts are expenses, positive amounts income. The parser
//! is tolerant of the formats bank CSV exports actually contain: currency
//! symbols, thousands separators, and accounting-style parentheses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive (income)
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative (expense)
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string.
    ///
    /// Accepts decimal strings as found in bank CSV exports:
    /// `"10.50"`, `"-10.50"`, `"$1,234.56"`, `"(5.50)"` (accounting negative),
    /// and bare integers (`"10"` means ten whole units).
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        // Accounting format wraps negatives in parentheses; a lone paren is
        // malformed input, not a positive amount
        let (paren_negative, raw) = match (raw.starts_with('('), raw.ends_with(')')) {
            (true, true) => (true, &raw[1..raw.len() - 1]),
            (false, false) => (false, raw),
            _ => return Err(MoneyParseError::InvalidFormat(s.to_string())),
        };

        // Strip currency symbols and thousands separators
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        let (sign_negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };

        if digits.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cents = match digits.split_once('.') {
            Some((whole, frac)) => {
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    whole
                        .parse()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                };
                if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(MoneyParseError::InvalidFormat(s.to_string()));
                }
                let mut frac_cents: i64 = frac
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
                if frac.len() == 1 {
                    frac_cents *= 10;
                }
                whole * 100 + frac_cents
            }
            None => {
                digits
                    .parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                    * 100
            }
        };

        let negative = paren_negative ^ sign_negative;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Render as a decimal string without a currency symbol ("-5.50")
    pub fn to_decimal_string(&self) -> String {
        format!("{}{}.{:02}", if self.0 < 0 { "-" } else { "" }, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).abs();
        let cents = (self.0 % 100).abs();
        if self.is_negative() {
            write!(f, "-${}.{:02}", dollars, cents)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Empty amount"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_bank_formats() {
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-$10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("$1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("(5.50)").unwrap().cents(), -550);
        assert_eq!(Money::parse(" -5.50 ").unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.").is_err());
    }

    #[test]
    fn test_parse_rejects_unbalanced_parens() {
        assert!(Money::parse("(5.50").is_err());
        assert!(Money::parse("5.50)").is_err());
        assert!(Money::parse("()").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_decimal_string_round_trip() {
        let m = Money::from_cents(-550);
        assert_eq!(m.to_decimal_string(), "-5.50");
        assert_eq!(Money::parse(&m.to_decimal_string()).unwrap(), m);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(-250);
        assert_eq!((a + b).cents(), 750);
        assert_eq!((a - b).cents(), 1250);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, Money::from_cents(50)].into_iter().sum();
        assert_eq!(total.cents(), 800);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
        assert_eq!(Money::from_cents(-100).abs().cents(), 100);
    }
}
