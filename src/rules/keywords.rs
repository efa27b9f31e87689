//! Builtin keyword fallback table
//!
//! When no user rule matches, the payee is checked against this table. Order
//! matters: the first category whose keyword appears in the lowercased payee
//! wins, so "walmart" lands in Groceries even though Shopping lists it too.

/// Builtin category names. User-supplied names that match one of these
/// case-insensitively are stored in this casing.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Uncategorized",
    "Income",
    "Food & Dining",
    "Groceries",
    "Transportation",
    "Gas & Fuel",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Personal Care",
    "Education",
    "Gifts & Donations",
    "Investments",
    "Transfer",
    "Other",
];

/// Keyword table for payee-based auto-categorization
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Income",
        &["salary", "paycheck", "deposit", "income", "payment received"],
    ),
    (
        "Food & Dining",
        &[
            "restaurant",
            "cafe",
            "starbucks",
            "mcdonald",
            "chipotle",
            "pizza",
            "uber eats",
            "doordash",
            "grubhub",
        ],
    ),
    (
        "Groceries",
        &[
            "whole foods",
            "trader joe",
            "safeway",
            "kroger",
            "walmart",
            "target",
            "grocery",
            "market",
        ],
    ),
    (
        "Transportation",
        &[
            "uber", "lyft", "taxi", "transit", "metro", "bus", "train", "parking",
        ],
    ),
    (
        "Gas & Fuel",
        &["shell", "chevron", "exxon", "mobil", "bp", "gas", "fuel"],
    ),
    (
        "Shopping",
        &[
            "amazon", "ebay", "etsy", "target", "walmart", "costco", "best buy",
        ],
    ),
    (
        "Entertainment",
        &[
            "netflix",
            "spotify",
            "hulu",
            "disney",
            "movie",
            "theater",
            "steam",
            "playstation",
        ],
    ),
    (
        "Bills & Utilities",
        &[
            "electric", "water", "internet", "phone", "verizon", "at&t", "comcast", "utility",
        ],
    ),
    (
        "Healthcare",
        &[
            "pharmacy", "doctor", "hospital", "medical", "cvs", "walgreens", "health",
        ],
    ),
    (
        "Travel",
        &["airline", "hotel", "airbnb", "booking", "expedia", "flight"],
    ),
    (
        "Personal Care",
        &["salon", "spa", "gym", "fitness", "haircut"],
    ),
    (
        "Transfer",
        &["transfer", "venmo", "paypal", "zelle", "cash app"],
    ),
];

/// Canonical casing for a builtin category name, if the name is one
pub fn canonical_category(name: &str) -> Option<&'static str> {
    DEFAULT_CATEGORIES
        .iter()
        .find(|category| category.eq_ignore_ascii_case(name))
        .copied()
}

/// Find the keyword category for a payee, if any
pub fn keyword_category(payee: &str) -> Option<&'static str> {
    if payee.is_empty() {
        return None;
    }
    let payee_lower = payee.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| payee_lower.contains(kw)) {
            return Some(category);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(keyword_category("STARBUCKS #1234"), Some("Food & Dining"));
        assert_eq!(keyword_category("Starbucks Store"), Some("Food & Dining"));
    }

    #[test]
    fn test_first_listed_category_wins() {
        // "walmart" appears under both Groceries and Shopping
        assert_eq!(keyword_category("Walmart Supercenter"), Some("Groceries"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(keyword_category("Quiet Corner Books"), None);
        assert_eq!(keyword_category(""), None);
    }

    #[test]
    fn test_canonical_category() {
        assert_eq!(canonical_category("groceries"), Some("Groceries"));
        assert_eq!(canonical_category("FOOD & DINING"), Some("Food & Dining"));
        assert_eq!(canonical_category("Coffee"), None);
    }

    #[test]
    fn test_income_keywords() {
        assert_eq!(keyword_category("Direct Deposit Payroll"), Some("Income"));
    }
}
