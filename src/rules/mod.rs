//! Transaction categorization
//!
//! User-defined rules evaluated in priority order, with a builtin keyword
//! table as the fallback.

pub mod engine;
pub mod keywords;

pub use engine::{apply_rules, categorize, rule_matches};
pub use keywords::{canonical_category, keyword_category, CATEGORY_KEYWORDS, DEFAULT_CATEGORIES};
