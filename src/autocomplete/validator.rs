//! Input eligibility checks

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of characters before a lookup is issued
pub const MIN_QUERY_LEN: usize = 3;

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Decides whether raw input may trigger a search
pub struct QueryValidator;

impl QueryValidator {
    /// Eligible iff the trimmed input has at least [`MIN_QUERY_LEN`]
    /// characters, all of them ASCII letters or digits
    pub fn is_eligible(raw: &str) -> bool {
        let query = raw.trim();
        query.len() >= MIN_QUERY_LEN && ALPHANUMERIC.is_match(query)
    }
}
