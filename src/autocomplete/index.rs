//! Candidate index with case-insensitive deduplication and substring lookup

use crate::error::{AutocompleteError, Result};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized, duplicate-free set of autocomplete candidates
#[derive(Debug, Clone, Default)]
pub struct SuggestionIndex {
    candidates: Vec<String>,
}

impl SuggestionIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index pre-loaded with candidates
    pub fn with_candidates<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        index.load(items);
        index
    }

    /// Replace the candidate set.
    ///
    /// Every item is lower-cased; later items that are equal to an earlier
    /// one after case-folding are dropped.
    pub fn load<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for item in items {
            let normalized = item.as_ref().to_lowercase();
            if seen.insert(normalized.clone()) {
                candidates.push(normalized);
            }
        }

        self.candidates = candidates;
    }

    /// Replace the candidate set from untyped JSON.
    ///
    /// The value must be an array of strings. Nothing is stored unless the
    /// whole value validates.
    pub fn load_json(&mut self, value: &Value) -> Result<()> {
        let items = value.as_array().ok_or_else(|| {
            AutocompleteError::invalid_input(format!(
                "candidates must be an array, got {}",
                json_kind(value)
            ))
        })?;

        let strings = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().ok_or_else(|| {
                    AutocompleteError::invalid_input(format!(
                        "candidate at index {} must be a string, got {}",
                        i,
                        json_kind(item)
                    ))
                })
            })
            .collect::<Result<Vec<&str>>>()?;

        self.load(strings);
        Ok(())
    }

    /// Find every candidate containing `text`, sorted with [`collate`]
    pub fn query(&self, text: &str) -> Vec<String> {
        if text.is_empty() || self.candidates.is_empty() {
            return Vec::new();
        }

        let needle = text.to_lowercase();
        let mut matches: Vec<String> = self
            .candidates
            .iter()
            .filter(|candidate| candidate.contains(&needle))
            .cloned()
            .collect();

        matches.sort_by(|a, b| collate(a, b));
        matches
    }

    /// Stored candidates in load order
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Locale-aware string comparison.
///
/// Primary order ignores case and accents, and ranks whitespace and
/// punctuation before digits before letters. Ties fall back to unaccented
/// first, then lower case first, then code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Base letters of the canonical decomposition, combining marks dropped
fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn accent_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
