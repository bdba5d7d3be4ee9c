//! Error types for the autocomplete core

/// Failures surfaced by the autocomplete index and suggestion sources
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutocompleteError {
    /// Malformed data handed to the candidate index
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A suggestion source could not produce results
    #[error("Remote lookup failed: {0}")]
    RemoteLookup(String),
}

impl AutocompleteError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn remote_lookup(msg: impl Into<String>) -> Self {
        Self::RemoteLookup(msg.into())
    }
}

impl From<serde_json::Error> for AutocompleteError {
    fn from(err: serde_json::Error) -> Self {
        Self::RemoteLookup(format!("malformed response: {}", err))
    }
}

/// Result alias for autocomplete operations
pub type Result<T> = std::result::Result<T, AutocompleteError>;
