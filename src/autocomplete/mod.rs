//! Autocomplete engine
//!
//! Candidate indexing, input validation, list rendering and the controller
//! that ties them to a suggestion source.

mod backends;
mod controller;
mod index;
mod renderer;
mod validator;

pub use backends::{get_backend, list_backends, LastFmSource, LocalSource, SuggestionSource};
pub use controller::{AutocompleteController, ControllerState, InputOutcome};
pub use index::{collate, SuggestionIndex};
pub use renderer::{ListEntry, ListSurface, RenderSurface, SuggestionRenderer, NO_MATCHES};
pub use validator::{QueryValidator, MIN_QUERY_LEN};

use tracing::warn;

/// Fetch suggestions for a raw query, stateless.
///
/// Ineligible input and source failures both yield an empty list.
pub async fn fetch_suggestions(source: &dyn SuggestionSource, raw: &str) -> Vec<String> {
    if !QueryValidator::is_eligible(raw) {
        return Vec::new();
    }

    match source.search(raw.trim()).await {
        Ok(suggestions) => suggestions,
        Err(e) => {
            warn!("Autocomplete lookup via {} failed: {}", source.name(), e);
            Vec::new()
        }
    }
}
