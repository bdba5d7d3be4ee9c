//! Input handling state machine
//!
//! Wires a [`SuggestionSource`] to a [`SuggestionRenderer`]. Every input or
//! selection event takes a new sequence number; a lookup only renders when
//! its number is still the latest once the source answers.

use super::backends::SuggestionSource;
use super::renderer::{ListEntry, RenderSurface, SuggestionRenderer};
use super::validator::QueryValidator;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Whether suggestions are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Displaying,
}

/// What an input event ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputOutcome {
    /// Input was ineligible and the list was cleared
    Cleared,
    /// Results (or the placeholder) were rendered
    Rendered(usize),
    /// A newer event arrived while the lookup was outstanding
    Stale,
    /// The source failed and the list was cleared
    Failed,
}

struct Inner<S: RenderSurface> {
    renderer: SuggestionRenderer<S>,
    input: String,
    state: ControllerState,
}

/// Autocomplete controller owning one renderer and one query lifecycle
pub struct AutocompleteController<S: RenderSurface> {
    source: Arc<dyn SuggestionSource>,
    inner: Mutex<Inner<S>>,
    latest: AtomicU64,
}

impl<S: RenderSurface> AutocompleteController<S> {
    pub fn new(source: Arc<dyn SuggestionSource>, surface: S) -> Self {
        Self::with_renderer(source, SuggestionRenderer::new(surface))
    }

    pub fn with_renderer(source: Arc<dyn SuggestionSource>, renderer: SuggestionRenderer<S>) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                renderer,
                input: String::new(),
                state: ControllerState::Idle,
            }),
            latest: AtomicU64::new(0),
        }
    }

    /// Register a callback fired whenever an entry is selected
    pub fn on_select<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.inner.lock().unwrap().renderer.on_select(callback);
    }

    /// Handle an input-change event carrying the full input value
    pub async fn on_input(&self, value: &str) -> InputOutcome {
        let query = value.trim();

        // The sequence number and the input it belongs to change together.
        let seq = {
            let mut inner = self.inner.lock().unwrap();
            let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            inner.input = value.to_string();

            if !QueryValidator::is_eligible(query) {
                inner.renderer.clear();
                inner.state = ControllerState::Idle;
                return InputOutcome::Cleared;
            }
            seq
        };

        let result = self.source.search(query).await;

        let mut inner = self.inner.lock().unwrap();
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!("Discarding stale {} response for '{}'", self.source.name(), query);
            return InputOutcome::Stale;
        }

        match result {
            Ok(results) => {
                inner.renderer.render(&results);
                inner.state = ControllerState::Displaying;
                InputOutcome::Rendered(results.len())
            }
            Err(e) => {
                warn!("Error fetching suggestions from {}: {}", self.source.name(), e);
                inner.renderer.clear();
                inner.state = ControllerState::Idle;
                InputOutcome::Failed
            }
        }
    }

    /// Handle a click on the entry at `index`.
    ///
    /// Returns the selected text, which now also fills the input.
    pub fn select(&self, index: usize) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        let text = inner.renderer.click(index)?;

        // Outstanding lookups must not reopen the list.
        self.latest.fetch_add(1, Ordering::SeqCst);

        inner.input = text.clone();
        inner.state = ControllerState::Idle;
        debug!("Selected suggestion '{}'", text);

        Some(text)
    }

    /// Current raw input value
    pub fn input_value(&self) -> String {
        self.inner.lock().unwrap().input.clone()
    }

    pub fn state(&self) -> ControllerState {
        self.inner.lock().unwrap().state
    }

    /// Snapshot of the rendered list
    pub fn entries(&self) -> Vec<ListEntry> {
        self.inner.lock().unwrap().renderer.entries().to_vec()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}
