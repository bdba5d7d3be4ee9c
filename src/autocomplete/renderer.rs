//! Suggestion list rendering and click-to-select

use serde::Serialize;
use std::fmt;

/// Text shown when a query has no matches
pub const NO_MATCHES: &str = "No matches found";

/// A single row on the suggestion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub text: String,
    /// Placeholder rows are not selectable
    pub selectable: bool,
}

impl ListEntry {
    pub fn suggestion(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selectable: true,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selectable: false,
        }
    }
}

/// Ordered list container supplied by the host UI
pub trait RenderSurface: Send {
    /// Append an entry at the end of the list
    fn append(&mut self, entry: ListEntry);

    /// Remove every entry
    fn remove_all(&mut self);

    /// Current entries, top to bottom
    fn entries(&self) -> &[ListEntry];
}

/// In-memory surface, serialized by the web layer
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSurface {
    entries: Vec<ListEntry>,
}

impl ListSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for ListSurface {
    fn append(&mut self, entry: ListEntry) {
        self.entries.push(entry);
    }

    fn remove_all(&mut self) {
        self.entries.clear();
    }

    fn entries(&self) -> &[ListEntry] {
        &self.entries
    }
}

type SelectCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Draws suggestions onto a [`RenderSurface`] and reports selections
pub struct SuggestionRenderer<S: RenderSurface> {
    surface: S,
    on_select: Option<SelectCallback>,
}

impl<S: RenderSurface> SuggestionRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            on_select: None,
        }
    }

    /// Register the callback invoked with the text of a clicked entry
    pub fn on_select<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    /// Replace the list with `results`, or with the placeholder when empty
    pub fn render(&mut self, results: &[String]) {
        self.surface.remove_all();

        if results.is_empty() {
            self.surface.append(ListEntry::placeholder(NO_MATCHES));
            return;
        }

        for result in results {
            if result.is_empty() {
                tracing::warn!("Empty suggestion rendered");
            }
            self.surface.append(ListEntry::suggestion(result.as_str()));
        }

        tracing::debug!("Rendered {} suggestions", results.len());
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.surface.remove_all();
    }

    /// Click the entry at `index`.
    ///
    /// Selecting a suggestion fires the callback and closes the list.
    /// Placeholder rows and out-of-range indices are ignored.
    pub fn click(&mut self, index: usize) -> Option<String> {
        let entry = self.surface.entries().get(index)?;
        if !entry.selectable {
            return None;
        }

        let text = entry.text.clone();
        if let Some(ref callback) = self.on_select {
            callback(&text);
        }
        self.clear();

        Some(text)
    }

    pub fn entries(&self) -> &[ListEntry] {
        self.surface.entries()
    }
}

impl<S: RenderSurface> fmt::Debug for SuggestionRenderer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionRenderer")
            .field("entries", &self.surface.entries())
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}
