//! Suggestion source implementations

use super::index::SuggestionIndex;
use crate::config::Settings;
use crate::error::Result;
use crate::lastfm::LastFm;
use crate::network::HttpClient;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Trait for anything that can answer an autocomplete query
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Source name
    fn name(&self) -> &str;

    /// Fetch display-ready suggestions for a query
    async fn search(&self, query: &str) -> Result<Vec<String>>;
}

/// Get a source by name
pub fn get_backend(
    name: &str,
    settings: &Settings,
    client: &HttpClient,
    local: &Arc<LocalSource>,
) -> Option<Arc<dyn SuggestionSource>> {
    match name.to_lowercase().as_str() {
        "local" => Some(local.clone() as Arc<dyn SuggestionSource>),
        "lastfm" | "last.fm" => Some(Arc::new(LastFmSource::new(
            LastFm::new(&settings.lastfm),
            client.clone(),
        ))),
        _ => None,
    }
}

/// List available sources
pub fn list_backends() -> Vec<&'static str> {
    vec!["local", "lastfm"]
}

/// In-memory source backed by a [`SuggestionIndex`]
#[derive(Debug, Default)]
pub struct LocalSource {
    index: RwLock<SuggestionIndex>,
}

impl LocalSource {
    pub fn new(index: SuggestionIndex) -> Self {
        Self {
            index: RwLock::new(index),
        }
    }

    /// Replace the candidate set
    pub fn load<I, S>(&self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index.write().unwrap().load(items);
    }

    /// Replace the candidate set from untyped JSON
    pub fn load_json(&self, value: &Value) -> Result<()> {
        self.index.write().unwrap().load_json(value)
    }

    /// Synchronous lookup
    pub fn query(&self, text: &str) -> Vec<String> {
        self.index.read().unwrap().query(text)
    }

    pub fn candidates(&self) -> Vec<String> {
        self.index.read().unwrap().candidates().to_vec()
    }
}

#[async_trait]
impl SuggestionSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        Ok(self.query(query))
    }
}

/// Remote source backed by the Last.fm track search
pub struct LastFmSource {
    lastfm: LastFm,
    client: HttpClient,
}

impl LastFmSource {
    pub fn new(lastfm: LastFm, client: HttpClient) -> Self {
        Self { lastfm, client }
    }
}

#[async_trait]
impl SuggestionSource for LastFmSource {
    fn name(&self) -> &str {
        "lastfm"
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let tracks = self.lastfm.search_tracks(&self.client, query).await?;
        Ok(tracks.iter().map(|track| track.to_string()).collect())
    }
}
