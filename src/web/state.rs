//! Application state shared across handlers

use super::sessions::SessionStore;
use crate::autocomplete::{get_backend, LocalSource, SuggestionSource};
use crate::config::Settings;
use crate::network::HttpClient;
use std::sync::Arc;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// In-memory candidate source used by the search view
    pub local: Arc<LocalSource>,
    /// Source used by the home view and the autocomplete API
    pub backend: Arc<dyn SuggestionSource>,
    /// Live browser sessions
    pub sessions: SessionStore,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let local = Arc::new(LocalSource::default());
        local.load(&settings.autocomplete.candidates);

        let backend = get_backend(&settings.autocomplete.backend, &settings, &client, &local)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown autocomplete backend: {}",
                    settings.autocomplete.backend
                )
            })?;

        if backend.name() == "lastfm" && settings.lastfm.api_key.is_none() {
            warn!("No Last.fm API key configured, remote lookups will fail");
        }

        let sessions = SessionStore::new(
            settings.autocomplete.session_ttl,
            settings.autocomplete.max_sessions,
        );
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            local,
            backend,
            sessions,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
