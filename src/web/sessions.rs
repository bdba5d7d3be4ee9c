//! Per-browser autocomplete sessions

use crate::autocomplete::{AutocompleteController, ListSurface, SuggestionSource};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Controller owned by a single browser page
pub type SessionController = AutocompleteController<ListSurface>;

/// Session store with idle expiry
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Uuid, Arc<SessionController>>,
}

impl SessionStore {
    /// Create a store evicting sessions idle for `ttl_seconds`
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_idle(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    /// Start a session bound to `source`
    pub async fn create(&self, source: Arc<dyn SuggestionSource>) -> Uuid {
        let id = Uuid::new_v4();
        let controller = Arc::new(AutocompleteController::new(source, ListSurface::new()));
        tracing::debug!("Created session {} on {}", id, controller.source_name());
        self.cache.insert(id, controller).await;
        id
    }

    /// Look up a live session
    pub async fn get(&self, id: &Uuid) -> Option<Arc<SessionController>> {
        self.cache.get(id).await
    }

    /// Drop a session
    pub async fn remove(&self, id: &Uuid) {
        self.cache.invalidate(id).await;
    }
}
