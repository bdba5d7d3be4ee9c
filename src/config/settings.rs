//! Settings structures for MusicMatch-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub autocomplete: AutocompleteSettings,
    pub lastfm: LastFmSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable lookup
    pub fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("MUSICMATCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("MUSICMATCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("MUSICMATCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("MUSICMATCH_AUTOCOMPLETE_BACKEND") {
            self.autocomplete.backend = val;
        }
        if let Some(val) = var("LASTFM_API_KEY") {
            self.lastfm.api_key = Some(val);
        }
        if let Some(val) = var("LASTFM_BASE_URL") {
            self.lastfm.base_url = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Music Match".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Autocomplete behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSettings {
    /// Backend used by the home view (local, lastfm)
    pub backend: String,
    /// Initial candidates for the local index
    pub candidates: Vec<String>,
    /// Seconds an idle browser session is kept
    pub session_ttl: u64,
    /// Maximum number of live sessions
    pub max_sessions: u64,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            backend: "lastfm".to_string(),
            candidates: ["Apple", "Banana", "Orange", "Mango", "Pineapple"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            session_ttl: 1800,
            max_sessions: 10_000,
        }
    }
}

/// Last.fm API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LastFmSettings {
    /// API endpoint
    pub base_url: String,
    /// API key, required for remote lookups
    pub api_key: Option<String>,
    /// Maximum number of tracks per lookup (API default when unset)
    pub limit: Option<u32>,
}

impl Default for LastFmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://ws.audioscrobbler.com/2.0/".to_string(),
            api_key: None,
            limit: None,
        }
    }
}
