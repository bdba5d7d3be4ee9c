//! MusicMatch-RS: music search autocomplete backed by Last.fm
//!
//! The autocomplete engine validates input, filters a deduplicated
//! candidate set (or queries the Last.fm track search), and renders the
//! results into a click-to-select list served by a small web UI.

pub mod autocomplete;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod network;
pub mod web;

pub use autocomplete::{AutocompleteController, QueryValidator, SuggestionIndex, SuggestionRenderer};
pub use config::Settings;
pub use error::AutocompleteError;
pub use lastfm::{LastFm, RemoteTrack};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
