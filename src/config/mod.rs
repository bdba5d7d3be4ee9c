//! Configuration module for MusicMatch-RS
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Find the settings file to use.
///
/// An explicit path always wins, then `MUSICMATCH_SETTINGS_PATH`, then the
/// first existing entry of [`default_paths`].
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("MUSICMATCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    default_paths().into_iter().find(|path| path.exists())
}

/// Load settings from `path` (defaults when `None`) and apply environment
/// overrides
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

/// Candidate settings locations, in lookup order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/musicmatch/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("musicmatch-rs/settings.yml"));
    }
    paths
}
