//! User settings, loaded from a `settings.toml` file.
//!
//! Only preferences live here; gallery contents are never written to disk.

use crate::error::Result;
use crate::state::UploadOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "gallery-notes";

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upload_order: UploadOrder,
    pub history_limit: usize,
    pub theme: ThemeChoice,
    /// `tracing` filter directive, e.g. "info,gallery_notes=trace"
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_order: UploadOrder::Completion,
            history_limit: DEFAULT_HISTORY_LIMIT,
            theme: ThemeChoice::Dark,
            log_filter: None,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load settings from the user's config directory.
///
/// Never writes anything; see `load_or_default`.
pub fn load() -> Config {
    match get_default_config_path() {
        Some(path) => load_or_default(&path),
        None => Config::default(),
    }
}

/// Load settings from `path`, using the defaults when the file is
/// missing or cannot be parsed
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Config::default();
    }

    load_from_path(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "using default settings");
        Config::default()
    })
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
