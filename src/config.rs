//! Configuration loading
//!
//! Precedence: CLI flags > environment (`LIFEDASH_*`) > config file
//! (`<config dir>/lifedash/config.json`) > defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::types::{LifedashError, Result};

pub const ENV_URL: &str = "LIFEDASH_URL";
pub const ENV_ANON_KEY: &str = "LIFEDASH_ANON_KEY";
pub const ENV_ACCESS_TOKEN: &str = "LIFEDASH_ACCESS_TOKEN";
pub const ENV_SNAPSHOT: &str = "LIFEDASH_SNAPSHOT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Hosted backend base URL (e.g., "https://xyz.supabase.co")
    #[serde(default)]
    pub backend_url: Option<String>,
    /// Public anon API key
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Signed-in user's access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Read from a local JSON snapshot instead of the backend
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl Config {
    /// Load the default config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `<config dir>/lifedash/config.json`, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lifedash").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load a config file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| LifedashError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Override fields from environment lookups (empty values are ignored)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_URL) {
            self.backend_url = Some(url);
        }
        if let Some(key) = get(ENV_ANON_KEY) {
            self.anon_key = Some(key);
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(snapshot) = get(ENV_SNAPSHOT) {
            self.snapshot = Some(PathBuf::from(snapshot));
        }
    }
}
