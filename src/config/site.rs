//! Site configuration (site.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::content::DEFAULT_THEME;

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "site.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Markdown shown on the about page; a built-in text is used when unset
    pub about: Option<String>,

    // Post index, in display order before sorting. Edited by hand.
    pub posts: Vec<String>,

    // Source
    /// Site directory holding the post files, relative to the base directory
    pub content_dir: String,
    /// Fetch posts from this URL instead of `content_dir`
    pub base_url: Option<String>,
    pub fetch_timeout_secs: Option<u64>,

    // Writing
    pub highlight: bool,
    pub highlight_theme: String,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            about: None,

            posts: Vec::new(),

            content_dir: ".".to_string(),
            base_url: None,
            fetch_timeout_secs: None,

            highlight: true,
            highlight_theme: DEFAULT_THEME.to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4000,
        }
    }
}
