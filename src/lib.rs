//! hashblog: a fragment-routed Markdown blog
//!
//! Posts are Markdown files with a small front-matter block, listed by hand
//! in `site.yml`. A URL fragment (`#/`, `#/post/<path>`, `#/about`) is routed
//! to a renderer that fetches what it needs and replaces a single render
//! region with fresh markup.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod render;
pub mod router;
pub mod server;
pub mod source;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::{SiteConfig, CONFIG_FILE};
use render::RenderContext;

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory post paths are resolved against
    pub content_dir: PathBuf,
    /// Configuration file this blog was loaded from, re-read on reload
    pub config_path: PathBuf,
}

impl Blog {
    /// Create a blog from a directory, reading `site.yml` if it exists
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog from an explicit configuration file
    pub fn from_config_file<P: AsRef<Path>, C: AsRef<Path>>(base_dir: P, config_path: C) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config = SiteConfig::load(config_path)?;
        let mut blog = Self::with_config(base_dir.as_ref().to_path_buf(), config);
        blog.config_path = config_path.to_path_buf();
        Ok(blog)
    }

    /// Create a blog from an already loaded configuration. The config path
    /// is taken to be `site.yml` in `base_dir`.
    pub fn with_config(base_dir: PathBuf, config: SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let config_path = base_dir.join(CONFIG_FILE);
        Self {
            config,
            base_dir,
            content_dir,
            config_path,
        }
    }

    /// Load the configuration again from the file this blog came from.
    /// A missing `site.yml` falls back to defaults; a missing explicit
    /// config file is an error.
    pub fn reload(&self) -> Result<Self> {
        if self.config_path == self.base_dir.join(CONFIG_FILE) {
            Self::new(&self.base_dir)
        } else {
            Self::from_config_file(&self.base_dir, &self.config_path)
        }
    }

    /// Build the render context shared by every navigation
    pub fn render_context(&self) -> Result<RenderContext> {
        Ok(RenderContext::from_config(&self.config, &self.base_dir)?)
    }
}
