//! Configuration module

mod site;

pub use site::{ConfigError, ServerConfig, SiteConfig, CONFIG_FILE};
