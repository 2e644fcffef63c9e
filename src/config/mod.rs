//! Configuration management for linkbox
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `LINKBOX__<section>__<key>`
//!
//! Examples:
//! - `LINKBOX__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `LINKBOX__STORAGE__BUCKET=short-links-prod`
//! - `LINKBOX__SHORTENER__PUBLIC_BASE_URL=https://go.example.com`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/linkbox.toml`.
//! This can be overridden using the `LINKBOX_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

// Re-export public types
pub use models::{Config, ServerConfig, ShortenerConfig, StorageConfig, StorageProvider};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`LINKBOX__*`)
    /// 2. TOML file (default: `config/linkbox.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails (unusable base URL, zero-length codes, etc.).
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
