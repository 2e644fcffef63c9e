use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

/// Storage provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    S3,
    Memory,
}

impl Default for StorageProvider {
    fn default() -> Self {
        StorageProvider::Memory
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub provider: StorageProvider,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    /// S3 access key (loaded from environment, not from config file)
    #[serde(skip)]
    pub access_key: Option<String>,
    /// S3 secret key (loaded from environment, not from config file)
    #[serde(skip)]
    pub secret_key: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            bucket: default_bucket(),
            endpoint: None,
            region: None,
            access_key: None,
            secret_key: None,
        }
    }
}

fn default_bucket() -> String {
    "linkbox-redirects".to_string()
}

/// Shortener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShortenerConfig {
    /// Public address prefixed to allocated codes in responses. Typically the
    /// bucket's website endpoint behind a custom domain.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Conflicting draws tolerated before allocation gives up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl ShortenerConfig {
    /// The public short link for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), code)
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            code_length: default_code_length(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_public_base_url() -> String {
    "https://your-domain".to_string()
}

fn default_code_length() -> usize {
    6
}

fn default_max_attempts() -> u32 {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            shortener: ShortenerConfig::default(),
        };

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.storage.provider, StorageProvider::Memory);
        assert_eq!(config.shortener.code_length, 6);
        assert_eq!(config.shortener.max_attempts, 8);
    }

    #[test]
    fn short_url_handles_trailing_slash() {
        let mut shortener = ShortenerConfig::default();
        shortener.public_base_url = "https://sho.rt/".to_string();
        assert_eq!(shortener.short_url("abc123"), "https://sho.rt/abc123");

        shortener.public_base_url = "https://sho.rt".to_string();
        assert_eq!(shortener.short_url("abc123"), "https://sho.rt/abc123");
    }
}
