//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPHUB_CATALOG_URL` - Base URL of the product catalog API
//!   (default: `https://fakestoreapi.com`)
//! - `SHOPHUB_DATA_DIR` - Directory for durable key-value state
//!   (default: `.shophub`)
//! - `SHOPHUB_HTTP_TIMEOUT_SECS` - Whole-request timeout for catalog
//!   fetches (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default catalog API base URL.
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// Default durable-state directory.
const DEFAULT_DATA_DIR: &str = ".shophub";

/// Default whole-request timeout in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the product catalog API.
    pub catalog_url: Url,
    /// Directory holding the durable key-value state.
    pub data_dir: PathBuf,
    /// Whole-request timeout for catalog fetches.
    pub http_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    /// Every variable has a default, so loading only fails on malformed
    /// values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_env_or_default("SHOPHUB_CATALOG_URL", DEFAULT_CATALOG_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPHUB_CATALOG_URL".to_owned(), e.to_string())
            })?;

        let data_dir = PathBuf::from(get_env_or_default("SHOPHUB_DATA_DIR", DEFAULT_DATA_DIR));

        let timeout_secs = get_env_or_default(
            "SHOPHUB_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPHUB_HTTP_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        Ok(Self {
            catalog_url,
            data_dir,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            // Compile-time constant, valid by inspection.
            catalog_url: Url::parse(DEFAULT_CATALOG_URL)
                .unwrap_or_else(|_| unreachable!("default catalog URL is valid")),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.data_dir, PathBuf::from(".shophub"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("SHOPHUB_TEST_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }
}
