//! Configuration Module
//!
//! Handles loading and managing explorer configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI base URL
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Explorer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the PokeAPI
    pub api_base_url: String,
    /// Cache eviction interval in seconds
    pub cache_interval: u64,
    /// HTTP request timeout in seconds
    pub http_timeout: u64,
    /// Number of location areas listed per `map` page
    pub page_size: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_INTERVAL` - Cache eviction interval in seconds (default: 300)
    /// - `POKEDEX_HTTP_TIMEOUT` - HTTP timeout in seconds (default: 10)
    /// - `POKEDEX_PAGE_SIZE` - Location areas per page (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("POKEDEX_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.cache_interval),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.http_timeout),
            page_size: env::var("POKEDEX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.page_size),
        }
    }

    /// Cache eviction interval as a Duration.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// HTTP timeout as a Duration.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            cache_interval: 300,
            http_timeout: 10,
            page_size: 20,
        }
    }
}
