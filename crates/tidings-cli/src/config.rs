//! Tidings configuration.

use super::*;

/// Configuration for tidings.
/// This is parsed from the toml tidings configuration file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Port for the http server.
    pub port: Option<u16>,
    /// Log file.
    pub log: Option<String>,
    /// Cache ttl and refresh settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Upstream provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Cache ttl and refresh settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long merged preference results stay fresh.
    #[serde(
        default = "default_ttl",
        with = "humantime_serde",
        alias = "default-ttl"
    )]
    pub default_ttl: std::time::Duration,
    /// How long keyword search results stay fresh.
    #[serde(
        default = "default_search_ttl",
        with = "humantime_serde",
        alias = "search-ttl"
    )]
    pub search_ttl: std::time::Duration,
    /// How often the background refresher re-fetches cached keys.
    #[serde(
        default = "default_refresh_interval",
        with = "humantime_serde",
        alias = "refresh-interval"
    )]
    pub refresh_interval: std::time::Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            search_ttl: default_search_ttl(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl CacheConfig {
    /// Default ttl for preference entries, in cache-store units.
    pub fn entry_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.default_ttl.as_millis() as i64)
    }

    /// Ttl for search entries, in cache-store units.
    pub fn search_entry_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.search_ttl.as_millis() as i64)
    }
}

fn default_ttl() -> std::time::Duration {
    std::time::Duration::from_secs(10 * 60)
}

fn default_search_ttl() -> std::time::Duration {
    std::time::Duration::from_secs(5 * 60)
}

fn default_refresh_interval() -> std::time::Duration {
    std::time::Duration::from_secs(15 * 60)
}

/// Upstream provider settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base url of the provider api.
    #[serde(default = "default_base_url", alias = "base-url")]
    pub base_url: String,
    /// Api key. Falls back to the NEWS_API_KEY environment variable.
    #[serde(default, alias = "api-key")]
    pub api_key: Option<String>,
    /// Per-request time bound.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: std::time::Duration,
    /// Result language.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout: default_timeout(),
            language: default_language(),
        }
    }
}

impl ProviderConfig {
    /// The configured api key, or the NEWS_API_KEY environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("NEWS_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}

fn default_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_timeout() -> std::time::Duration {
    std::time::Duration::from_secs(5)
}

fn default_language() -> String {
    "en".to_string()
}
