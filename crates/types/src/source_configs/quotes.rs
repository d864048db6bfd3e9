//! Quote source configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the cached quote list
pub const DEFAULT_CACHE_PATH: &str = "quotes.json";

/// Default remote quote list
pub const DEFAULT_ENDPOINT: &str =
    "https://gist.githubusercontent.com/sjdonado/66c22e7fafe4505bcbd7a167249bfd5f/raw/quotes.json";

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_endpoint() -> Option<String> {
    Some(DEFAULT_ENDPOINT.to_string())
}

fn default_fetch_timeout() -> u64 {
    30
}

/// Quote source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// JSON file holding the quote list
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// URL the quote list is fetched from (None = cache only)
    #[serde(default = "default_endpoint")]
    pub endpoint: Option<String>,
    /// Timeout for the whole HTTP request
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            endpoint: default_endpoint(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}
