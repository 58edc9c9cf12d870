use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the JSON collections
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// External catalog base URL. Empty disables sync.
    #[serde(default)]
    pub api_base_url: String,

    /// Bearer token for the external catalog
    #[serde(default)]
    pub flic_token: String,

    /// Page size used when a listing request does not specify one
    #[serde(default = "default_page_size")]
    pub page_size_default: usize,

    /// Timeout for external catalog requests, in seconds
    #[serde(default = "default_external_timeout_secs")]
    pub external_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_page_size() -> usize {
    10
}

fn default_external_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            api_base_url: String::new(),
            flic_token: String::new(),
            page_size_default: default_page_size(),
            external_timeout_secs: default_external_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Whether an external catalog is configured
    pub fn external_catalog_enabled(&self) -> bool {
        !self.api_base_url.trim().is_empty()
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_secs(self.external_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
