// =============================================================================
// Runtime Configuration — server, provider and catalog settings
// =============================================================================
//
// Loaded once at startup from a JSON file and never mutated afterwards.
// All fields carry `#[serde(default)]` so a partial file (or `{}`) is valid;
// a missing file falls back to the built-in defaults with a warning.
//
// Environment overrides (applied after the file):
//   MARKET_BIND_ADDR     — listen address
//   MARKET_PROVIDER_URL  — provider base URL
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::MarketCatalog;
use crate::watchlist::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};

pub const DEFAULT_CONFIG_PATH: &str = "market_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL.as_secs()
}

// =============================================================================
// ProviderSettings
// =============================================================================

/// HTTP settings for the market-data provider client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Scheme + host of the chart API, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Upstream deadlines surface as provider errors.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// SessionSettings
// =============================================================================

/// Limits on the in-memory watchlist session table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle time since the last save after which a session is dropped.
    #[serde(default = "default_session_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            ttl_secs: default_session_ttl_secs(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for the market chart service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the HTTP API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub sessions: SessionSettings,

    /// Static lookup tables (popular symbols, allow-list, timeframes).
    #[serde(default)]
    pub catalog: MarketCatalog,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            provider: ProviderSettings::default(),
            sessions: SessionSettings::default(),
            catalog: MarketCatalog::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            timeframes = config.catalog.timeframes.len(),
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `MARKET_*` overrides. `lookup` is `std::env::var` in production.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("MARKET_BIND_ADDR").filter(|s| !s.trim().is_empty()) {
            self.bind_addr = addr.trim().to_string();
        }
        if let Some(url) = lookup("MARKET_PROVIDER_URL").filter(|s| !s.trim().is_empty()) {
            self.provider.base_url = url.trim().to_string();
        }
    }
}
