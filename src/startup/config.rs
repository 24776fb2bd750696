//! Startup configuration.
//!
//! Defaults, overridden by environment variables, overridden by the
//! `with_*` builder methods.

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::file_store::DATA_DIR;
use crate::adapters::DEFAULT_API_BASE_URL;
use crate::models::DECK_TTL_SECS;
use crate::reachability::POLL_INTERVAL_SECS;
use crate::session::DEFAULT_TICK_INTERVAL;

/// Environment variable overriding the API root.
pub const ENV_API_URL: &str = "SLAPJACK_API_URL";
/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "SLAPJACK_DATA_DIR";
/// Environment variable overriding the tick interval, in milliseconds.
pub const ENV_TICK_MS: &str = "SLAPJACK_TICK_MS";
/// Environment variable overriding the reachability poll interval, in seconds.
pub const ENV_PROBE_SECS: &str = "SLAPJACK_PROBE_SECS";
/// Set to any value to skip reachability polling.
pub const ENV_OFFLINE: &str = "SLAPJACK_OFFLINE";

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the game process.
///
/// # Example
///
/// ```ignore
/// use slapjack::startup::StartupConfig;
///
/// let config = StartupConfig::from_env()
///     .with_tick_interval(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Deck API root, without a trailing slash
    pub api_base_url: String,
    /// Directory holding the deck store
    pub data_dir: PathBuf,
    /// Time between draws while running
    pub tick_interval: Duration,
    /// How long an untouched deck stays valid
    pub deck_ttl: Duration,
    /// Time between reachability probes
    pub reachability_interval: Duration,
    /// Timeout for each HTTP request
    pub request_timeout: Duration,
    /// Skip reachability polling and assume the service is reachable
    pub offline: bool,
}

/// `~/.slapjack`, or `.slapjack` in the working directory without a home.
pub fn default_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DATA_DIR),
        None => PathBuf::from(DATA_DIR),
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            deck_ttl: Duration::from_secs(DECK_TTL_SECS as u64),
            reachability_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            offline: false,
        }
    }
}

impl StartupConfig {
    /// Create a new StartupConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the time between draws.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the deck expiry.
    pub fn with_deck_ttl(mut self, ttl: Duration) -> Self {
        self.deck_ttl = ttl;
        self
    }

    /// Set the reachability poll interval.
    pub fn with_reachability_interval(mut self, interval: Duration) -> Self {
        self.reachability_interval = interval;
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Skip reachability polling.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Create config from `SLAPJACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unparseable or zero durations are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            config = config.with_api_base_url(url.trim());
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            config = config.with_data_dir(dir);
        }
        if let Some(ms) = parse_positive(ENV_TICK_MS, lookup(ENV_TICK_MS)) {
            config = config.with_tick_interval(Duration::from_millis(ms));
        }
        if let Some(secs) = parse_positive(ENV_PROBE_SECS, lookup(ENV_PROBE_SECS)) {
            config = config.with_reachability_interval(Duration::from_secs(secs));
        }
        if lookup(ENV_OFFLINE).is_some() {
            config = config.with_offline(true);
        }

        config
    }
}

fn parse_positive(key: &str, value: Option<String>) -> Option<u64> {
    let value = value?;
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!("Ignoring {}={:?}: expected a positive integer", key, value);
            None
        }
    }
}
