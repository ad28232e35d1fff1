//! Configuration management.
//!
//! Sourced once at startup and passed into each component at
//! construction; nothing re-reads the environment afterwards.

use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default page scraped for the tracked market.
pub const DEFAULT_SOURCE_URL: &str = "https://polymarket.com/event/us-x-iran-nuclear-deal-in-2025";

/// Default seconds between sampler ticks (10 minutes).
pub const DEFAULT_FETCH_INTERVAL_SECS: u64 = 600;

/// Default timeout for a single HTTP fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration for pricewatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub data_file: PathBuf,
    pub charts_dir: PathBuf,
    pub fetch_interval_secs: u64,
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            data_file: paths::data_file(),
            charts_dir: paths::charts_dir(),
            fetch_interval_secs: DEFAULT_FETCH_INTERVAL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Build configuration from the environment.
    ///
    /// `PRICEWATCH_URL` overrides the scraped page and
    /// `PRICEWATCH_INTERVAL_SECS` the tick interval; paths come from
    /// [`paths`]. Call this once at process startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("PRICEWATCH_URL") {
            config.source_url = url;
        }
        if let Ok(secs) = std::env::var("PRICEWATCH_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse() {
                config.fetch_interval_secs = secs;
            }
        }
        config
    }

    /// Tick interval as a [`Duration`].
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_secs)
    }

    /// HTTP timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
