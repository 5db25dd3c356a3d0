use crate::error::{Error, Result as CrateResult};
use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.otakux402.so";
pub const API_URL_ENV: &str = "KOL_API_URL";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub feeds: FeedsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Timeframes and page sizes requested from each feed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeedsConfig {
    pub hot_tokens_timeframe: String,
    pub leaderboard_timeframe: String,
    /// Page size for the hot-token, leaderboard and trader listings.
    pub listing_limit: u32,
    pub trades_listing_limit: u32,
    pub analysis_hot_tokens_limit: u32,
    pub analysis_leaderboard_limit: u32,
    pub analysis_trades_limit: u32,
    pub context_limit: u32,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            hot_tokens_timeframe: "1h".to_string(),
            leaderboard_timeframe: "daily".to_string(),
            listing_limit: 10,
            trades_listing_limit: 20,
            analysis_hot_tokens_limit: 50,
            analysis_leaderboard_limit: 20,
            analysis_trades_limit: 100,
            context_limit: 10,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            Self::load(path)
        } else {
            warn!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    /// Applies `.env` and process environment overrides.
    pub fn apply_env(&mut self) {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }
        self.override_base_url(env::var(API_URL_ENV).ok());
    }

    /// Replaces the API base URL when `base_url` is set and non-blank.
    pub fn override_base_url(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            info!("Using KOL API base URL override: {}", url);
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> CrateResult<()> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::ConfigError(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::ConfigError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        let limits = [
            ("listing_limit", self.feeds.listing_limit),
            ("trades_listing_limit", self.feeds.trades_listing_limit),
            ("analysis_hot_tokens_limit", self.feeds.analysis_hot_tokens_limit),
            ("analysis_leaderboard_limit", self.feeds.analysis_leaderboard_limit),
            ("analysis_trades_limit", self.feeds.analysis_trades_limit),
            ("context_limit", self.feeds.context_limit),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, limit)| *limit == 0) {
            return Err(Error::ConfigError(format!(
                "feeds.{} must be greater than zero",
                name
            )));
        }
        Ok(())
    }
}
