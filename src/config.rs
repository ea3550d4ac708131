//! Configuration management for the application
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Prefix shared by every environment variable the tool reads
pub const ENV_PREFIX: &str = "UNLIKE_";
pub const ENV_OAUTH_TOKEN: &str = "UNLIKE_OAUTH_TOKEN";
pub const ENV_OAUTH_TOKEN_SECRET: &str = "UNLIKE_OAUTH_TOKEN_SECRET";
pub const ENV_CONSUMER_KEY: &str = "UNLIKE_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "UNLIKE_CONSUMER_SECRET";

/// Age threshold used when none (or a negative one) is given
pub const DEFAULT_DAYS: u32 = 30;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Missing required credential: {0}")]
    MissingCredential(&'static str),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// X API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request transport timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Number of liked posts requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    100 // Largest page the liked_tweets endpoint serves
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitter.com".to_string(),
            timeout: Duration::from_secs(30),
            page_size: default_page_size(),
        }
    }
}

/// Backoff configuration for transient failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// How long to wait after an HTTP 429 before trying again
    #[serde(with = "humantime_serde")]
    pub rate_limit_cooldown: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { rate_limit_cooldown: Duration::from_secs(15 * 60) }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging format: "json" or "text"
    pub format: String,
    /// Default log level if no RUST_LOG is set
    pub default_level: String,
    /// Custom filter for dependency logs
    pub dependency_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            default_level: "info".to_string(),
            dependency_filter: Some(
                "hyper=warn,hyper_util=warn,h2=warn,reqwest=info,rustls=warn,mio=warn".to_string(),
            ),
        }
    }
}

/// Load a `.env` file from the working directory into the process environment, if present
pub fn load_env_file() {
    let _ = dotenvy::dotenv().ok();
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Call [`load_env_file`] first so `.env` values are visible.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Self::figment();

        // UNLIKE_CONFIG points at an optional TOML file layered on top of the environment
        if let Some(config_path) = std::env::var_os("UNLIKE_CONFIG") {
            if let Some(path_str) = config_path.to_str() {
                let path = Path::new(path_str);
                if path.exists() {
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        Self::extract(figment)
    }

    /// Defaults overlaid with `UNLIKE_*` environment variables (`__` separates nesting)
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from an assembled figment
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config =
            figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::MissingConfig("API base URL is required".to_string()));
        }

        if self.api.timeout.is_zero() {
            return Err(ConfigError::InvalidValue("API timeout must be positive".to_string()));
        }

        if self.api.page_size == 0 {
            return Err(ConfigError::InvalidValue("API page size must be positive".to_string()));
        }

        Ok(())
    }
}

/// OAuth 1.0a user-context credentials.
///
/// Wiped from memory on drop and never printed.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    oauth_token: String,
    oauth_token_secret: String,
}

impl Zeroize for Credentials {
    fn zeroize(&mut self) {
        self.consumer_key.zeroize();
        self.consumer_secret.zeroize();
        self.oauth_token.zeroize();
        self.oauth_token_secret.zeroize();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .field("oauth_token", &"[REDACTED]")
            .field("oauth_token_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            oauth_token: oauth_token.into(),
            oauth_token_secret: oauth_token_secret.into(),
        }
    }

    /// Read all four credentials through `lookup`; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name).filter(|value| !value.is_empty()).ok_or(ConfigError::MissingCredential(name))
        };

        // Access token pair first, matching the order users are told to export them
        let oauth_token = require(ENV_OAUTH_TOKEN)?;
        let oauth_token_secret = require(ENV_OAUTH_TOKEN_SECRET)?;
        let consumer_key = require(ENV_CONSUMER_KEY)?;
        let consumer_secret = require(ENV_CONSUMER_SECRET)?;

        Ok(Self { consumer_key, consumer_secret, oauth_token, oauth_token_secret })
    }

    /// Read the credentials from the process environment, then remove them from it.
    ///
    /// Must run before the process starts any other thread.
    pub fn take_from_env() -> Result<Self, ConfigError> {
        let credentials = Self::from_lookup(|name| std::env::var(name).ok())?;

        for name in [ENV_OAUTH_TOKEN, ENV_OAUTH_TOKEN_SECRET, ENV_CONSUMER_KEY, ENV_CONSUMER_SECRET]
        {
            // SAFETY: only called during single-threaded startup, see the doc comment above.
            unsafe { std::env::remove_var(name) };
        }

        Ok(credentials)
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn oauth_token(&self) -> &str {
        &self.oauth_token
    }

    pub fn oauth_token_secret(&self) -> &str {
        &self.oauth_token_secret
    }
}

/// Whose likes are removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Look the account up by handle
    Username(String),
    /// The account the credentials belong to
    Me,
}

impl Target {
    /// An empty handle selects the authenticated user
    pub fn from_username(username: Option<&str>) -> Self {
        match username {
            Some(name) if !name.is_empty() => Target::Username(name.to_string()),
            _ => Target::Me,
        }
    }
}

/// Per-run options resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub target: Target,
    pub days: u32,
    /// Overrides `api.timeout` when set
    pub timeout: Option<Duration>,
}

impl RunOptions {
    pub fn new(target: Target, days: i64, timeout: Option<Duration>) -> Self {
        Self { target, days: effective_days(days), timeout }
    }

    /// Request timeout for this run
    pub fn timeout_or(&self, config: &ApiConfig) -> Duration {
        self.timeout.unwrap_or(config.timeout)
    }
}

/// Negative thresholds fall back to the default; huge ones saturate
pub fn effective_days(days: i64) -> u32 {
    if days < 0 { DEFAULT_DAYS } else { u32::try_from(days).unwrap_or(u32::MAX) }
}
