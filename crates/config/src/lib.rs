//! Configuration loading, validation, and management for Emoteport.
//!
//! Loads configuration from `~/.emoteport/config.toml` (or the file named by
//! `EMOTEPORT_CONFIG`) with environment variable overrides. Validates all
//! settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Twitch Helix credentials and endpoints
    #[serde(default)]
    pub twitch: TwitchConfig,

    /// BetterTTV endpoints
    #[serde(default)]
    pub bttv: BttvConfig,

    /// 7TV endpoints
    #[serde(default)]
    pub seventv: SevenTvConfig,

    /// FrankerFaceZ endpoints (opt-in)
    #[serde(default)]
    pub ffz: FfzConfig,

    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Channel search settings
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TwitchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default = "default_twitch_api_url")]
    pub api_url: String,

    #[serde(default = "default_twitch_auth_url")]
    pub auth_url: String,
}

fn default_twitch_api_url() -> String {
    "https://api.twitch.tv/helix".into()
}
fn default_twitch_auth_url() -> String {
    "https://id.twitch.tv/oauth2".into()
}

impl Default for TwitchConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_url: default_twitch_api_url(),
            auth_url: default_twitch_auth_url(),
        }
    }
}

impl std::fmt::Debug for TwitchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

/// BetterTTV: plain unauthenticated GETs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BttvConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_bttv_api_url")]
    pub api_url: String,

    /// Base of the image CDN that emote links are built from
    #[serde(default = "default_bttv_cdn_url")]
    pub cdn_url: String,
}

fn default_bttv_api_url() -> String {
    "https://api.betterttv.net/3".into()
}
fn default_bttv_cdn_url() -> String {
    "https://cdn.betterttv.net".into()
}

impl Default for BttvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_bttv_api_url(),
            cdn_url: default_bttv_cdn_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevenTvConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_seventv_api_url")]
    pub api_url: String,

    #[serde(default = "default_seventv_cdn_url")]
    pub cdn_url: String,
}

fn default_seventv_api_url() -> String {
    "https://7tv.io/v3".into()
}
fn default_seventv_cdn_url() -> String {
    "https://cdn.7tv.app".into()
}

impl Default for SevenTvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_seventv_api_url(),
            cdn_url: default_seventv_cdn_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfzConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_ffz_api_url")]
    pub api_url: String,
}

fn default_ffz_api_url() -> String {
    "https://api.frankerfacez.com/v1".into()
}

impl Default for FfzConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_ffz_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Deadline for every individual upstream request
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_user_agent() -> String {
    concat!("emoteport/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Origins allowed by CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    9999
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// How many channel candidates to resolve per search
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Helix accepts at most 100 results per page.
const MAX_SEARCH_LIMIT: usize = 100;

impl AppConfig {
    /// Load configuration from the default path, then apply env overrides:
    /// - `TWITCH_CLIENT_ID`, `TWITCH_CLIENT_SECRET`
    /// - `PORT`, `EMOTEPORT_HOST`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Env wins over the file.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(id) = var("TWITCH_CLIENT_ID").filter(|v| !v.is_empty()) {
            self.twitch.client_id = Some(id);
        }
        if let Some(secret) = var("TWITCH_CLIENT_SECRET").filter(|v| !v.is_empty()) {
            self.twitch.client_secret = Some(secret);
        }
        if let Some(port) = var("PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a port number, got '{port}'"))
            })?;
        }
        if let Some(host) = var("EMOTEPORT_HOST") {
            self.gateway.host = host;
        }
        Ok(())
    }

    /// Path of the config file: `EMOTEPORT_CONFIG` or `~/.emoteport/config.toml`.
    pub fn config_path() -> PathBuf {
        std::env::var("EMOTEPORT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::config_dir().join("config.toml"))
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".emoteport")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "http.request_timeout_ms must be > 0".into(),
            ));
        }

        if self.search.limit == 0 || self.search.limit > MAX_SEARCH_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "search.limit must be between 1 and {MAX_SEARCH_LIMIT}"
            )));
        }

        let urls = [
            ("twitch.api_url", &self.twitch.api_url),
            ("twitch.auth_url", &self.twitch.auth_url),
            ("bttv.api_url", &self.bttv.api_url),
            ("bttv.cdn_url", &self.bttv.cdn_url),
            ("seventv.api_url", &self.seventv.api_url),
            ("seventv.cdn_url", &self.seventv.cdn_url),
            ("ffz.api_url", &self.ffz.api_url),
        ];
        if let Some((key, _)) = urls.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!("{key} must not be empty")));
        }

        Ok(())
    }

    /// Twitch app credentials, or the startup error when either is missing.
    pub fn require_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let client_id = self
            .twitch
            .client_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredentials("TWITCH_CLIENT_ID"))?;
        let client_secret = self
            .twitch
            .client_secret
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredentials("TWITCH_CLIENT_SECRET"))?;
        Ok((client_id, client_secret))
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            twitch: TwitchConfig::default(),
            bttv: BttvConfig::default(),
            seventv: SevenTvConfig::default(),
            ffz: FfzConfig::default(),
            http: HttpConfig::default(),
            gateway: GatewayConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Missing Twitch credentials: set {0} or the [twitch] section of the config file")]
    MissingCredentials(&'static str),
}
