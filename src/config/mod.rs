use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid service base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("unsupported url scheme: {0}")]
    Scheme(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL for the item/offer API and the offer form endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Price-update WebSocket URL. Empty = derived from `base_url`.
    #[serde(default)]
    pub ws_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the auction server binary.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Item catalog file loaded at server startup.
    #[serde(default = "default_items_path")]
    pub items_path: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_items_path() -> String {
    "items.json".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ws_url: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            items_path: default_items_path(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the price-update socket URL, deriving ws(s) from the HTTP
    /// base when none is configured explicitly.
    pub fn price_updates_url(&self) -> Result<String, ConfigError> {
        if !self.ws_url.is_empty() {
            return Ok(self.ws_url.clone());
        }

        let mut url = Url::parse(&self.base_url)?;
        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(ConfigError::Scheme(other.to_string())),
        };
        url.set_scheme(scheme)
            .map_err(|_| ConfigError::Scheme(scheme.to_string()))?;
        url.set_path("/ws/price-updates");
        Ok(url.to_string())
    }
}

impl Config {
    /// Load config from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.apply_env();
        Ok(config)
    }

    /// Load a default config shaped only by the environment (no file needed).
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("BIDWATCH_BASE_URL") {
            self.service.base_url = v;
        }
        if let Ok(v) = std::env::var("BIDWATCH_WS_URL") {
            self.service.ws_url = v;
        }
        if let Ok(v) = std::env::var("BIDWATCH_BIND") {
            self.server.bind = v;
        }
        if let Ok(v) = std::env::var("BIDWATCH_ITEMS_PATH") {
            self.server.items_path = v;
        }
    }
}
