//! Server configuration
//!
//! Configuration is read from an optional YAML or TOML file, then
//! environment variables override file values. Store credentials are
//! required; the server refuses to start without them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    #[error("MISSING_ENV_VARS: Missing required environment variables: {0}")]
    MissingEnvVars(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub cors: CorsSettings,

    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Supabase project URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Supabase service key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreSettings::default(),
            cors: CorsSettings::default(),
            environment: default_environment(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "https://bluetrails.pages.dev".to_string(),
    ]
}

impl ServerConfig {
    /// Load configuration from a YAML or TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
            Some("toml") => Ok(toml::from_str(&contents)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Merge environment variables over file values
    pub fn merge_env(&mut self) {
        if let Ok(url) = std::env::var("SUPABASE_URL") {
            self.store.url = Some(url);
        }
        if let Ok(key) = std::env::var("SUPABASE_KEY") {
            self.store.key = Some(key);
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Ok(environment) = std::env::var("BLUETRAILS_ENV") {
            self.environment = environment;
        }
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.port = port;
        }
    }

    /// Check that the store credentials are present
    ///
    /// The Worker version of this gateway answered every request with a 500
    /// `MISSING_ENV_VARS` envelope when credentials were absent; with an
    /// explicit startup phase the process refuses to start instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.store.url.as_deref().unwrap_or_default().is_empty() {
            missing.push("SUPABASE_URL");
        }
        if self.store.key.as_deref().unwrap_or_default().is_empty() {
            missing.push("SUPABASE_KEY");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingEnvVars(missing.join(" and ")))
        }
    }
}
