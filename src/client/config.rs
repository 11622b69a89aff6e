use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, DEFAULT_API_PREFIX};
use crate::shared::models::PermissionVocabulary;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default backend URL
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Default login application URL
const DEFAULT_LOGIN_URL: &str = "http://127.0.0.1:3001";

/// In-app path of the login page on the login application
const LOGIN_PATH: &str = "/login";

const ENV_API_URL: &str = "DBDESIGNER_API_URL";
const ENV_LOGIN_URL: &str = "DBDESIGNER_LOGIN_URL";
const ENV_API_PREFIX: &str = "DBDESIGNER_API_PREFIX";
const ENV_VOCABULARY: &str = "DBDESIGNER_PERMISSION_VOCABULARY";

/// On-disk form of the configuration
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    login_url: Option<String>,
    api_prefix: Option<String>,
    permission_vocabulary: Option<PermissionVocabulary>,
}

/// Client configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Configuration from `DBDESIGNER_*` environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_builder(apply_env(AppConfig::builder())?)
    }

    /// Configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = read_config_file(path.as_ref())?;
        Self::with_builder(apply_file(AppConfig::builder(), file))
    }

    /// Full load: `.env`, then the user config file if present, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut builder = AppConfig::builder();
        if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
            tracing::debug!("[CONFIG] Reading {}", path.display());
            builder = apply_file(builder, read_config_file(&path)?);
        }
        Self::with_builder(apply_env(builder)?)
    }

    /// `<config dir>/dbdesigner/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("dbdesigner");
        path.push("config.toml");
        Some(path)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Path of a diagram endpoint, e.g. `diagrams_path("/d1/collaborators")`
    pub fn diagrams_path(&self, suffix: &str) -> String {
        let prefix = self.app.api_prefix.as_deref().unwrap_or(DEFAULT_API_PREFIX);
        format!("{}/diagrams{}", prefix, suffix)
    }

    /// Where a 401 sends the browser
    pub fn login_url(&self) -> &str {
        self.app.login_url.as_deref().unwrap_or(DEFAULT_LOGIN_URL)
    }

    /// Login page of the login application (auth gate and logout)
    pub fn login_page_url(&self) -> String {
        format!("{}{}", self.login_url(), LOGIN_PATH)
    }

    pub fn vocabulary(&self) -> PermissionVocabulary {
        self.app.permission_vocabulary
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn apply_file(mut builder: AppConfigBuilder, file: ConfigFile) -> AppConfigBuilder {
    if let Some(url) = file.api_url {
        builder = builder.api_url(url);
    }
    if let Some(url) = file.login_url {
        builder = builder.login_url(url);
    }
    if let Some(prefix) = file.api_prefix {
        builder = builder.api_prefix(prefix);
    }
    if let Some(vocabulary) = file.permission_vocabulary {
        builder = builder.permission_vocabulary(vocabulary);
    }
    builder
}

fn apply_env(mut builder: AppConfigBuilder) -> Result<AppConfigBuilder, ConfigError> {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        builder = builder.api_url(url);
    }
    if let Ok(url) = std::env::var(ENV_LOGIN_URL) {
        builder = builder.login_url(url);
    }
    if let Ok(prefix) = std::env::var(ENV_API_PREFIX) {
        builder = builder.api_prefix(prefix);
    }
    if let Ok(raw) = std::env::var(ENV_VOCABULARY) {
        let vocabulary = raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: ENV_VOCABULARY,
            value: raw.clone(),
        })?;
        builder = builder.permission_vocabulary(vocabulary);
    }
    Ok(builder)
}
