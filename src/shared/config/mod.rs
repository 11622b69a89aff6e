//! Application configuration module
//!
//! Deployment-time settings: where the backend lives, where the external login
//! application lives, and which path prefix and permission vocabulary the
//! backend speaks.

use crate::shared::models::PermissionVocabulary;
use reqwest::Url;
use thiserror::Error;

/// Default diagram path prefix
pub const DEFAULT_API_PREFIX: &str = "/dbdesigner";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin
    pub api_url: Option<String>,
    /// External login application origin
    pub login_url: Option<String>,
    /// Prefix in front of `/diagrams`
    pub api_prefix: Option<String>,
    /// Permission words the backend expects
    pub permission_vocabulary: PermissionVocabulary,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for url in [&self.api_url, &self.login_url].into_iter().flatten() {
            Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        }
        if let Some(prefix) = &self.api_prefix {
            if !prefix.is_empty() && !prefix.starts_with('/') {
                return Err(ConfigError::InvalidPrefix(prefix.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    login_url: Option<String>,
    api_prefix: Option<String>,
    permission_vocabulary: PermissionVocabulary,
}

impl AppConfigBuilder {
    /// Set the backend URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the login application URL
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    /// Set the diagram path prefix (`""` for bare `/diagrams`)
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    pub fn permission_vocabulary(mut self, vocabulary: PermissionVocabulary) -> Self {
        self.permission_vocabulary = vocabulary;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let trim = |s: String| s.trim_end_matches('/').to_string();
        let config = AppConfig {
            api_url: self.api_url.map(trim),
            login_url: self.login_url.map(trim),
            api_prefix: self.api_prefix.map(trim),
            permission_vocabulary: self.permission_vocabulary,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid path prefix: {0}")]
    InvalidPrefix(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
