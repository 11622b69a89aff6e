//! Session/Identity Client
//!
//! Every backend call goes through [`SessionClient::request`]. It attaches the
//! session cookie jar, serializes JSON bodies and turns responses into
//! [`ApiError`]s:
//!
//! - no response at all -> `ServiceUnavailable`
//! - 401 -> navigate to the login application (unless suppressed), then `NotAuthenticated`
//! - other non-2xx -> `RequestFailed { status, message }`, message from `{"error": "..."}`
//!
//! Navigation on 401 is the only side effect this module has.

use crate::client::config::Config;
use crate::client::navigation::Navigator;
use crate::shared::config::ConfigError;
use crate::shared::error::{ApiError, Result, GENERIC_FAILURE_MESSAGE};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-request behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Fail with `NotAuthenticated` on 401 without navigating away
    pub skip_auth_redirect: bool,
}

impl RequestOptions {
    /// Options for session probes and forms that show their own 401 error
    pub fn no_redirect() -> Self {
        Self {
            skip_auth_redirect: true,
        }
    }
}

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// HTTP client bound to one cookie session
#[derive(Clone)]
pub struct SessionClient {
    config: Arc<Config>,
    client: Client,
    navigator: Arc<dyn Navigator>,
}

impl SessionClient {
    /// Build a client with its own cookie store
    pub fn new(config: Config, navigator: Arc<dyn Navigator>) -> std::result::Result<Self, ConfigError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            client,
            navigator,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Perform one request against the backend and decode the JSON response
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.config.api_url(path);
        tracing::debug!("[SESSION] {} {}", method, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("[SESSION] {} {} unreachable: {}", method, path, e);
            ApiError::ServiceUnavailable
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if options.skip_auth_redirect {
                tracing::debug!("[SESSION] {} {} -> 401 (redirect suppressed)", method, path);
            } else {
                tracing::warn!("[SESSION] {} {} -> 401, redirecting to login", method, path);
                self.navigator.navigate(self.config.login_url());
            }
            return Err(ApiError::NotAuthenticated);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| match body.error {
                    Some(serde_json::Value::String(message)) => Some(message),
                    _ => None,
                })
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            tracing::warn!("[SESSION] {} {} -> {}: {}", method, path, status.as_u16(), message);
            return Err(ApiError::request_failed(status.as_u16(), message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_response(format!("failed to read body: {}", e)))?;

        // Empty success bodies decode as JSON null
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(body), RequestOptions::default())
            .await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, Some(body), RequestOptions::default())
            .await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, Some(body), RequestOptions::default())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None, RequestOptions::default())
            .await
    }
}
