/**
 * Authentication Module
 *
 * Session endpoints (probe, login, logout, change-password) and the login
 * form state. Credentials live in the cookie jar of the SessionClient; no
 * token is stored here.
 */

use crate::client::identity::UserStore;
use crate::client::session::{RequestOptions, SessionClient};
use crate::shared::error::{ApiError, Result};
use crate::shared::models::User;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Client for the `/auth/*` endpoints
#[derive(Clone)]
pub struct AuthApi {
    session: SessionClient,
}

impl AuthApi {
    pub fn new(session: SessionClient) -> Self {
        Self { session }
    }

    /// Session probe. Never redirects; callers decide what a 401 means.
    pub async fn me(&self) -> Result<User> {
        self.session
            .request(Method::GET, "/auth/me", None, RequestOptions::no_redirect())
            .await
    }

    /// Establish a session with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        self.session
            .request::<serde_json::Value>(
                Method::POST,
                "/auth/login",
                Some(body),
                RequestOptions::no_redirect(),
            )
            .await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.session
            .request::<serde_json::Value>(
                Method::POST,
                "/auth/logout",
                None,
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// Rotate the password. A 401 here means "wrong current password" to the
    /// form, so the redirect is suppressed.
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let body = serde_json::to_value(ChangePasswordRequest {
            current_password,
            new_password,
        })?;
        self.session
            .request::<serde_json::Value>(
                Method::POST,
                "/auth/change-password",
                Some(body),
                RequestOptions::no_redirect(),
            )
            .await?;
        Ok(())
    }
}

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<User>,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    /// Sign in, confirm the session with a probe and record the user.
    ///
    /// On success the host navigates to the dashboard.
    pub async fn submit_login(
        &mut self,
        api: &AuthApi,
        users: &UserStore,
        email: &str,
        password: &str,
    ) -> Result<User> {
        self.clear_error();
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            let error = ApiError::validation("email", "Email and password are required");
            self.set_error(error.to_string());
            return Err(error);
        }

        self.loading = true;
        let result = match api.login(email, password).await {
            Ok(()) => api.me().await,
            Err(e) => Err(e),
        };
        self.loading = false;

        match result {
            Ok(user) => {
                tracing::info!("[AUTH] Signed in: {}", user.id);
                users.set(user.clone()).await;
                self.authenticated = true;
                self.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("[AUTH] Sign in failed: {}", e);
                let message = match &e {
                    ApiError::NotAuthenticated => "Invalid email or password".to_string(),
                    other => other.user_message(),
                };
                self.set_error(message);
                Err(e)
            }
        }
    }
}
