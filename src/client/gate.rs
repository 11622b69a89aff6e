//! Auth Gate
//!
//! Protected views call [`AuthGate::enter`] once when they mount. The gate
//! probes the session; a live session fills the [`UserStore`] and lets the view
//! render, anything else sends the user to the login application. Nothing is
//! polled afterwards.

use crate::client::auth::AuthApi;
use crate::client::identity::UserStore;
use crate::client::navigation::Navigator;
use crate::client::session::SessionClient;
use crate::shared::error::Result;
use crate::shared::models::User;
use std::sync::Arc;

/// In-app route of the dashboard
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// In-app route of the login page
pub const LOGIN_ROUTE: &str = "/login";

/// What the gate currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Probe in flight: render a loading placeholder
    Pending,
    /// Session confirmed: render the protected children
    Granted(User),
    /// Session rejected: the user has been sent to the login page
    Denied,
}

/// Result of one gate entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render(User),
    Redirected(String),
}

pub struct AuthGate {
    auth: AuthApi,
    users: UserStore,
    navigator: Arc<dyn Navigator>,
    login_page: String,
    state: GateState,
}

impl AuthGate {
    pub fn new(session: &SessionClient, users: UserStore) -> Self {
        Self {
            auth: AuthApi::new(session.clone()),
            users,
            navigator: Arc::clone(session.navigator()),
            login_page: session.config().login_page_url(),
            state: GateState::Pending,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Children may render only once the session is confirmed
    pub fn can_render(&self) -> bool {
        matches!(self.state, GateState::Granted(_))
    }

    /// Probe the session for a protected view mount
    pub async fn enter(&mut self) -> GateDecision {
        self.state = GateState::Pending;
        match self.auth.me().await {
            Ok(user) => {
                tracing::debug!("[GATE] Session valid for {}", user.id);
                self.users.set(user.clone()).await;
                self.state = GateState::Granted(user.clone());
                GateDecision::Render(user)
            }
            Err(e) => {
                tracing::info!("[GATE] Session probe failed ({}), redirecting", e);
                self.state = GateState::Denied;
                self.navigator.navigate(&self.login_page);
                GateDecision::Redirected(self.login_page.clone())
            }
        }
    }

    /// Landing route: dashboard when signed in, login page otherwise
    pub async fn resolve_root(&self) -> &'static str {
        let route = match self.auth.me().await {
            Ok(user) => {
                self.users.set(user).await;
                DASHBOARD_ROUTE
            }
            Err(_) => LOGIN_ROUTE,
        };
        self.navigator.navigate(route);
        route
    }

    /// End the session, forget the user and leave for the login page.
    ///
    /// A failed logout keeps the user signed in locally.
    pub async fn logout(&mut self) -> Result<()> {
        if let Err(e) = self.auth.logout().await {
            tracing::error!("[GATE] Logout failed: {}", e);
            return Err(e);
        }
        self.users.clear().await;
        self.state = GateState::Denied;
        self.navigator.navigate(&self.login_page);
        Ok(())
    }
}
