//! Client Core Module
//!
//! The stateful half of the crate. A host UI creates one [`SessionClient`],
//! hands clones of it to the pieces below, and renders their state.
//!
//! # Architecture
//!
//! - **`config`** - Configuration loading (env, `.env`, TOML file)
//! - **`navigation`** - Navigator seam for redirects
//! - **`session`** - Request helper: cookies, JSON, 401 handling
//! - **`auth`** - `/auth/*` endpoints and the login form
//! - **`identity`** - Current-user store
//! - **`gate`** - Auth gate for protected views
//! - **`diagrams`** - Dashboard diagram directory
//! - **`collaborators`** - Per-diagram sharing sessions
//! - **`password`** - Change-password form
//! - **`notify`** - Non-blocking notices
//! - **`display`** - Formatting helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dbdesigner::client::{AuthGate, Config, DiagramDirectory, NavigationHistory, NoticeQueue, SessionClient, UserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SessionClient::new(Config::load()?, Arc::new(NavigationHistory::new()))?;
//! let users = UserStore::new();
//!
//! let mut gate = AuthGate::new(&client, users.clone());
//! gate.enter().await;
//!
//! let mut directory = DiagramDirectory::new(client.clone(), NoticeQueue::new());
//! directory.load().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod collaborators;
pub mod config;
pub mod diagrams;
pub mod display;
pub mod gate;
pub mod identity;
pub mod navigation;
pub mod notify;
pub mod password;
pub mod session;
#[cfg(feature = "telemetry")]
pub mod telemetry;

// Re-export commonly used types
pub use auth::{AuthApi, AuthState};
pub use collaborators::{
    CollaboratorApi, CollaboratorSession, Outcome, PendingOperation, SharingOptions, SharingStatus,
};
pub use config::Config;
pub use diagrams::{can_manage, DiagramApi, DiagramDirectory, DiagramEntry, DirectoryStatus};
pub use gate::{AuthGate, GateDecision, GateState};
pub use identity::UserStore;
pub use navigation::{NavigationHistory, Navigator};
pub use notify::{Notice, NoticeLevel, NoticeQueue};
pub use password::ChangePasswordForm;
pub use session::{RequestOptions, SessionClient};
