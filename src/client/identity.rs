//! Current-user store
//!
//! One store lives for the whole application. The auth gate fills it after a
//! successful session probe and logout empties it; nothing else writes to it.
//! Handles are cheap clones passed to whoever needs the user.

use crate::shared::models::User;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    user: Arc<RwLock<Option<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the signed-in user
    pub async fn set(&self, user: User) {
        tracing::debug!("[IDENTITY] Signed in as {}", user.id);
        *self.user.write().await = Some(user);
    }

    /// Forget the user (logout)
    pub async fn clear(&self) {
        *self.user.write().await = None;
    }

    pub async fn current(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn current_id(&self) -> Option<String> {
        self.user.read().await.as_ref().map(|user| user.id.clone())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.user.read().await.is_some()
    }
}
