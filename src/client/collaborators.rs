//! # Collaborator Sharing
//!
//! Keeps the collaborator list of one diagram while its sharing dialog is open,
//! and applies add / permission-change / remove operations to it.
//!
//! ## Behaviour
//!
//! - **Load** replaces the list with the server's, in server order. A failed
//!   load empties it rather than showing stale rows.
//! - **Mutations are optimistic patches**: on success the local row is
//!   appended, changed or dropped without re-fetching; on failure the list is
//!   left exactly as it was and the user is told (inline for add, a notice for
//!   the rest).
//! - **Sessions are cancellable**: [`CollaboratorSession::close`] cancels the
//!   session token. Anything still in flight resolves to
//!   [`Outcome::Discarded`] and touches nothing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dbdesigner::client::{CollaboratorSession, NoticeQueue, SessionClient};
//! use dbdesigner::shared::models::Permission;
//!
//! # async fn example(client: SessionClient) {
//! let sharing = CollaboratorSession::open(client, "d1", NoticeQueue::new());
//! sharing.load().await;
//! sharing.add("grace@example.com", Permission::Edit).await;
//! sharing.close().await;
//! # }
//! ```

use crate::client::notify::NoticeQueue;
use crate::client::session::SessionClient;
use crate::shared::error::Result;
use crate::shared::models::{
    Acknowledgement, AddCollaboratorRequest, AddCollaboratorResponse, Collaborator,
    CollaboratorListPayload, Permission, UpdateCollaboratorRequest,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Inline add error when the email has no account
pub const ADD_NOT_FOUND_MESSAGE: &str = "No account found for that email.";
/// Inline add error for every other failure
pub const ADD_FAILED_MESSAGE: &str = "Failed to add collaborator.";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update permission.";
pub const REMOVE_FAILED_MESSAGE: &str = "Failed to remove collaborator.";

/// Client for `/diagrams/:id/collaborators`
#[derive(Clone)]
pub struct CollaboratorApi {
    session: SessionClient,
}

impl CollaboratorApi {
    pub fn new(session: SessionClient) -> Self {
        Self { session }
    }

    fn path(&self, diagram_id: &str, user_id: Option<&str>) -> String {
        let suffix = match user_id {
            Some(user_id) => format!("/{}/collaborators/{}", diagram_id, user_id),
            None => format!("/{}/collaborators", diagram_id),
        };
        self.session.config().diagrams_path(&suffix)
    }

    /// Current collaborators, whatever shape the backend wraps them in
    pub async fn list(&self, diagram_id: &str) -> Result<Vec<Collaborator>> {
        let payload: Option<CollaboratorListPayload> =
            self.session.get(&self.path(diagram_id, None)).await?;
        Ok(payload
            .map(CollaboratorListPayload::into_collaborators)
            .unwrap_or_default())
    }

    pub async fn add(
        &self,
        diagram_id: &str,
        email: &str,
        permission: Permission,
    ) -> Result<AddCollaboratorResponse> {
        let vocabulary = self.session.config().vocabulary();
        let body = AddCollaboratorRequest {
            email,
            permission: vocabulary.encode(permission),
        };
        self.session.post(&self.path(diagram_id, None), &body).await
    }

    pub async fn update(
        &self,
        diagram_id: &str,
        user_id: &str,
        permission: Permission,
    ) -> Result<Acknowledgement> {
        let vocabulary = self.session.config().vocabulary();
        let body = UpdateCollaboratorRequest {
            permission: vocabulary.encode(permission),
        };
        let ack: Option<Acknowledgement> = self
            .session
            .patch(&self.path(diagram_id, Some(user_id)), &body)
            .await?;
        Ok(ack.unwrap_or_default())
    }

    pub async fn remove(&self, diagram_id: &str, user_id: &str) -> Result<()> {
        self.session
            .delete::<serde_json::Value>(&self.path(diagram_id, Some(user_id)))
            .await?;
        Ok(())
    }
}

/// Overall state of a sharing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharingStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// A mutation in flight; several may run at once
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PendingOperation {
    Adding,
    UpdatingPermission(String),
    Removing(String),
}

/// How one operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Server confirmed, local list patched
    Applied,
    /// Server or transport rejected it, local list untouched
    Failed,
    /// Rejected client-side before any request
    Skipped,
    /// The session closed before the response arrived
    Discarded,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SharingOptions {
    /// Re-fetch after a permission change whose acknowledgement does not echo
    /// the stored permission, instead of trusting the submitted value
    pub reload_on_unconfirmed_update: bool,
}

#[derive(Debug, Default)]
struct SharingState {
    status: SharingStatus,
    collaborators: Vec<Collaborator>,
    add_error: Option<String>,
    pending: HashMap<Uuid, PendingOperation>,
}

/// Sharing state for one diagram, alive while its dialog is open.
///
/// Clones are handles to the same session, so operations can be awaited
/// concurrently.
#[derive(Clone)]
pub struct CollaboratorSession {
    diagram_id: Arc<str>,
    api: CollaboratorApi,
    notices: NoticeQueue,
    options: SharingOptions,
    state: Arc<RwLock<SharingState>>,
    token: CancellationToken,
}

impl CollaboratorSession {
    /// Start a fresh session. Nothing is fetched until [`load`](Self::load).
    pub fn open(session: SessionClient, diagram_id: impl Into<String>, notices: NoticeQueue) -> Self {
        Self::with_options(session, diagram_id, notices, SharingOptions::default())
    }

    pub fn with_options(
        session: SessionClient,
        diagram_id: impl Into<String>,
        notices: NoticeQueue,
        options: SharingOptions,
    ) -> Self {
        let diagram_id: String = diagram_id.into();
        Self {
            diagram_id: Arc::from(diagram_id),
            api: CollaboratorApi::new(session),
            notices,
            options,
            state: Arc::new(RwLock::new(SharingState::default())),
            token: CancellationToken::new(),
        }
    }

    pub fn diagram_id(&self) -> &str {
        &self.diagram_id
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn status(&self) -> SharingStatus {
        self.state.read().await.status
    }

    pub async fn collaborators(&self) -> Vec<Collaborator> {
        self.state.read().await.collaborators.clone()
    }

    pub async fn find(&self, user_id: &str) -> Option<Collaborator> {
        self.state
            .read()
            .await
            .collaborators
            .iter()
            .find(|c| c.id == user_id)
            .cloned()
    }

    /// Inline error under the add field
    pub async fn add_error(&self) -> Option<String> {
        self.state.read().await.add_error.clone()
    }

    /// Editing the email field dismisses the inline error
    pub async fn clear_add_error(&self) {
        self.state.write().await.add_error = None;
    }

    pub async fn pending(&self) -> Vec<PendingOperation> {
        self.state.read().await.pending.values().cloned().collect()
    }

    pub async fn is_pending(&self, operation: &PendingOperation) -> bool {
        self.state
            .read()
            .await
            .pending
            .values()
            .any(|pending| pending == operation)
    }

    /// Run a request unless the session closes first
    async fn guarded<T>(&self, request: impl Future<Output = Result<T>>) -> Option<Result<T>> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            result = request => Some(result),
        }
    }

    async fn begin(&self, operation: PendingOperation) -> Uuid {
        let id = Uuid::new_v4();
        self.state.write().await.pending.insert(id, operation);
        id
    }

    /// Fetch the collaborator list. An empty diagram id issues no request.
    pub async fn load(&self) -> Outcome {
        if self.diagram_id.is_empty() {
            return Outcome::Skipped;
        }
        if self.is_closed() {
            return Outcome::Discarded;
        }

        self.state.write().await.status = SharingStatus::Loading;
        let Some(result) = self.guarded(self.api.list(&self.diagram_id)).await else {
            tracing::debug!("[SHARE] Load of {} discarded", self.diagram_id);
            return Outcome::Discarded;
        };

        let mut state = self.state.write().await;
        if self.is_closed() {
            return Outcome::Discarded;
        }
        match result {
            Ok(collaborators) => {
                tracing::debug!(
                    "[SHARE] Loaded {} collaborators for {}",
                    collaborators.len(),
                    self.diagram_id
                );
                state.collaborators = collaborators;
                state.status = SharingStatus::Loaded;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[SHARE] Failed to load collaborators for {}: {}", self.diagram_id, e);
                state.collaborators.clear();
                state.status = SharingStatus::LoadFailed;
                Outcome::Failed
            }
        }
    }

    /// Invite a user by email. Blank input is ignored without a request.
    pub async fn add(&self, email: &str, permission: impl Into<Permission>) -> Outcome {
        let email = email.trim();
        if email.is_empty() {
            return Outcome::Skipped;
        }
        if self.is_closed() {
            return Outcome::Discarded;
        }
        let permission = permission.into();

        self.clear_add_error().await;
        let op = self.begin(PendingOperation::Adding).await;
        let result = self
            .guarded(self.api.add(&self.diagram_id, email, permission))
            .await;

        let mut state = self.state.write().await;
        state.pending.remove(&op);
        let Some(result) = result.filter(|_| !self.is_closed()) else {
            return Outcome::Discarded;
        };

        match result {
            Ok(response) => {
                let user = response.user;
                tracing::info!("[SHARE] Added {} to {} as {}", user.id, self.diagram_id, permission);
                match state.collaborators.iter().position(|c| c.id == user.id) {
                    Some(index) => state.collaborators[index].permission = permission,
                    None => state.collaborators.push(Collaborator {
                        id: user.id,
                        name: user.name,
                        email: user.email.or_else(|| Some(email.to_string())),
                        permission,
                        added_at: Some(chrono::Utc::now().to_rfc3339()),
                    }),
                }
                state.add_error = None;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[SHARE] Add to {} failed: {}", self.diagram_id, e);
                let message = if e.is_not_found() {
                    ADD_NOT_FOUND_MESSAGE
                } else {
                    ADD_FAILED_MESSAGE
                };
                state.add_error = Some(message.to_string());
                Outcome::Failed
            }
        }
    }

    /// Change one collaborator's access level
    pub async fn update_permission(&self, user_id: &str, permission: impl Into<Permission>) -> Outcome {
        if self.is_closed() {
            return Outcome::Discarded;
        }
        let permission = permission.into();

        let op = self
            .begin(PendingOperation::UpdatingPermission(user_id.to_string()))
            .await;
        let result = self
            .guarded(self.api.update(&self.diagram_id, user_id, permission))
            .await;

        let mut state = self.state.write().await;
        state.pending.remove(&op);
        let Some(result) = result.filter(|_| !self.is_closed()) else {
            return Outcome::Discarded;
        };

        match result {
            Ok(ack) => {
                let confirmed = ack.permission;
                let applied = confirmed.unwrap_or(permission);
                if let Some(row) = state.collaborators.iter_mut().find(|c| c.id == user_id) {
                    row.permission = applied;
                }
                tracing::info!("[SHARE] {} on {} is now {}", user_id, self.diagram_id, applied);
                drop(state);

                if confirmed.is_none() && self.options.reload_on_unconfirmed_update {
                    tracing::debug!("[SHARE] Unconfirmed permission change, reloading");
                    self.load().await;
                }
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[SHARE] Permission change for {} failed: {}", user_id, e);
                self.notices.error(UPDATE_FAILED_MESSAGE);
                Outcome::Failed
            }
        }
    }

    /// Revoke a collaborator's access
    pub async fn remove(&self, user_id: &str) -> Outcome {
        if self.is_closed() {
            return Outcome::Discarded;
        }

        let op = self
            .begin(PendingOperation::Removing(user_id.to_string()))
            .await;
        let result = self
            .guarded(self.api.remove(&self.diagram_id, user_id))
            .await;

        let mut state = self.state.write().await;
        state.pending.remove(&op);
        let Some(result) = result.filter(|_| !self.is_closed()) else {
            return Outcome::Discarded;
        };

        match result {
            Ok(()) => {
                tracing::info!("[SHARE] Removed {} from {}", user_id, self.diagram_id);
                state.collaborators.retain(|c| c.id != user_id);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[SHARE] Remove of {} failed: {}", user_id, e);
                self.notices.error(REMOVE_FAILED_MESSAGE);
                Outcome::Failed
            }
        }
    }

    /// Close the dialog: cancel everything in flight and drop the list
    pub async fn close(&self) {
        self.token.cancel();
        *self.state.write().await = SharingState::default();
        tracing::debug!("[SHARE] Closed session for {}", self.diagram_id);
    }
}
