//! Diagram Directory
//!
//! The dashboard's view of the diagrams visible to the signed-in user, split
//! into the ones they own and the ones shared with them. The two lists are the
//! only local state; every operation is a plain request/response pair.

use crate::client::notify::NoticeQueue;
use crate::client::session::SessionClient;
use crate::shared::error::{ApiError, Result};
use crate::shared::models::{Diagram, DiagramDraft, DiagramList, SharedDiagram};

/// Client for the diagram endpoints
#[derive(Clone)]
pub struct DiagramApi {
    session: SessionClient,
}

impl DiagramApi {
    pub fn new(session: SessionClient) -> Self {
        Self { session }
    }

    fn path(&self, suffix: &str) -> String {
        self.session.config().diagrams_path(suffix)
    }

    /// Owned and shared partitions
    pub async fn list(&self) -> Result<DiagramList> {
        let list: Option<DiagramList> = self.session.get(&self.path("")).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn create(&self, name: &str, data: &serde_json::Value) -> Result<Diagram> {
        self.session
            .post(&self.path(""), &DiagramDraft { name, data })
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Diagram> {
        self.session.get(&self.path(&format!("/{}", id))).await
    }

    pub async fn save(&self, id: &str, name: &str, data: &serde_json::Value) -> Result<Diagram> {
        self.session
            .put(&self.path(&format!("/{}", id)), &DiagramDraft { name, data })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.session
            .delete::<serde_json::Value>(&self.path(&format!("/{}", id)))
            .await?;
        Ok(())
    }
}

/// Loading state of the dashboard lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Idle,
    Loading,
    Ready,
    LoadFailed,
}

/// A diagram found in either partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagramEntry<'a> {
    Owned(&'a Diagram),
    Shared(&'a SharedDiagram),
}

impl<'a> DiagramEntry<'a> {
    pub fn diagram(&self) -> &'a Diagram {
        match self {
            Self::Owned(diagram) => diagram,
            Self::Shared(shared) => &shared.diagram,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.diagram().name
    }

    /// "Created by" label for cards
    pub fn owner_label(&self) -> &'a str {
        match self {
            Self::Owned(_) => "You",
            Self::Shared(shared) if !shared.owner_name.is_empty() => &shared.owner_name,
            Self::Shared(_) => "\u{2014}",
        }
    }
}

/// Owned + shared lists for the lifetime of the dashboard
pub struct DiagramDirectory {
    api: DiagramApi,
    notices: NoticeQueue,
    owned: Vec<Diagram>,
    shared: Vec<SharedDiagram>,
    status: DirectoryStatus,
}

impl DiagramDirectory {
    pub fn new(session: SessionClient, notices: NoticeQueue) -> Self {
        Self {
            api: DiagramApi::new(session),
            notices,
            owned: Vec::new(),
            shared: Vec::new(),
            status: DirectoryStatus::Idle,
        }
    }

    pub fn owned(&self) -> &[Diagram] {
        &self.owned
    }

    pub fn shared(&self) -> &[SharedDiagram] {
        &self.shared
    }

    pub fn status(&self) -> DirectoryStatus {
        self.status
    }

    /// Fetch both partitions. A failure empties them.
    pub async fn load(&mut self) -> Result<()> {
        self.status = DirectoryStatus::Loading;
        match self.api.list().await {
            Ok(list) => {
                tracing::debug!(
                    "[DIRECTORY] Loaded {} owned, {} shared",
                    list.owned.len(),
                    list.shared.len()
                );
                self.owned = list.owned;
                self.shared = list.shared;
                self.status = DirectoryStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[DIRECTORY] Failed to load diagrams: {}", e);
                self.owned.clear();
                self.shared.clear();
                self.status = DirectoryStatus::LoadFailed;
                Err(e)
            }
        }
    }

    /// Create a diagram. The host opens the editor on the returned id.
    pub async fn create(&mut self, name: &str, data: serde_json::Value) -> Result<Diagram> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("name", "Diagram name is required"));
        }

        match self.api.create(name, &data).await {
            Ok(diagram) => {
                tracing::info!("[DIRECTORY] Created diagram {}", diagram.id);
                Ok(diagram)
            }
            Err(e) => {
                tracing::warn!("[DIRECTORY] Create failed: {}", e);
                self.notices.error("Failed to create diagram. Try again.");
                Err(e)
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Diagram> {
        self.api.get(id).await
    }

    pub async fn save(&self, id: &str, name: &str, data: &serde_json::Value) -> Result<Diagram> {
        self.api.save(id, name, data).await
    }

    /// Delete an owned diagram; the local owned list changes only on success
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!("[DIRECTORY] Deleted diagram {}", id);
                self.owned.retain(|diagram| diagram.id != id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[DIRECTORY] Delete of {} failed: {}", id, e);
                self.notices.error("Failed to delete diagram. Try again.");
                Err(e)
            }
        }
    }

    /// Look a diagram up by id, owned list first
    pub fn find(&self, id: &str) -> Option<DiagramEntry<'_>> {
        self.owned
            .iter()
            .find(|diagram| diagram.id == id)
            .map(DiagramEntry::Owned)
            .or_else(|| {
                self.shared
                    .iter()
                    .find(|shared| shared.id() == id)
                    .map(DiagramEntry::Shared)
            })
    }
}

/// Share and delete are offered only to the diagram's owner
pub fn can_manage(diagram: &Diagram, current_user_id: Option<&str>) -> bool {
    current_user_id.is_some_and(|user_id| diagram.owner_id == user_id)
}
