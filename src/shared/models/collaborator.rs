//! Collaborator records and the sharing endpoints' payloads
//!
//! Listing responses come back either as a bare array or wrapped in
//! `{"collaborators": [...]}`, and rows key the user by `id` or `userId`.
//! [`CollaboratorListPayload::into_collaborators`] folds all of that into
//! `Vec<Collaborator>`.

use super::permission::Permission;
use serde::{Deserialize, Serialize};

/// A non-owner user with access to one diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// User id
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub permission: Permission,
    pub added_at: Option<String>,
}

impl Collaborator {
    /// Name if present, otherwise email, otherwise the id
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.email.as_deref()))
            .unwrap_or(&self.id)
    }

    /// Secondary line under the name; only shown when both are known
    pub fn subtitle(&self) -> Option<&str> {
        non_blank(self.name.as_deref()).and(non_blank(self.email.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// One collaborator row as the backend sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollaboratorRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "userId", alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub permission: Permission,
    #[serde(default, alias = "addedAt")]
    pub added_at: Option<String>,
}

impl From<CollaboratorRecord> for Collaborator {
    fn from(record: CollaboratorRecord) -> Self {
        Self {
            id: record.id.or(record.user_id).unwrap_or_default(),
            name: record.name,
            email: record.email,
            permission: record.permission,
            added_at: record.added_at,
        }
    }
}

/// Every shape the collaborator listing has been seen to take
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollaboratorListPayload {
    Bare(Vec<CollaboratorRecord>),
    Wrapped {
        #[serde(default)]
        collaborators: Option<Vec<CollaboratorRecord>>,
    },
}

impl CollaboratorListPayload {
    /// Canonical list, in server order. Rows with neither `id` nor `userId`
    /// cannot be updated or removed and are left out.
    pub fn into_collaborators(self) -> Vec<Collaborator> {
        let records = match self {
            Self::Bare(records) => records,
            Self::Wrapped { collaborators } => collaborators.unwrap_or_default(),
        };
        records
            .into_iter()
            .filter(|record| {
                let keyed = record.id.is_some() || record.user_id.is_some();
                if !keyed {
                    tracing::warn!(
                        "[SHARE] Dropping collaborator row without id ({:?})",
                        record.email
                    );
                }
                keyed
            })
            .map(Collaborator::from)
            .collect()
    }
}

/// Body for adding a collaborator
#[derive(Debug, Clone, Serialize)]
pub struct AddCollaboratorRequest<'a> {
    pub email: &'a str,
    pub permission: &'a str,
}

/// Body for changing a collaborator's permission
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCollaboratorRequest<'a> {
    pub permission: &'a str,
}

/// The identity echoed back after a successful add
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorUser {
    #[serde(alias = "userId")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCollaboratorResponse {
    pub user: CollaboratorUser,
    #[serde(default)]
    pub permission: Option<Permission>,
}

/// Generic `{success, permission?}` acknowledgement from mutating endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: Option<bool>,
    /// Present only when the server confirms the stored permission
    #[serde(default)]
    pub permission: Option<Permission>,
}
