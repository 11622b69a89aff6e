//! Diagram access levels
//!
//! Backends disagree on the words (`read`/`write`, `view`/`edit`, `editor`), so
//! every permission string goes through [`Permission::normalize`] before it is
//! displayed, compared or sent back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Words that grant edit access, compared case-insensitively
pub const EDIT_SYNONYMS: [&str; 3] = ["write", "edit", "editor"];

/// Access level a collaborator holds on a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Permission {
    /// Read-only access (also the fallback for anything unrecognised)
    #[default]
    View,
    /// Read-write access
    Edit,
}

impl Permission {
    /// Map any backend permission string onto one of the two access levels.
    ///
    /// Total and idempotent: unknown or empty input becomes `View`. Only the
    /// bare words match, so padded input such as `" edit "` is `View` too.
    pub fn normalize(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if EDIT_SYNONYMS.contains(&lower.as_str()) {
            Self::Edit
        } else {
            Self::View
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }

    /// Label for permission pickers and tags
    pub fn label(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Edit => "Edit",
        }
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Edit)
    }

    /// The only two values a picker may offer
    pub fn all() -> [Permission; 2] {
        [Self::View, Self::Edit]
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Permission {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values (null, numbers) fall back to View like any unknown word
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(raw)) => Self::normalize(&raw),
            _ => Self::View,
        })
    }
}

/// Which words the backend expects when a permission is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionVocabulary {
    /// `view` / `edit`
    #[default]
    ViewEdit,
    /// `read` / `write`
    ReadWrite,
}

impl PermissionVocabulary {
    /// Wire word for a permission
    pub fn encode(&self, permission: Permission) -> &'static str {
        match (self, permission) {
            (Self::ViewEdit, p) => p.as_str(),
            (Self::ReadWrite, Permission::View) => "read",
            (Self::ReadWrite, Permission::Edit) => "write",
        }
    }
}

impl FromStr for PermissionVocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view-edit" | "view_edit" | "viewedit" => Ok(Self::ViewEdit),
            "read-write" | "read_write" | "readwrite" => Ok(Self::ReadWrite),
            other => Err(format!("unknown permission vocabulary: {}", other)),
        }
    }
}
