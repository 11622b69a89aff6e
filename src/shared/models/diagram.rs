//! Diagram records
//!
//! The document body (`data`) is opaque here; editing it belongs to the editor.

use super::permission::Permission;
use serde::{Deserialize, Serialize};

/// A diagram as seen by its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A diagram someone else owns and shared with the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedDiagram {
    #[serde(flatten)]
    pub diagram: Diagram,
    /// Granted access level, authoritative from the server
    #[serde(default)]
    pub permission: Permission,
    #[serde(default)]
    pub owner_name: String,
}

impl SharedDiagram {
    pub fn id(&self) -> &str {
        &self.diagram.id
    }
}

/// Both partitions returned by the diagram listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramList {
    #[serde(default)]
    pub owned: Vec<Diagram>,
    #[serde(default)]
    pub shared: Vec<SharedDiagram>,
}

/// Body for create and save
#[derive(Debug, Clone, Serialize)]
pub struct DiagramDraft<'a> {
    pub name: &'a str,
    pub data: &'a serde_json::Value,
}
