//! Domain types exchanged with the backend
//!
//! Every wire shape the backend is known to produce is decoded here and turned
//! into one canonical type, so the rest of the crate never sees response
//! variants or permission synonyms.

pub mod collaborator;
pub mod diagram;
pub mod permission;
pub mod user;

pub use collaborator::{
    Acknowledgement, AddCollaboratorRequest, AddCollaboratorResponse, Collaborator,
    CollaboratorListPayload, CollaboratorRecord, CollaboratorUser, UpdateCollaboratorRequest,
};
pub use diagram::{Diagram, DiagramDraft, DiagramList, SharedDiagram};
pub use permission::{Permission, PermissionVocabulary};
pub use user::User;
