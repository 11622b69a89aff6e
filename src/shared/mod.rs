//! Shared Module
//!
//! Platform-agnostic types used by the client core and by any host that
//! renders it: the domain records, the error taxonomy and the deployment
//! configuration. Everything here is plain data and can be serialized.

/// Diagram, collaborator, user and permission types
pub mod models;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ApiError, FieldError, Result};
pub use models::{Collaborator, Diagram, DiagramList, Permission, SharedDiagram, User};
