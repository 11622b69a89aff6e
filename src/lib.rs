//! DB Designer Client - Main Library
//!
//! Headless client core for the DB Designer dashboard: cookie sessions against
//! the backend REST service, the owned/shared diagram directory, and the
//! collaborator sharing model with optimistic, cancellable updates.
//!
//! # Module Structure
//!
//! - **`shared`** - Plain data shared with any host
//!   - Diagram, collaborator, user and permission types
//!   - Error taxonomy
//!   - Deployment configuration
//!
//! - **`client`** - Stateful client core
//!   - Session request helper with redirect-on-401
//!   - Auth gate and current-user store
//!   - Diagram directory and collaborator sessions
//!
//! # Feature Flags
//!
//! - **`telemetry`** - `client::telemetry::init_tracing` via tracing-subscriber
//!
//! # Concurrency
//!
//! Everything runs on one logical task. Each backend call is an `.await`
//! point; sharing sessions keep their state behind a `tokio::sync::RwLock` so
//! several operations may be awaited together.
//!
//! # Error Handling
//!
//! - `Result<T, ApiError>` for every backend call
//! - `FieldError` for inline validation
//! - `ConfigError` for configuration loading

/// Shared types and data structures
pub mod shared;

/// Client core
pub mod client;
