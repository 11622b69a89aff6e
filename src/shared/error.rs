//! Shared Error Types
//!
//! This module defines the error taxonomy for every call the client makes to the
//! backend, plus the field-level validation errors shown inline in forms.
//!
//! # Error Categories
//!
//! - `ServiceUnavailable` - the request never got an HTTP response
//! - `NotAuthenticated` - HTTP 401
//! - `RequestFailed` - any other non-2xx status, with the server message
//! - `InvalidResponse` - a 2xx body that could not be decoded
//! - `Validation` - rejected client-side before any request
//!
//! # Usage
//!
//! ```rust
//! use dbdesigner::shared::error::ApiError;
//!
//! let error = ApiError::request_failed(404, "User not found");
//! assert!(error.is_not_found());
//! ```
use thiserror::Error;

/// Fallback message when a failed response carries no readable `error` field
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Errors produced by the session client and the state built on top of it
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure before any HTTP response
    #[error("Service unavailable")]
    ServiceUnavailable,

    /// HTTP 401
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Any other non-success HTTP status
    #[error("{message}")]
    RequestFailed {
        /// Numeric HTTP status for caller inspection
        status: u16,
        /// Server-supplied message, or the generic fallback
        message: String,
    },

    /// A success response whose body did not match the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Decoder message
        message: String,
    },

    /// Client-side validation failure
    #[error(transparent)]
    Validation(#[from] FieldError),
}

/// Inline, field-level validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    /// The form field the error belongs to
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Create a new request-failed error
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldError::new(field, message))
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotAuthenticated => Some(401),
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the message says the target does not exist.
    ///
    /// Matches "404" or "not found" anywhere in the message, ignoring case.
    pub fn is_not_found(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("404") || message.contains("not found")
    }

    /// Text shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidResponse { .. } => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Undecodable success bodies surface as invalid responses
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_response(format!("JSON error: {}", err))
    }
}
