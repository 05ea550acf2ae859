//! Error classification for backend API calls
//!
//! Adapters map HTTP outcomes into this enum so use cases can react to the
//! taxonomy (global unauthorized effect, verbatim backend messages, generic
//! transport fallbacks) without knowing anything about HTTP.

use thiserror::Error;

/// Errors that can occur when communicating with the backend API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication credentials are invalid, expired or revoked.
    /// Triggers the process-wide logout effect via [`super::IAuthEvents`].
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the request with a message body (4xx).
    /// `detail` carries the backend's own wording, shown verbatim.
    #[error("Request rejected: {detail}")]
    Rejected {
        /// Message extracted from the error payload's `detail` field
        detail: String,
    },

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// A network-level error occurred (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// True if this failure must trigger the global logout-and-redirect
    /// behavior
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// The message to show the user: the backend's `detail` verbatim when
    /// one was provided, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { detail } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}
