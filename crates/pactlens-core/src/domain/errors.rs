//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including validation failures caught before any network dispatch.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Rating outside the accepted 1..=5 range
    #[error("Invalid rating: {0} (must be between 1 and 5)")]
    InvalidRating(u8),

    /// A required field was empty or missing
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Share token was empty or syntactically unusable
    #[error("Invalid share token: {0}")]
    InvalidShareToken(String),

    /// New password and its confirmation differ
    #[error("New passwords do not match")]
    PasswordMismatch,

    /// New password below the minimum length
    #[error("New password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum accepted length
        min: usize,
    },

    /// New password identical to the current one
    #[error("New password must be different from current password")]
    PasswordUnchanged,

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// ID parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}
