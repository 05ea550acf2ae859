//! Password-change use case
//!
//! Client-side validation runs in a fixed order before anything is sent;
//! a validation failure means zero network traffic.

use std::sync::Arc;

use tracing::info;

use crate::{domain::DomainError, ports::IAuthApi};

/// Minimum accepted length for a new password
pub const MIN_PASSWORD_LEN: usize = 8;

/// Fallback message when the backend rejects the change without a detail
pub const CHANGE_FAILED_MESSAGE: &str = "Failed to update password. Please try again.";

/// Input to a password change, as collected from the user
#[derive(Debug, Clone)]
pub struct PasswordChange {
    /// The password currently in effect
    pub current: String,
    /// The requested replacement
    pub new: String,
    /// Re-typed confirmation of the replacement
    pub confirm: String,
}

impl PasswordChange {
    /// Validates in a fixed order: confirmation mismatch, then minimum
    /// length, then sameness with the current password.
    ///
    /// # Errors
    /// Returns the first failing rule
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.new != self.confirm {
            return Err(DomainError::PasswordMismatch);
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.new == self.current {
            return Err(DomainError::PasswordUnchanged);
        }
        Ok(())
    }
}

/// Errors surfaced by the password-change flow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangePasswordError {
    /// A local validation rule failed; nothing was sent
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The backend rejected the change; message is ready for display
    #[error("{0}")]
    Rejected(String),
}

/// Use case updating the authenticated user's password
pub struct ChangePasswordUseCase {
    auth_api: Arc<dyn IAuthApi>,
}

impl ChangePasswordUseCase {
    pub fn new(auth_api: Arc<dyn IAuthApi>) -> Self {
        Self { auth_api }
    }

    /// Validates locally, then asks the backend to update the password.
    ///
    /// A backend rejection carrying a `detail` surfaces that detail
    /// verbatim; anything else becomes the generic retryable message.
    pub async fn change(&self, change: &PasswordChange) -> Result<(), ChangePasswordError> {
        change.validate()?;

        self.auth_api
            .update_password(&change.current, &change.new)
            .await
            .map_err(|e| ChangePasswordError::Rejected(e.user_message(CHANGE_FAILED_MESSAGE)))?;

        info!("Password updated");
        Ok(())
    }
}
