//! Anonymous sharing API port (driven/secondary port)
//!
//! Interface for the credential-free shared-link endpoints. The capability
//! is the share token in the URL path; implementations must never attach a
//! bearer token to these calls, and an active authenticated session has no
//! effect on them.

use crate::domain::{Comment, FeedbackDraft, ShareToken, SharedContractView};

use super::ApiError;

/// Port trait for the anonymous shared-contract endpoints
#[async_trait::async_trait]
pub trait ISharingApi: Send + Sync {
    /// Fetches the shared projection via `GET /contracts/shared/{token}`.
    /// Returns the contract, optional analysis summary and existing comments
    /// in one call.
    async fn shared_contract(&self, token: &ShareToken) -> Result<SharedContractView, ApiError>;

    /// Submits anonymous feedback via `POST /contracts/shared/{token}/feedback`
    async fn submit_feedback(
        &self,
        token: &ShareToken,
        feedback: &FeedbackDraft,
    ) -> Result<(), ApiError>;

    /// Re-fetches the comment list via `GET /contracts/shared/{token}/comments`
    async fn shared_comments(&self, token: &ShareToken) -> Result<Vec<Comment>, ApiError>;
}
