//! Owner-facing contracts API port (driven/secondary port)
//!
//! Interface for bearer-authenticated contract operations: listing,
//! upload, deletion, analysis results, share-link minting and owner-side
//! feedback queries. The adapter attaches the token from the token store
//! on every call.

use serde::Deserialize;

use crate::domain::{AnalysisSummary, Comment, Contract, ContractId, ShareLink};

use super::ApiError;

/// A contract file plus its metadata, sent as multipart form data to
/// `POST /contracts/upload`. Absent metadata fields are skipped, not sent
/// as empty strings.
#[derive(Debug, Clone)]
pub struct ContractUpload {
    /// Original file name (used for the multipart part)
    pub file_name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Contract title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional contract type
    pub contract_type: Option<String>,
}

/// Response from `GET /comments/unread-count`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UnreadCount {
    /// Number of feedback comments the owner has not seen yet
    pub total_comments: u64,
}

/// Port trait for owner-facing contract endpoints
#[async_trait::async_trait]
pub trait IContractsApi: Send + Sync {
    /// Lists the owner's contracts via `GET /contracts/`
    async fn list(&self) -> Result<Vec<Contract>, ApiError>;

    /// Fetches one contract via `GET /contracts/{id}`
    async fn get(&self, id: &ContractId) -> Result<Contract, ApiError>;

    /// Uploads a contract file with metadata via `POST /contracts/upload`
    async fn upload(&self, upload: ContractUpload) -> Result<Contract, ApiError>;

    /// Deletes a contract via `DELETE /contracts/{id}`
    async fn delete(&self, id: &ContractId) -> Result<(), ApiError>;

    /// Fetches analysis results via `GET /contracts/{id}/analysis`
    async fn analysis(&self, id: &ContractId) -> Result<AnalysisSummary, ApiError>;

    /// Mints a share link via `POST /contracts/{id}/share`.
    /// The returned URL embeds an opaque token valid for seven days.
    async fn share(&self, id: &ContractId) -> Result<ShareLink, ApiError>;

    /// Fetches the owner view of feedback via `GET /contracts/{id}/comments`
    async fn comments(&self, id: &ContractId) -> Result<Vec<Comment>, ApiError>;

    /// Fetches the unread feedback count via `GET /comments/unread-count`
    async fn unread_count(&self) -> Result<UnreadCount, ApiError>;
}
