//! Contract endpoint adapter
//!
//! Implements [`IContractsApi`] over the shared [`ApiClient`]. All of
//! these endpoints are owner-facing and carry the bearer token.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use pactlens_core::{
    domain::{AnalysisSummary, Comment, Contract, ContractId, ShareLink, ShareToken},
    ports::{ApiError, ContractUpload, IContractsApi, UnreadCount},
};

use crate::client::ApiClient;

/// Extracts the share token from a backend-minted share URL.
///
/// The backend returns a full frontend URL whose last path segment is the
/// token, e.g. `https://host/shared/abc123`.
pub fn share_token_from_url(share_url: &str) -> Result<ShareToken, ApiError> {
    let parsed = url::Url::parse(share_url)
        .map_err(|e| ApiError::InvalidResponse(format!("bad share URL '{share_url}': {e}")))?;
    let last = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ApiError::InvalidResponse(format!("share URL has no token segment: {share_url}"))
        })?;
    ShareToken::new(last).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// [`IContractsApi`] implementation over the backend contract endpoints
pub struct ContractsApi {
    client: Arc<ApiClient>,
}

impl ContractsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IContractsApi for ContractsApi {
    async fn list(&self) -> Result<Vec<Contract>, ApiError> {
        self.client.get_json("/contracts/").await
    }

    async fn get(&self, id: &ContractId) -> Result<Contract, ApiError> {
        self.client.get_json(&format!("/contracts/{id}")).await
    }

    /// Uploads the document as multipart form data. Metadata fields that
    /// were not supplied are left out of the form entirely rather than
    /// sent empty.
    async fn upload(&self, upload: ContractUpload) -> Result<Contract, ApiError> {
        debug!(file = %upload.file_name, "Uploading contract");

        let mut form = Form::new()
            .part(
                "file",
                Part::bytes(upload.bytes).file_name(upload.file_name),
            )
            .text("title", upload.title);
        if let Some(description) = upload.description {
            form = form.text("description", description);
        }
        if let Some(contract_type) = upload.contract_type {
            form = form.text("contract_type", contract_type);
        }

        let contract: Contract = self.client.post_multipart("/contracts/upload", form).await?;
        info!(id = %contract.id, "Contract uploaded");
        Ok(contract)
    }

    async fn delete(&self, id: &ContractId) -> Result<(), ApiError> {
        self.client.delete(&format!("/contracts/{id}")).await?;
        info!(%id, "Contract deleted");
        Ok(())
    }

    async fn analysis(&self, id: &ContractId) -> Result<AnalysisSummary, ApiError> {
        self.client
            .get_json(&format!("/contracts/{id}/analysis"))
            .await
    }

    async fn share(&self, id: &ContractId) -> Result<ShareLink, ApiError> {
        let link: ShareLink = self
            .client
            .post_json(&format!("/contracts/{id}/share"), &serde_json::json!({}))
            .await?;
        info!(%id, "Share link created");
        Ok(link)
    }

    async fn comments(&self, id: &ContractId) -> Result<Vec<Comment>, ApiError> {
        self.client
            .get_json(&format!("/contracts/{id}/comments"))
            .await
    }

    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        self.client.get_json("/comments/unread-count").await
    }
}
