//! Share-token endpoint adapter
//!
//! Implements [`ISharingApi`] over its own `reqwest::Client`, deliberately
//! built without any token store. An active owner session therefore cannot
//! leak a bearer header into anonymous share-token requests.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use pactlens_core::{
    domain::{Comment, FeedbackDraft, ShareToken, SharedContractView},
    ports::{ApiError, ISharingApi},
};

use crate::client::{classify, decode};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Unauthenticated HTTP client for the shared-contract endpoints
pub struct SharingClient {
    client: Client,
    base_url: String,
}

impl SharingClient {
    /// Creates a client for the given backend base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        classify(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }
}

#[async_trait::async_trait]
impl ISharingApi for SharingClient {
    async fn shared_contract(&self, token: &ShareToken) -> Result<SharedContractView, ApiError> {
        debug!(%token, "Fetching shared contract");
        self.get_json(&format!("/contracts/shared/{token}")).await
    }

    async fn submit_feedback(
        &self,
        token: &ShareToken,
        feedback: &FeedbackDraft,
    ) -> Result<(), ApiError> {
        debug!(%token, "Submitting feedback");
        self.send(
            self.request(Method::POST, &format!("/contracts/shared/{token}/feedback"))
                .json(feedback),
        )
        .await?;
        Ok(())
    }

    async fn shared_comments(&self, token: &ShareToken) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&format!("/contracts/shared/{token}/comments"))
            .await
    }
}
