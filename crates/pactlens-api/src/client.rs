//! Shared HTTP plumbing for the authenticated backend API
//!
//! Wraps `reqwest::Client` with base URL construction, bearer-token
//! attachment from the token store, and classification of responses into
//! [`ApiError`]. A 401 from any endpoint additionally notifies the
//! registered auth-events sink, which is how one rejected request anywhere
//! forces the whole client back to sign-in.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pactlens_api::client::ApiClient;
//! use pactlens_core::ports::MemoryTokenStore;
//!
//! let client = ApiClient::new(
//!     "http://localhost:8000/api/v1",
//!     Arc::new(MemoryTokenStore::new()),
//! );
//! ```

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use pactlens_core::ports::{ApiError, IAuthEvents, ITokenStore};

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body shape carrying a backend-supplied error explanation
#[derive(Debug, serde::Deserialize)]
struct DetailBody {
    detail: Option<String>,
}

/// Classifies a non-transport response into `Ok` or a typed [`ApiError`].
///
/// Consumes the response body on error to extract the backend `detail`
/// field when present.
pub(crate) async fn classify(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<DetailBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .filter(|d| !d.is_empty());

    Err(match status {
        StatusCode::UNAUTHORIZED => {
            ApiError::Unauthorized(detail.unwrap_or_else(|| "authentication required".to_string()))
        }
        StatusCode::FORBIDDEN => {
            ApiError::Forbidden(detail.unwrap_or_else(|| "access denied".to_string()))
        }
        StatusCode::NOT_FOUND => {
            ApiError::NotFound(detail.unwrap_or_else(|| "resource not found".to_string()))
        }
        s if s.is_client_error() => ApiError::Rejected {
            detail: detail.unwrap_or_default(),
        },
        s => ApiError::Server(detail.unwrap_or_else(|| format!("backend returned {s}"))),
    })
}

/// Decodes a JSON body, mapping decode failures to [`ApiError::InvalidResponse`]
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// HTTP client for authenticated backend calls
///
/// Every request goes through [`ApiClient::send`], which attaches the
/// persisted bearer token when one exists and routes the response through
/// [`classify`]. An `Unauthorized` classification fires the registered
/// [`IAuthEvents`] sink exactly once per response.
pub struct ApiClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests, without trailing slash
    base_url: String,
    /// Source of the current bearer token
    token_store: Arc<dyn ITokenStore>,
    /// Sink notified on every unauthorized response.
    ///
    /// Registered after construction because the session store both owns
    /// the auth adapter and receives its unauthorized events.
    auth_events: RwLock<Option<Arc<dyn IAuthEvents>>>,
}

impl ApiClient {
    /// Creates a client for the given backend base URL
    pub fn new(base_url: impl Into<String>, token_store: Arc<dyn ITokenStore>) -> Self {
        Self::with_timeout(base_url, token_store, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        token_store: Arc<dyn ITokenStore>,
        timeout: Duration,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url,
            token_store,
            auth_events: RwLock::new(None),
        }
    }

    /// Registers the sink for unauthorized responses
    pub fn set_auth_events(&self, events: Arc<dyn IAuthEvents>) {
        *self
            .auth_events
            .write()
            .expect("auth events lock poisoned") = Some(events);
        debug!("Auth events sink registered");
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for the given method and path, attaching
    /// the persisted bearer token when one exists
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, DELETE, etc.)
    /// * `path` - API path relative to base URL (e.g., "/contracts/")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match self.token_store.load() {
            Ok(Some(token)) => builder.bearer_auth(token.as_str()),
            Ok(None) => builder,
            Err(e) => {
                warn!("Failed to read bearer token, sending unauthenticated: {e:#}");
                builder
            }
        }
    }

    /// Sends a request and classifies the response.
    ///
    /// Transport failures become [`ApiError::Network`]; unauthorized
    /// responses fire the auth-events sink before returning.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match classify(response).await {
            Ok(response) => Ok(response),
            Err(error) => {
                if error.is_unauthorized() {
                    self.notify_unauthorized();
                }
                Err(error)
            }
        }
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    /// POST `body` as JSON to `path`, discarding the response body
    pub async fn post_json_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    /// POST a multipart form to `path` and decode the JSON response
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        decode(response).await
    }

    /// DELETE `path`, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn notify_unauthorized(&self) {
        let events = self
            .auth_events
            .read()
            .expect("auth events lock poisoned")
            .clone();
        if let Some(events) = events {
            debug!("Unauthorized response, dispatching auth event");
            events.unauthorized();
        }
    }
}
