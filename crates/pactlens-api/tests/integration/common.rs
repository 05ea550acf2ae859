//! Shared test helpers for backend integration tests
//!
//! Provides wiremock-based mock server setup for the PactLens backend
//! endpoints. Each helper mounts the necessary mock endpoints and returns
//! adapters pointing at the mock server.

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pactlens_api::client::ApiClient;
use pactlens_core::domain::AuthToken;
use pactlens_core::ports::{ITokenStore, MemoryTokenStore};

/// Starts a mock server and returns it with an [`ApiClient`] whose token
/// store is pre-loaded with `token` (pass `None` for an anonymous client).
pub async fn setup_api_client(
    token: Option<&str>,
) -> (MockServer, Arc<ApiClient>, Arc<MemoryTokenStore>) {
    let server = MockServer::start().await;
    let tokens = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(AuthToken::new(token)),
        None => MemoryTokenStore::new(),
    });
    let client = Arc::new(ApiClient::new(
        server.uri(),
        tokens.clone() as Arc<dyn ITokenStore>,
    ));
    (server, client, tokens)
}

/// Mounts `GET /users/me` returning a fixed user profile
pub async fn mount_current_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-test-001",
            "email": "test@example.com",
            "full_name": "Test User"
        })))
        .mount(server)
        .await;
}

/// Mounts `POST /auth/login/email` returning a token and inline user
pub async fn mount_login_success(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "user": {
                "id": "user-test-001",
                "email": "test@example.com",
                "full_name": "Test User"
            }
        })))
        .mount(server)
        .await;
}

/// Mounts a shared-contract endpoint for `share_token` with an empty
/// comment list
pub async fn mount_shared_contract(server: &MockServer, share_token: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/contracts/shared/{share_token}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "contract": {
                "title": "Service Agreement",
                "contract_type": "service",
                "description": "Annual service agreement",
                "status": "completed",
                "risk_score": 72,
                "risk_factors": [
                    {
                        "factor": "liability",
                        "title": "Unlimited liability",
                        "description": "Clause 9 has no liability cap"
                    }
                ],
                "recommendations": "Negotiate a liability cap"
            },
            "analysis": {
                "ai_model_used": "risk-v2",
                "processing_time_seconds": 14.2,
                "status": "completed"
            },
            "comments": []
        })))
        .mount(server)
        .await;
}

/// A contract object as the backend returns it
pub fn contract_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "contract_type": "nda",
        "status": "completed",
        "risk_score": 35,
        "created_at": "2025-06-01T12:00:00Z"
    })
}
