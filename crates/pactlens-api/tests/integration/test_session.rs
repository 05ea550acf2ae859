//! Session flows over the HTTP adapters
//!
//! Wires the real `SessionStore` to the HTTP auth adapter against a mock
//! backend, and verifies that an unauthorized response from any endpoint
//! clears the persisted token and forces a return to sign-in.

use std::sync::Arc;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use pactlens_api::{AuthApi, ContractsApi};
use pactlens_core::domain::Email;
use pactlens_core::ports::{Credentials, IAuthApi, IAuthEvents, IContractsApi, ITokenStore};
use pactlens_core::usecases::{AuthOutcome, SessionStore, ViewGate};

use crate::common;

fn credentials() -> Credentials {
    Credentials {
        email: Email::new("test@example.com").unwrap(),
        password: "hunter22".to_string(),
    }
}

#[tokio::test]
async fn login_persists_token_and_authenticates() {
    let (server, client, tokens) = common::setup_api_client(None).await;
    common::mount_login_success(&server, "tok-live-1").await;

    let auth = Arc::new(AuthApi::new(client));
    let store = SessionStore::new(auth, tokens.clone());

    let outcome = store.login(&credentials()).await;

    assert!(outcome.is_success());
    assert_eq!(tokens.load().unwrap().unwrap().as_str(), "tok-live-1");
    let session = store.session();
    assert_eq!(session.user().unwrap().email, "test@example.com");
}

#[tokio::test]
async fn login_sends_credentials_as_json() {
    let (server, client, _tokens) = common::setup_api_client(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/email"))
        .and(body_json(serde_json::json!({
            "email": "test@example.com",
            "password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    common::mount_current_user(&server).await;

    let auth = AuthApi::new(client);
    let response = auth.login(&credentials()).await.unwrap();

    assert_eq!(response.access_token.as_str(), "tok-1");
    assert!(response.user.is_none());
}

#[tokio::test]
async fn current_user_carries_bearer_header() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-live-1")).await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer tok-live-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-test-001",
            "email": "test@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthApi::new(client);
    let user = auth.current_user().await.unwrap();

    assert_eq!(user.email, "test@example.com");
}

#[tokio::test]
async fn login_rejection_surfaces_backend_detail() {
    let (server, client, _tokens) = common::setup_api_client(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/email"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Incorrect email or password"
        })))
        .mount(&server)
        .await;

    let auth = Arc::new(AuthApi::new(client));
    let store = SessionStore::new(auth, Arc::new(pactlens_core::ports::MemoryTokenStore::new()));

    let outcome = store.login(&credentials()).await;

    assert_eq!(
        outcome,
        AuthOutcome::Failed {
            error: "Incorrect email or password".to_string()
        }
    );
}

#[tokio::test]
async fn unauthorized_from_any_endpoint_forces_sign_in() {
    // An authenticated session exists, then an unrelated contract request
    // comes back 401. The session store must clear the token and latch
    // the redirect without any call site handling it.
    let (server, client, tokens) = common::setup_api_client(Some("tok-stale")).await;
    Mock::given(method("GET"))
        .and(path("/contracts/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let auth = Arc::new(AuthApi::new(client.clone()));
    let store = Arc::new(SessionStore::new(auth, tokens.clone()));
    client.set_auth_events(store.clone() as Arc<dyn IAuthEvents>);

    let contracts = ContractsApi::new(client);
    let result = contracts.list().await;

    assert!(result.unwrap_err().is_unauthorized());
    assert!(tokens.load().unwrap().is_none(), "token must be cleared");
    assert!(store.login_required());
    assert!(!store.session().is_authenticated());
}

#[tokio::test]
async fn login_fails_when_fresh_token_is_rejected_during_user_resolution() {
    // The backend issues a token but rejects it on the follow-up profile
    // fetch. The wired auth-events sink clears the session mid-login, so
    // the caller must see a failure, not a signed-in anonymous session.
    let (server, client, tokens) = common::setup_api_client(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-revoked"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let auth = Arc::new(AuthApi::new(client.clone()));
    let store = Arc::new(SessionStore::new(auth, tokens.clone()));
    client.set_auth_events(store.clone() as Arc<dyn IAuthEvents>);

    let outcome = store.login(&credentials()).await;

    assert!(!outcome.is_success());
    assert!(tokens.load().unwrap().is_none(), "token must be cleared");
    assert!(store.login_required());
    assert!(!store.session().is_authenticated());
}

#[tokio::test]
async fn initialize_restores_session_against_live_backend() {
    let (server, client, tokens) = common::setup_api_client(Some("tok-persisted")).await;
    common::mount_current_user(&server).await;

    let auth = Arc::new(AuthApi::new(client));
    let store = SessionStore::new(auth, tokens);

    assert_eq!(store.gate(), ViewGate::Pending);
    store.initialize().await;

    assert_eq!(store.gate(), ViewGate::Render);
    assert_eq!(store.session().user().unwrap().full_name.as_deref(), Some("Test User"));
}

#[tokio::test]
async fn password_update_posts_both_passwords() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-live-1")).await;
    Mock::given(method("POST"))
        .and(path("/auth/password-update"))
        .and(body_json(serde_json::json!({
            "current_password": "old-secret",
            "new_password": "brand-new-secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Password updated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthApi::new(client);
    auth.update_password("old-secret", "brand-new-secret")
        .await
        .unwrap();
}
