//! Shared-view flows over the unauthenticated sharing client
//!
//! Verifies that share-token requests never carry a bearer header even
//! when an owner session is active, and exercises the resolver's
//! expired-link collapse and feedback round-trip against a mock backend.

use std::sync::Arc;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pactlens_api::SharingClient;
use pactlens_core::domain::{Rating, ShareToken};
use pactlens_core::ports::ITokenStore;
use pactlens_core::usecases::{
    SharedViewResolver, SharedViewState, FEEDBACK_FAILED_MESSAGE, LINK_EXPIRED_MESSAGE,
};

use crate::common;

fn share_token() -> ShareToken {
    ShareToken::new("share-abc123").unwrap()
}

#[tokio::test]
async fn shared_requests_never_carry_bearer_header() {
    // An owner session with a live token exists in the same process; the
    // sharing client must still send nothing in Authorization.
    let (server, _client, tokens) = common::setup_api_client(Some("tok-owner")).await;
    assert!(tokens.load().unwrap().is_some());
    common::mount_shared_contract(&server, "share-abc123").await;

    let sharing = SharingClient::new(server.uri());
    let resolver = SharedViewResolver::new(Arc::new(sharing));
    resolver.resolve(&share_token()).await;

    assert!(resolver.state().is_ready());
    let requests = server.received_requests().await.unwrap();
    assert!(!requests.is_empty());
    for request in requests {
        assert!(
            !request.headers.contains_key("authorization"),
            "share-token request leaked an Authorization header"
        );
    }
}

#[tokio::test]
async fn resolve_populates_projection_and_analysis() {
    let server = MockServer::start().await;
    common::mount_shared_contract(&server, "share-abc123").await;

    let resolver = SharedViewResolver::new(Arc::new(SharingClient::new(server.uri())));
    resolver.resolve(&share_token()).await;

    match resolver.state() {
        SharedViewState::Ready {
            contract,
            analysis,
            comments,
        } => {
            assert_eq!(contract.title, "Service Agreement");
            assert_eq!(contract.risk_score, Some(72));
            assert_eq!(analysis.unwrap().ai_model_used.as_deref(), Some("risk-v2"));
            assert!(comments.is_empty());
        }
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_token_collapses_to_expired_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contracts/shared/share-gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Share link not found"
        })))
        .mount(&server)
        .await;

    let resolver = SharedViewResolver::new(Arc::new(SharingClient::new(server.uri())));
    resolver.resolve(&ShareToken::new("share-gone").unwrap()).await;

    match resolver.state() {
        SharedViewState::Expired { message } => assert_eq!(message, LINK_EXPIRED_MESSAGE),
        other => panic!("expected Expired, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_collapses_to_expired_message() {
    // Point at a server that is already shut down.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let resolver = SharedViewResolver::new(Arc::new(SharingClient::new(uri)));
    resolver.resolve(&share_token()).await;

    match resolver.state() {
        SharedViewState::Expired { message } => assert_eq!(message, LINK_EXPIRED_MESSAGE),
        other => panic!("expected Expired, got {other:?}"),
    }
}

#[tokio::test]
async fn feedback_round_trip_posts_draft_and_refreshes_comments() {
    let server = MockServer::start().await;
    common::mount_shared_contract(&server, "share-abc123").await;
    Mock::given(method("POST"))
        .and(path("/contracts/shared/share-abc123/feedback"))
        .and(body_json(serde_json::json!({
            "commenter_name": "Alice",
            "comment_text": "Clause 9 needs a cap",
            "rating": 4
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 41,
            "message": "Feedback submitted"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contracts/shared/share-abc123/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 41,
                "commenter_name": "Alice",
                "comment_text": "Clause 9 needs a cap",
                "rating": 4,
                "created_at": "2025-06-02T08:30:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = SharedViewResolver::new(Arc::new(SharingClient::new(server.uri())));
    resolver.resolve(&share_token()).await;
    resolver.update_draft(|draft| {
        draft.commenter_name = "Alice".to_string();
        draft.comment_text = "Clause 9 needs a cap".to_string();
        draft.rating = Rating::new(4).unwrap();
    });

    resolver.submit_feedback(&share_token()).await.unwrap();

    assert!(resolver.draft().commenter_name.is_empty());
    match resolver.state() {
        SharedViewState::Ready { comments, .. } => {
            assert_eq!(comments.len(), 1);
            assert_eq!(comments[0].id, 41);
        }
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_feedback_keeps_draft_and_reports_generic_error() {
    let server = MockServer::start().await;
    common::mount_shared_contract(&server, "share-abc123").await;
    Mock::given(method("POST"))
        .and(path("/contracts/shared/share-abc123/feedback"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let resolver = SharedViewResolver::new(Arc::new(SharingClient::new(server.uri())));
    resolver.resolve(&share_token()).await;
    resolver.update_draft(|draft| {
        draft.commenter_name = "Alice".to_string();
        draft.comment_text = "Half-typed thoughts".to_string();
    });

    let err = resolver.submit_feedback(&share_token()).await.unwrap_err();

    assert_eq!(err.to_string(), FEEDBACK_FAILED_MESSAGE);
    assert_eq!(resolver.draft().comment_text, "Half-typed thoughts");
}
