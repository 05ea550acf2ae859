//! Owner-facing contract endpoints over the authenticated client

use std::str::FromStr;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use pactlens_api::{share_token_from_url, ContractsApi};
use pactlens_core::domain::{ContractId, RiskLevel};
use pactlens_core::ports::{ContractUpload, IContractsApi};

use crate::common;

const CONTRACT_ID: &str = "6dfac8b4-6b4d-4f6e-9f2a-3a4d1be0c9aa";

#[tokio::test]
async fn list_returns_contracts_with_risk_levels() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-owner")).await;
    Mock::given(method("GET"))
        .and(path("/contracts/"))
        .and(header("Authorization", "Bearer tok-owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            common::contract_json(CONTRACT_ID, "NDA with Acme"),
        ])))
        .mount(&server)
        .await;

    let contracts = ContractsApi::new(client).list().await.unwrap();

    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0].title, "NDA with Acme");
    assert_eq!(contracts[0].risk_level(), RiskLevel::Low);
}

#[tokio::test]
async fn get_tolerates_unknown_status() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-owner")).await;
    let mut body = common::contract_json(CONTRACT_ID, "NDA with Acme");
    body["status"] = serde_json::json!("archived_v2");
    Mock::given(method("GET"))
        .and(path(format!("/contracts/{CONTRACT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let id = ContractId::from_str(CONTRACT_ID).unwrap();
    let contract = ContractsApi::new(client).get(&id).await.unwrap();

    assert!(!contract.status.is_completed());
}

#[tokio::test]
async fn upload_sends_multipart_with_supplied_metadata_only() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-owner")).await;
    Mock::given(method("POST"))
        .and(path("/contracts/upload"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(common::contract_json(CONTRACT_ID, "NDA with Acme")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let contract = ContractsApi::new(client)
        .upload(ContractUpload {
            file_name: "nda.pdf".to_string(),
            bytes: b"%PDF-1.4 fake".to_vec(),
            title: "NDA with Acme".to_string(),
            description: None,
            contract_type: Some("nda".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(contract.title, "NDA with Acme");

    let requests = server.received_requests().await.unwrap();
    let upload = &requests[0];
    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("name=\"title\""));
    assert!(body.contains("name=\"contract_type\""));
    assert!(
        !body.contains("name=\"description\""),
        "absent metadata must be left out of the form"
    );
}

#[tokio::test]
async fn share_returns_link_with_extractable_token() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-owner")).await;
    Mock::given(method("POST"))
        .and(path(format!("/contracts/{CONTRACT_ID}/share")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "share_url": "https://pactlens.example.com/shared/share-abc123",
            "expires_at": "2025-06-08T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let id = ContractId::from_str(CONTRACT_ID).unwrap();
    let link = ContractsApi::new(client).share(&id).await.unwrap();

    let token = share_token_from_url(&link.share_url).unwrap();
    assert_eq!(token.as_str(), "share-abc123");
}

#[tokio::test]
async fn unread_count_decodes() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-owner")).await;
    Mock::given(method("GET"))
        .and(path("/comments/unread-count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_comments": 7
        })))
        .mount(&server)
        .await;

    let count = ContractsApi::new(client).unread_count().await.unwrap();
    assert_eq!(count.total_comments, 7);
}

#[tokio::test]
async fn delete_succeeds_on_no_content() {
    let (server, client, _tokens) = common::setup_api_client(Some("tok-owner")).await;
    Mock::given(method("DELETE"))
        .and(path(format!("/contracts/{CONTRACT_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let id = ContractId::from_str(CONTRACT_ID).unwrap();
    ContractsApi::new(client).delete(&id).await.unwrap();
}
