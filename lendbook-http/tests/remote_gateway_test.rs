//! Remote credential gateway against a mock credential service

use jsonwebtoken::{encode, EncodingKey, Header};
use lendbook_config::GatewayConfig;
use lendbook_http::{AuthGateway, Credentials, GatewayError, RemoteAuthGateway};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> RemoteAuthGateway {
    let config = GatewayConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(500),
        ..GatewayConfig::default()
    };
    RemoteAuthGateway::new(&config).unwrap()
}

fn upstream_token(role: &str) -> String {
    encode(
        &Header::default(),
        &json!({ "id": 7, "document": "20333444", "role": role }),
        &EncodingKey::from_secret(b"credential-service-key"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_successful_login() {
    let mock_server = MockServer::start().await;
    let token = upstream_token("ADMIN");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "document": "20333444", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "token": token })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = gateway_for(&mock_server)
        .login(&Credentials::new("20333444", "s3cret"))
        .await
        .unwrap();

    assert_eq!(session.identity.id, "7");
    assert_eq!(session.identity.document, "20333444");
    assert_eq!(session.identity.normalized_role(), "admin");
    assert_eq!(session.upstream_token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_rejection_surfaces_remote_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "statusCode": 401, "message": "Invalid credentials" })),
        )
        .mount(&mock_server)
        .await;

    let result = gateway_for(&mock_server)
        .login(&Credentials::new("20333444", "wrong"))
        .await;

    match result {
        Err(GatewayError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_without_body_uses_status_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let result = gateway_for(&mock_server)
        .login(&Credentials::new("20333444", "s3cret"))
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::Rejected { status: 403, ref message }) if message == "Forbidden"
    ));
}

#[tokio::test]
async fn test_missing_token_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&mock_server)
        .await;

    let result = gateway_for(&mock_server)
        .login(&Credentials::new("20333444", "s3cret"))
        .await;

    assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_slow_service_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": upstream_token("gerente") }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let result = gateway_for(&mock_server)
        .login(&Credentials::new("20333444", "s3cret"))
        .await;

    assert!(matches!(result, Err(GatewayError::Unavailable(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_unavailable() {
    let config = GatewayConfig {
        // Port 9 (discard) is closed on test hosts
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_millis(500),
        ..GatewayConfig::default()
    };
    let gateway = RemoteAuthGateway::new(&config).unwrap();

    let result = gateway.login(&Credentials::new("1", "1")).await;
    assert!(matches!(result, Err(GatewayError::Unavailable(_))));
}
