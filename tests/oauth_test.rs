//! Integration tests for the OAuth flow.

use eversign::{Client, ClientConfig, EversignError, OAuthTokenRequest};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(mock_server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: Some(format!("{}/api", mock_server.uri())),
        oauth_base_url: Some(format!("{}/oauth", mock_server.uri())),
        ..Default::default()
    }
}

fn token_request() -> OAuthTokenRequest {
    OAuthTokenRequest {
        client_id: "client_1".to_string(),
        client_secret: "secret_1".to_string(),
        code: "code_1".to_string(),
        state: "state_1".to_string(),
    }
}

#[tokio::test]
async fn test_authorization_url() {
    let client = Client::unauthenticated(ClientConfig::default()).unwrap();
    let url = client
        .oauth()
        .authorization_url("client_1", "state_1")
        .unwrap();
    assert_eq!(
        url,
        "https://eversign.com/oauth/authorize?client_id=client_1&state=state_1"
    );
}

#[tokio::test]
async fn test_request_token_and_switch_to_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("client_id=client_1"))
        .and(body_string_contains("client_secret=secret_1"))
        .and(body_string_contains("code=code_1"))
        .and(body_string_contains("state=state_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "access_token": "oauth_token"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/business"))
        .and(header("Authorization", "Bearer oauth_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "business_id": 7, "is_primary": 1 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = Client::unauthenticated(config(&mock_server)).unwrap();
    let token = client.oauth().request_token(&token_request()).await.unwrap();
    assert_eq!(token, "oauth_token");

    client.set_oauth_access_token(token).await.unwrap();
    assert_eq!(client.selected_business().unwrap().business_id, 7);
}

#[tokio::test]
async fn test_request_token_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "invalid code"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::unauthenticated(config(&mock_server)).unwrap();
    let err = client
        .oauth()
        .request_token(&token_request())
        .await
        .unwrap_err();
    match err {
        EversignError::OAuth(body) => assert!(body.contains("invalid code")),
        other => panic!("unexpected error: {other:?}"),
    }
}
