//! Mock API tests for tollgate-http.
//!
//! These tests use wiremock to stand in for the REST backend and check what
//! reaches the wire: credentials, bodies, and how responses are surfaced.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tollgate_core::error::Error;
use tollgate_core::{
    ApiUrl, Credentials, LoginFlow, LoginOutcome, MemoryStore, NewAccount, Pipeline,
    SessionService, UserDirectory, UserId, Username,
};
use tollgate_http::{ApiClient, HttpUserDirectory, ReqwestTransport};

/// API URL pointing at the mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn client(server: &MockServer, session: &SessionService) -> ApiClient {
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let pipeline = Pipeline::builder(transport)
        .with_session_auth(session.clone())
        .build();
    ApiClient::new(mock_api_url(server), pipeline)
}

fn session() -> SessionService {
    SessionService::new(Arc::new(MemoryStore::new()))
}

async fn mount_users(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "username": "alice", "password": "pw", "name": "Alice", "token": "T-alice" },
            { "id": "two", "username": "bob", "password": "pw", "token": 42 },
            { "id": 3, "username": "bob", "password": "pw", "birthDate": "1990-01-01" },
            { "id": 4, "username": "carol", "password": "pw", "token": "" }
        ])))
        .mount(server)
        .await;
}

// ============================================================================
// Directory lookups
// ============================================================================

#[tokio::test]
async fn find_matches_username_and_password() {
    let server = MockServer::start().await;
    mount_users(&server).await;

    let directory = HttpUserDirectory::new(client(&server, &session()));

    let alice = directory
        .find(&Credentials::new("alice", "pw"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alice.id, Some(UserId::from(1)));
    assert_eq!(alice.display_name(), "Alice");
    assert_eq!(alice.bearer_token().unwrap().as_str(), "T-alice");

    assert!(directory
        .find(&Credentials::new("alice", "wrong"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn malformed_rows_are_skipped() {
    let server = MockServer::start().await;
    mount_users(&server).await;

    let directory = HttpUserDirectory::new(client(&server, &session()));

    // The first bob row carries a numeric token and is skipped.
    let bob = directory
        .find(&Credentials::new("bob", "pw"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob.id, Some(UserId::from(3)));
    assert!(bob.token.is_none());
}

#[tokio::test]
async fn backend_errors_surface_as_protocol_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401).set_body_string("no session"))
        .mount(&server)
        .await;

    let directory = HttpUserDirectory::new(client(&server, &session()));
    let err = directory
        .find(&Credentials::new("alice", "pw"))
        .await
        .unwrap_err();

    match err {
        Error::Protocol(e) => {
            assert_eq!(e.status, 401);
            assert!(e.is_auth_error());
            assert_eq!(e.message.as_deref(), Some("no session"));
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn register_posts_untokened_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "username": "dave",
            "password": "pw",
            "name": "Dave",
            "token": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "username": "dave",
            "password": "pw",
            "name": "Dave",
            "token": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let directory = HttpUserDirectory::new(client(&server, &session()));
    let identity = directory
        .register(NewAccount {
            username: Username::new("dave").unwrap(),
            password: "pw".to_string(),
            name: Some("Dave".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(identity.id, Some(UserId::from(9)));
    assert!(identity.bearer_token().is_none());
}

// ============================================================================
// Credentials on the wire
// ============================================================================

#[tokio::test]
async fn login_then_requests_carry_bearer_token() {
    let server = MockServer::start().await;
    mount_users(&server).await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer T-alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session();
    let client = client(&server, &session);
    let flow = LoginFlow::new(Arc::new(HttpUserDirectory::new(client.clone())), session.clone());

    let outcome = flow.login(&Credentials::new("alice", "pw")).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Authenticated(_)));

    let body: serde_json::Value = client.get_json("profile").await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn anonymous_and_untokened_requests_carry_no_authorization() {
    let server = MockServer::start().await;
    mount_users(&server).await;

    let session = session();
    let client = client(&server, &session);
    let flow = LoginFlow::new(Arc::new(HttpUserDirectory::new(client.clone())), session.clone());

    // Anonymous lookup, then an untokened login followed by another lookup.
    let outcome = flow.login(&Credentials::new("carol", "pw")).await.unwrap();
    assert!(session.is_authenticated());
    assert_eq!(outcome.identity().unwrap().username.as_str(), "carol");

    let _: serde_json::Value = client.get_json("users").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert!(!request.headers.contains_key("authorization"));
    }
}

#[tokio::test]
async fn rejected_login_leaves_session_anonymous() {
    let server = MockServer::start().await;
    mount_users(&server).await;

    let session = session();
    let flow = LoginFlow::new(
        Arc::new(HttpUserDirectory::new(client(&server, &session))),
        session.clone(),
    );

    let outcome = flow.login(&Credentials::new("mallory", "pw")).await.unwrap();
    assert_eq!(outcome, LoginOutcome::Rejected);
    assert!(!session.is_authenticated());
}
