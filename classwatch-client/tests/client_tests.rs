//! HTTP-level tests for the client against a mock instance.

use classwatch_client::{AccountCredentials, ClientError, ProgressSource, Reauthorizing, Session};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials(server: &MockServer) -> AccountCredentials {
    AccountCredentials {
        instance: server.uri(),
        username: "parent@example.org".to_string(),
        password: "hunter2".to_string(),
    }
}

fn token_ok(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "access_token": token }))
}

fn graph_body() -> serde_json::Value {
    json!([
        {
            "member_id": 101,
            "first_name": "Alice",
            "classes": [
                {
                    "class_id": 7,
                    "class_name": "Stage 3",
                    "sessions_attended": 5,
                    "total_sessions": 10,
                    "next_session": "2026-08-12 16:30:00",
                    "sessions": [],
                    "competencies": {
                        "root": {
                            "id": "root",
                            "label": "Stage 3",
                            "children": [
                                {"id": "c1", "label": "Front crawl 10m"},
                                {"id": "c2", "label": "Back crawl 10m"}
                            ]
                        },
                        "completed": {"101": ["c1", "c2"]}
                    }
                }
            ]
        }
    ])
}

#[tokio::test]
async fn test_create_and_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .respond_with(token_ok("tok-1"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/members"))
        .and(query_param("expand", "classes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graph_body()))
        .mount(&server)
        .await;

    let mut session = Session::create(credentials(&server)).await.unwrap();
    let members = session.refresh().await.unwrap();

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].display_name(), "Alice");
    assert!((members[0].classes[0].progress_for(101) - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_create_with_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = Session::create(credentials(&server)).await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_create_against_non_instance() {
    // No mock for the auth path: wiremock answers 404
    let server = MockServer::start().await;

    let err = Session::create(credentials(&server)).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(matches!(err, ClientError::Http { status: 404 }));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .respond_with(token_ok("tok"))
        .mount(&server)
        .await;

    // First graph fetch is rejected as unauthenticated, the replay succeeds
    Mock::given(method("GET"))
        .and(path("/api/v1/members"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graph_body()))
        .mount(&server)
        .await;

    let session = Session::create(credentials(&server)).await.unwrap();
    let mut source = Reauthorizing::new(session);

    let members = source.refresh().await.unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .respond_with(token_ok("tok"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/members"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut session = Session::create(credentials(&server)).await.unwrap();
    let err = session.refresh().await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}
