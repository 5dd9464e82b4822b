//! End-to-end request/response scenarios against a mock Authware API.

use std::time::Duration;

use authware::{ErrorKind, Requester};
use authware::client::{Request, ResponseStatus};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{app, application_json, APP_ID};

#[tokio::test]
async fn initialize_application_decodes_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app"))
        .and(body_json(json!({"app_id": APP_ID})))
        .and(header("X-Authware-App-Version", "9.9.9"))
        .and(header_exists("X-Request-DateTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(application_json()))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server);
    let application = app.initialize_application().await.unwrap();
    assert_eq!(application.id.to_string(), APP_ID);
    assert_eq!(application.to_string(), "Integration (v9.9.9)");
}

#[tokio::test]
async fn bad_credentials_surface_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/auth"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": 1, "message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = app(&server).login("alice", "wrong").await.unwrap_err();
    match &err.kind {
        ErrorKind::Api { status, response } => {
            assert_eq!(*status, 401);
            assert_eq!(response.code, ResponseStatus::Error);
            assert_eq!(response.message.as_deref(), Some("Invalid credentials"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert!(!err.is_rate_limited());
    assert!(!err.is_update_required());
}

#[tokio::test]
async fn html_rate_limit_page_has_no_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/auth"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_string("<html><body>Too Many Requests</body></html>"),
        )
        .mount(&server)
        .await;

    let err = app(&server).login("alice", "pw").await.unwrap_err();
    match &err.kind {
        ErrorKind::RateLimited {
            retry_after,
            response,
        } => {
            assert_eq!(*retry_after, Duration::from_secs(30));
            assert!(response.is_none());
        }
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn json_rate_limit_carries_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/variables"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "5")
                .set_body_json(json!({"code": 1, "message": "Slow down"})),
        )
        .mount(&server)
        .await;

    let err = app(&server).application_variables(None).await.unwrap_err();
    assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
    assert_eq!(
        err.envelope().and_then(|e| e.message.as_deref()),
        Some("Slow down")
    );
}

#[tokio::test]
async fn update_required_carries_updater_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-Updater-URL", "https://example.com/update")
                .set_body_json(json!({"code": 7})),
        )
        .mount(&server)
        .await;

    let err = app(&server).initialize_application().await.unwrap_err();
    assert!(err.is_update_required());
    assert_eq!(err.update_url(), Some("https://example.com/update"));
}

#[tokio::test]
async fn update_required_without_header_is_missing_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"code": 7})))
        .mount(&server)
        .await;

    let err = app(&server).initialize_application().await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingHeader { status: 403, .. }));
}

#[tokio::test]
async fn unparsable_error_body_is_distinct_from_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = app(&server)
        .profile(&authware::Credential::bearer("T"))
        .await
        .unwrap_err();
    match &err.kind {
        ErrorKind::UnparsableErrorResponse { status, body } => {
            assert_eq!(*status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("Expected UnparsableErrorResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .and(header("Authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"who": "first"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .and(header("Authorization", "second-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"who": "second"})))
        .mount(&server)
        .await;

    let requester: Requester = app(&server).requester().clone();
    let first = requester.send::<serde_json::Value>(
        Request::get("user/profile").credential(authware::Credential::bearer("first")),
    );
    let second = requester.send::<serde_json::Value>(
        Request::get("user/profile").credential(authware::Credential::api_key("second-key")),
    );
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap()["who"], "first");
    assert_eq!(second.unwrap()["who"], "second");
}
