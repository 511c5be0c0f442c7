use super::*;
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::state::test_helpers::test_app_state;

async fn call(method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app(test_app_state())
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    assert_eq!(call("GET", "/api/health").await, (StatusCode::OK, json!({"ok": true})));
}

#[tokio::test]
async fn key_routes_require_a_key() {
    assert_eq!(
        call("GET", "/api/master/me").await,
        (StatusCode::UNAUTHORIZED, json!({"error": "missing_master_key"}))
    );
    assert_eq!(
        call("POST", "/api/master/rotate").await,
        (StatusCode::UNAUTHORIZED, json!({"error": "missing_master_key"}))
    );
    assert_eq!(
        call("POST", "/api/cleanup").await,
        (StatusCode::UNAUTHORIZED, json!({"error": "missing_master_key"}))
    );
}

#[tokio::test]
async fn channel_routes_report_missing_key_as_invalid() {
    assert_eq!(
        call("GET", "/api/channel/general").await,
        (StatusCode::UNAUTHORIZED, json!({"error": "invalid_master_key"}))
    );
    assert_eq!(
        call("GET", "/api/channel/general/download/1?master_key=").await,
        (StatusCode::UNAUTHORIZED, json!({"error": "invalid_master_key"}))
    );
}

#[tokio::test]
async fn non_numeric_file_id_is_json_bad_request() {
    assert_eq!(
        call("GET", "/api/channel/general/download/abc").await,
        (StatusCode::BAD_REQUEST, json!({"error": "invalid_id"}))
    );
    assert_eq!(
        call("DELETE", "/api/channel/general/file/1x").await,
        (StatusCode::BAD_REQUEST, json!({"error": "invalid_id"}))
    );
}

#[tokio::test]
async fn unknown_api_path_is_json_not_found() {
    assert_eq!(call("GET", "/api/nope").await, (StatusCode::NOT_FOUND, json!({"error": "not_found"})));
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let (status, _) = call("GET", "/api/cleanup").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
