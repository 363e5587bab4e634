//! Contract Test: admin token enforcement

use crate::support::app::{body_json, build_app_with, send};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use reqlog::config::HttpClientConfig;

const TOKEN: &str = "admin-secret";

fn admin_get(auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/admin/api-request-logger");
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn admin_requires_bearer_token_when_configured() {
    let test = build_app_with(HttpClientConfig::default(), Some(TOKEN)).await;

    let response = send(&test.app, admin_get(None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&test.app, admin_get(Some("Bearer wrong"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&test.app, admin_get(Some(TOKEN))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&test.app, admin_get(Some(&format!("Bearer {TOKEN}")))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn json_endpoint_stays_public() {
    let test = build_app_with(HttpClientConfig::default(), Some(TOKEN)).await;

    let response = send(
        &test.app,
        Request::builder()
            .uri("/api-request-logger/v1/logs/")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_is_open_without_token() {
    let test = build_app_with(HttpClientConfig::default(), None).await;
    let response = send(&test.app, admin_get(None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rejection_uses_shared_error_body() {
    let test = build_app_with(HttpClientConfig::default(), Some(TOKEN)).await;

    let response = send(&test.app, admin_get(Some("Bearer wrong"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Authentication failed");

    let response = send(&test.app, admin_get(None)).await;
    assert_eq!(body_json(response).await["error"], "Authentication failed");
}

#[tokio::test]
async fn token_is_compared_verbatim() {
    let test = build_app_with(HttpClientConfig::default(), Some(TOKEN)).await;

    let response = send(&test.app, admin_get(Some(&format!("Bearer  {TOKEN}")))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&test.app, admin_get(Some(&format!("Bearer {TOKEN}x")))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
