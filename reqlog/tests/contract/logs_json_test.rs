//! Contract Test: GET /api-request-logger/v1/logs/

use crate::support::app::{at, build_app, get, get_json, seed};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn logs_are_returned_newest_first() {
    let test = build_app().await;
    seed(&test.storage, "https://example.com/t2", "GET", 200, at(20)).await;
    seed(&test.storage, "https://example.com/t1", "POST", 201, at(30)).await;
    seed(&test.storage, "https://example.com/t3", "GET", 0, at(10)).await;

    let (status, body) = get_json(&test.app, "/api-request-logger/v1/logs/").await;
    assert_eq!(status, StatusCode::OK);

    let endpoints: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["endpoint"].as_str().unwrap())
        .collect();
    assert_eq!(
        endpoints,
        vec![
            "https://example.com/t1",
            "https://example.com/t2",
            "https://example.com/t3"
        ]
    );
}

#[tokio::test]
async fn log_entry_shape() {
    let test = build_app().await;
    let id = seed(&test.storage, "https://example.com/a", "DELETE", 404, at(5)).await;

    let (_, body) = get_json(&test.app, "/api-request-logger/v1/logs/").await;
    assert_eq!(
        body,
        json!([{
            "id": id,
            "endpoint": "https://example.com/a",
            "method": "DELETE",
            "response": 404,
            "time": "2024-06-01 00:00:05"
        }])
    );
}

#[tokio::test]
async fn trailing_slash_is_optional() {
    let test = build_app().await;
    seed(&test.storage, "https://example.com", "GET", 200, at(0)).await;

    let (status, body) = get_json(&test.app, "/api-request-logger/v1/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_table_returns_empty_array() {
    let test = build_app().await;
    let (status, body) = get_json(&test.app, "/api-request-logger/v1/logs/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn pagination_and_filter_params_are_ignored() {
    let test = build_app().await;
    for i in 0..15 {
        seed(&test.storage, &format!("https://example.com/{i}"), "GET", 200, at(i)).await;
    }

    let (_, body) = get_json(&test.app, "/api-request-logger/v1/logs/?paged=2&s=zzz").await;
    assert_eq!(body.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn missing_table_is_generic_server_error() {
    let test = build_app().await;
    reqlog::db::migrations::drop_tables(&test.db_pool).await.unwrap();

    let response = get(&test.app, "/api-request-logger/v1/logs/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = crate::support::app::body_json(response).await;
    assert_eq!(body["error"], "Database error");
}
