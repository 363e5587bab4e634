//! テスト用アプリケーション構築ヘルパー

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use reqlog::common::protocol::NewRequestLogEntry;
use reqlog::config::HttpClientConfig;
use reqlog::db::request_logs::RequestLogStorage;
use reqlog::{api, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub storage: Arc<RequestLogStorage>,
    pub db_pool: sqlx::SqlitePool,
}

pub async fn build_app() -> TestApp {
    build_app_with(HttpClientConfig::default(), None).await
}

pub async fn build_app_with(http_config: HttpClientConfig, admin_token: Option<&str>) -> TestApp {
    let db_pool = reqlog::db::migrations::initialize_database("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    let state = AppState::new(
        db_pool.clone(),
        http_config,
        admin_token.map(str::to_string),
    )
    .expect("Failed to build app state");
    let storage = state.request_logs.clone();

    TestApp {
        app: api::create_app(state),
        storage,
        db_pool,
    }
}

pub fn at(secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::seconds(secs)
}

pub async fn seed(
    storage: &RequestLogStorage,
    endpoint: &str,
    method: &str,
    response: u16,
    time: NaiveDateTime,
) -> i64 {
    storage
        .insert(&NewRequestLogEntry {
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            response,
            time: Some(time),
        })
        .await
        .expect("Failed to seed log entry")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = get(app, uri).await;
    let status = response.status();
    (status, body_json(response).await)
}
