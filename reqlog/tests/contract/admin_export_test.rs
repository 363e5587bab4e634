//! Contract Test: GET /admin/api-request-logger?export_csv

use crate::support::app::{at, body_bytes, body_json, build_app, get, seed};
use axum::http::{header, StatusCode};

#[tokio::test]
async fn export_returns_csv_attachment() {
    let test = build_app().await;
    seed(&test.storage, "https://example.com/later", "GET", 200, at(50)).await;
    seed(&test.storage, "https://example.com/earlier", "post", 0, at(10)).await;

    let response = get(&test.app, "/admin/api-request-logger?export_csv=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=api-request-logs.csv"
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(
        text,
        "id,endpoint,method,response,time\n\
         1,https://example.com/later,GET,200,2024-06-01 00:00:50\n\
         2,https://example.com/earlier,post,0,2024-06-01 00:00:10\n"
    );
}

#[tokio::test]
async fn export_ignores_list_parameters() {
    let test = build_app().await;
    for i in 0..12 {
        seed(&test.storage, &format!("https://example.com/{i}"), "GET", 200, at(i)).await;
    }

    let response = get(
        &test.app,
        "/admin/api-request-logger?export_csv&paged=2&s=nothing-matches",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(text.lines().count(), 13);
}

#[tokio::test]
async fn export_of_empty_table_fails_visibly() {
    let test = build_app().await;

    let response = get(&test.app, "/admin/api-request-logger?export_csv=1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"], "No logs available to export.");
}
