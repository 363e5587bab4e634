//! REST APIハンドラー
//!
//! 管理画面用API（一覧・CSV・一括削除）と読み取り専用のJSON APIを提供する。

use crate::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// 管理画面API
pub mod admin;

/// 管理API認証
pub mod auth;

/// エラーレスポンス
pub mod error;

/// ログJSON API
pub mod logs;

/// アプリケーションのルーターを作成
pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin/api-request-logger", get(admin::list_logs))
        .route(
            "/admin/api-request-logger/bulk-action",
            post(admin::bulk_action),
        )
        .route(
            "/admin/api-request-logger/logs/{id}",
            delete(admin::delete_log),
        )
        .route(
            "/admin/api-request-logger/test-request",
            post(admin::send_test_request),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_auth_middleware,
        ));

    Router::new()
        .route("/api-request-logger/v1/logs", get(logs::list_logs))
        .route("/api-request-logger/v1/logs/", get(logs::list_logs))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
