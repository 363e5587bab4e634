//! 読み取り専用のログJSON API
//!
//! `GET /api-request-logger/v1/logs/` で全件を時刻の新しい順に返す。
//! 認証・ページネーション・フィルタは無し。

use super::error::AppError;
use crate::common::protocol::RequestLogEntry;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api-request-logger/v1/logs/
pub async fn list_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestLogEntry>>, AppError> {
    let entries = state.request_logs.load_all_newest_first().await?;
    Ok(Json(entries))
}
