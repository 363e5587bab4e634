//! 管理画面API
//!
//! 一覧（ソート・検索・ページネーション）、CSVダウンロード、
//! 一括削除、行単位の削除、テストリクエスト送信を提供する。

use super::error::AppError;
use crate::common::error::ReqlogError;
use crate::common::protocol::RequestLogEntry;
use crate::db::request_logs::{ListQuery, RequestLogStorage, SortColumn, SortOrder};
use crate::export;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 一括操作で唯一サポートするアクション
pub const BULK_DELETE_ACTION: &str = "delete";

/// テストリクエスト送信後の通知メッセージ
pub const TEST_REQUEST_NOTICE: &str = "Test API request sent!";

/// 一覧画面のクエリパラメーター
///
/// 値はすべて文字列で受け取り、不正値はデフォルトに丸める。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// ページ番号
    pub paged: Option<String>,
    /// ソート列
    pub orderby: Option<String>,
    /// ソート方向
    pub order: Option<String>,
    /// 検索語
    pub s: Option<String>,
    /// 指定されていればCSVをダウンロード
    pub export_csv: Option<String>,
}

impl ListParams {
    /// ストレージ用の一覧条件に変換
    pub fn to_query(&self) -> ListQuery {
        let page = self
            .paged
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        let orderby = self
            .orderby
            .as_deref()
            .and_then(SortColumn::parse)
            .unwrap_or_default();
        let search = self
            .s
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        ListQuery {
            page,
            orderby,
            order: SortOrder::parse(self.order.as_deref()),
            search,
        }
    }
}

/// 表示列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    /// 列キー
    pub key: &'static str,
    /// 見出し
    pub label: &'static str,
}

/// 一括操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkActionView {
    /// アクションキー
    pub key: &'static str,
    /// 表示名
    pub label: &'static str,
}

/// ページネーション情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 総件数
    pub total_items: usize,
    /// 1ページあたりの件数
    pub per_page: usize,
    /// 総ページ数
    pub total_pages: usize,
    /// 現在のページ
    pub current_page: usize,
}

/// 一覧画面のビューモデル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// 表示列（チェックボックス列を含む）
    pub columns: Vec<ColumnView>,
    /// ソート可能な列
    pub sortable: Vec<SortColumn>,
    /// ページ内の行
    pub items: Vec<RequestLogEntry>,
    /// ページネーション
    pub pagination: Pagination,
    /// 現在のソート列
    pub orderby: SortColumn,
    /// 現在のソート方向
    pub order: SortOrder,
    /// 現在の検索語
    pub s: Option<String>,
    /// 利用可能な一括操作
    pub bulk_actions: Vec<BulkActionView>,
}

fn columns() -> Vec<ColumnView> {
    vec![
        ColumnView {
            key: "cb",
            label: "<input type=\"checkbox\" />",
        },
        ColumnView {
            key: "endpoint",
            label: "Endpoint",
        },
        ColumnView {
            key: "method",
            label: "Method",
        },
        ColumnView {
            key: "response",
            label: "Response",
        },
        ColumnView {
            key: "time",
            label: "Time",
        },
    ]
}

/// リクエストパラメーターから一覧画面のビューモデルを組み立てる
pub async fn build_list_view(
    storage: &RequestLogStorage,
    params: &ListParams,
) -> Result<ListView, ReqlogError> {
    let query = params.to_query();
    let page = storage.list_page(&query).await?;

    Ok(ListView {
        columns: columns(),
        sortable: SortColumn::ALL.to_vec(),
        items: page.items,
        pagination: Pagination {
            total_items: page.total_items,
            per_page: page.per_page,
            total_pages: page.total_pages,
            current_page: page.current_page,
        },
        orderby: query.orderby,
        order: query.order,
        s: query.search,
        bulk_actions: vec![BulkActionView {
            key: BULK_DELETE_ACTION,
            label: "Delete selected",
        }],
    })
}

/// GET /admin/api-request-logger
///
/// `export_csv` が指定されていればCSVを返す。
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    if params.export_csv.is_some() {
        let body = export::export_csv(&state.request_logs).await?;
        return Ok(csv_response(body));
    }

    let view = build_list_view(&state.request_logs, &params).await?;
    Ok(Json(view).into_response())
}

fn csv_response(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export::CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, export::content_disposition()),
        ],
        body,
    )
        .into_response()
}

/// 一括操作リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct BulkActionRequest {
    /// アクション名
    #[serde(default)]
    pub action: Option<String>,
    /// 選択された行のID
    #[serde(rename = "bulk-delete", default)]
    pub bulk_delete: Vec<i64>,
}

/// 一括操作レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionResponse {
    /// 実行したアクション（無視した場合は `None`）
    pub action: Option<String>,
    /// 削除件数
    pub deleted: u64,
}

/// POST /admin/api-request-logger/bulk-action
pub async fn bulk_action(
    State(state): State<AppState>,
    Json(request): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, AppError> {
    if request.action.as_deref() != Some(BULK_DELETE_ACTION) || request.bulk_delete.is_empty() {
        return Ok(Json(BulkActionResponse {
            action: None,
            deleted: 0,
        }));
    }

    let deleted = state.request_logs.delete_many(&request.bulk_delete).await?;
    Ok(Json(BulkActionResponse {
        action: Some(BULK_DELETE_ACTION.to_string()),
        deleted,
    }))
}

/// DELETE /admin/api-request-logger/logs/{id}
pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.request_logs.delete(id).await? {
        return Err(ReqlogError::EntryNotFound(id).into());
    }
    info!(id, "Deleted request log entry");
    Ok(StatusCode::NO_CONTENT)
}

/// テストリクエストの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRequestResponse {
    /// 通知メッセージ
    pub notice: String,
    /// 呼び出したURL
    pub endpoint: String,
    /// 記録されたステータス（トランスポート失敗時は0）
    pub response: u16,
}

/// POST /admin/api-request-logger/test-request
///
/// 監視対象クライアント経由でGETを1回送り、ロガーに記録させる。
pub async fn send_test_request(
    State(state): State<AppState>,
) -> Json<TestRequestResponse> {
    let todo_id: u32 = rand::rng().random_range(1..=100);
    let endpoint = format!(
        "{}/todos/{}",
        state.http_config.test_request_base_url.trim_end_matches('/'),
        todo_id
    );

    let response = match state.http_client.get(&endpoint).await {
        Ok(response) => response.status().as_u16(),
        Err(e) => {
            tracing::warn!(endpoint = %endpoint, error = %e, "Test request failed");
            crate::common::protocol::TRANSPORT_FAILURE_STATUS
        }
    };

    Json(TestRequestResponse {
        notice: TEST_REQUEST_NOTICE.to_string(),
        endpoint,
        response,
    })
}
