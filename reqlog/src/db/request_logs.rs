//! 外向きリクエストログのストレージ層
//!
//! SQLiteの `api_request_logs` テーブルへの書き込み・一覧・削除を担う。

use crate::common::{
    error::{LogResult, ReqlogError},
    protocol::{NewRequestLogEntry, RequestLogEntry, SQL_DATETIME_FORMAT},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// 一覧画面の1ページあたりの件数
pub const PER_PAGE: usize = 10;

/// リクエストログストレージ（SQLite版）
#[derive(Clone)]
pub struct RequestLogStorage {
    pool: SqlitePool,
}

impl RequestLogStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// エントリを1件挿入し、採番されたIDを返す
    pub async fn insert(&self, entry: &NewRequestLogEntry) -> LogResult<i64> {
        let result = match entry.time {
            Some(time) => {
                sqlx::query(
                    "INSERT INTO api_request_logs (endpoint, method, response, time) VALUES (?, ?, ?, ?)",
                )
                .bind(&entry.endpoint)
                .bind(&entry.method)
                .bind(i64::from(entry.response))
                .bind(time.format(SQL_DATETIME_FORMAT).to_string())
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "INSERT INTO api_request_logs (endpoint, method, response) VALUES (?, ?, ?)",
                )
                .bind(&entry.endpoint)
                .bind(&entry.method)
                .bind(i64::from(entry.response))
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e| ReqlogError::Database(format!("Failed to save log entry: {}", e)))?;

        Ok(result.last_insert_rowid())
    }

    /// IDでエントリを取得
    pub async fn get(&self, id: i64) -> LogResult<Option<RequestLogEntry>> {
        let row = sqlx::query_as::<_, RequestLogRow>(
            "SELECT id, endpoint, method, response, time FROM api_request_logs WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to load log entry: {}", e)))?;

        row.map(RequestLogEntry::try_from).transpose()
    }

    /// 総件数を取得
    pub async fn count(&self) -> LogResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM api_request_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to count log entries: {}", e)))?;
        Ok(count as usize)
    }

    /// 全件を格納順（ID昇順）で読み込む（CSVエクスポート用）
    pub async fn load_all_storage_order(&self) -> LogResult<Vec<RequestLogEntry>> {
        self.load_all("SELECT id, endpoint, method, response, time FROM api_request_logs ORDER BY id ASC")
            .await
    }

    /// 全件を時刻降順で読み込む（JSON API用）
    pub async fn load_all_newest_first(&self) -> LogResult<Vec<RequestLogEntry>> {
        self.load_all(
            "SELECT id, endpoint, method, response, time FROM api_request_logs ORDER BY time DESC, id DESC",
        )
        .await
    }

    async fn load_all(&self, sql: &str) -> LogResult<Vec<RequestLogEntry>> {
        let rows = sqlx::query_as::<_, RequestLogRow>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to load log entries: {}", e)))?;

        rows.into_iter().map(RequestLogEntry::try_from).collect()
    }

    /// ソート・検索・ページネーションを適用して1ページ分を取得
    ///
    /// ソート列は `SortColumn` の許可リストから選ばれるため、SQLに
    /// 呼び出し元の文字列が入ることはない。
    pub async fn list_page(&self, query: &ListQuery) -> LogResult<LogPage> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let where_clause = if search.is_some() {
            "WHERE endpoint LIKE ? ESCAPE '\\' OR method LIKE ? ESCAPE '\\'"
        } else {
            ""
        };

        // 総件数を取得
        let count_sql = format!("SELECT COUNT(*) FROM api_request_logs {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &search {
            count_query = count_query.bind(pattern).bind(pattern);
        }
        let total_items = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to count log entries: {}", e)))?
            as usize;

        let page = query.page.max(1);
        let offset = page_offset(page);
        let order = query.order.as_sql();
        let data_sql = format!(
            "SELECT id, endpoint, method, response, time FROM api_request_logs {} \
             ORDER BY {} {}, id {} LIMIT ? OFFSET ?",
            where_clause,
            query.orderby.as_sql(),
            order,
            order,
        );

        let mut data_query = sqlx::query_as::<_, RequestLogRow>(&data_sql);
        if let Some(pattern) = &search {
            data_query = data_query.bind(pattern).bind(pattern);
        }
        data_query = data_query.bind(PER_PAGE as i64).bind(offset);
        let rows = data_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to query log entries: {}", e)))?;

        let items: LogResult<Vec<RequestLogEntry>> =
            rows.into_iter().map(RequestLogEntry::try_from).collect();

        Ok(LogPage {
            items: items?,
            total_items,
            per_page: PER_PAGE,
            total_pages: total_pages(total_items),
            current_page: page,
        })
    }

    /// 指定IDのエントリを1文でまとめて削除し、削除件数を返す
    pub async fn delete_many(&self, ids: &[i64]) -> LogResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM api_request_logs WHERE {}",
            build_in_clause("id", ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to delete log entries: {}", e)))?;

        tracing::info!(
            requested = ids.len(),
            deleted = result.rows_affected(),
            "Bulk deleted request log entries"
        );
        Ok(result.rows_affected())
    }

    /// 1件削除。存在しなかった場合は `false`
    pub async fn delete(&self, id: i64) -> LogResult<bool> {
        let result = sqlx::query("DELETE FROM api_request_logs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to delete log entry: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }
}

/// 総ページ数（`ceil(total / PER_PAGE)`）
pub fn total_pages(total_items: usize) -> usize {
    total_items.div_ceil(PER_PAGE)
}

/// ページ番号からOFFSETを求める（SQLiteが受け付ける `i64::MAX` で頭打ち）
fn page_offset(page: usize) -> i64 {
    let offset = page.saturating_sub(1).saturating_mul(PER_PAGE);
    i64::try_from(offset).unwrap_or(i64::MAX)
}

fn build_in_clause(column: &str, count: usize) -> String {
    let placeholders = std::iter::repeat_n("?", count)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{column} IN ({placeholders})")
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// ソート可能な列（許可リスト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// 呼び出し先URL
    Endpoint,
    /// HTTPメソッド
    Method,
    /// ステータスコード
    Response,
    /// 記録時刻
    #[default]
    Time,
}

impl SortColumn {
    /// 一覧画面でソート可能な全列
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Endpoint,
        SortColumn::Method,
        SortColumn::Response,
        SortColumn::Time,
    ];

    /// 列名。許可リスト外の入力は `None`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "endpoint" => Some(Self::Endpoint),
            "method" => Some(Self::Method),
            "response" => Some(Self::Response),
            "time" => Some(Self::Time),
            _ => None,
        }
    }

    /// SQLに埋め込む列名
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Endpoint => "endpoint",
            Self::Method => "method",
            Self::Response => "response",
            Self::Time => "time",
        }
    }
}

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// 昇順
    Asc,
    /// 降順
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc`（大文字小文字を問わない）のときだけ昇順、それ以外は降順
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// SQLキーワード
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 一覧取得の条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// ページ番号（1始まり）
    pub page: usize,
    /// ソート列
    pub orderby: SortColumn,
    /// ソート方向
    pub order: SortOrder,
    /// 検索語（エンドポイント・メソッドの部分一致）
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            orderby: SortColumn::Time,
            order: SortOrder::Desc,
            search: None,
        }
    }
}

/// 一覧の1ページ分とページネーション情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogPage {
    /// ページ内のエントリ
    pub items: Vec<RequestLogEntry>,
    /// 条件に一致する総件数
    pub total_items: usize,
    /// 1ページあたりの件数
    pub per_page: usize,
    /// 総ページ数
    pub total_pages: usize,
    /// 現在のページ番号
    pub current_page: usize,
}

/// SQLiteから取得した行データ
#[derive(sqlx::FromRow)]
struct RequestLogRow {
    id: i64,
    endpoint: String,
    method: String,
    response: i64,
    time: NaiveDateTime,
}

impl TryFrom<RequestLogRow> for RequestLogEntry {
    type Error = ReqlogError;

    fn try_from(row: RequestLogRow) -> Result<Self, Self::Error> {
        let response = u16::try_from(row.response).map_err(|e| {
            ReqlogError::Database(format!("Invalid response code {}: {}", row.response, e))
        })?;

        Ok(RequestLogEntry {
            id: row.id,
            endpoint: row.endpoint,
            method: row.method,
            response,
            time: row.time,
        })
    }
}
