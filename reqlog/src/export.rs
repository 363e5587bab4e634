//! CSVエクスポート
//!
//! テーブル全件を格納順でCSVに書き出す。ヘッダー行はエントリのフィールド名。

use crate::common::error::{LogResult, ReqlogError};
use crate::common::protocol::RequestLogEntry;
use crate::db::request_logs::RequestLogStorage;

/// ダウンロード時のファイル名
pub const CSV_FILENAME: &str = "api-request-logs.csv";

/// CSVレスポンスのContent-Type
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// `Content-Disposition` ヘッダーの値
pub fn content_disposition() -> String {
    format!("attachment; filename={}", CSV_FILENAME)
}

/// エントリ列をCSVにシリアライズする
///
/// 空の場合は `ReqlogError::NothingToExport` を返し、ファイルは生成しない。
pub fn write_csv(entries: &[RequestLogEntry]) -> LogResult<Vec<u8>> {
    if entries.is_empty() {
        return Err(ReqlogError::NothingToExport);
    }

    let mut csv_writer = csv::Writer::from_writer(vec![]);
    for entry in entries {
        csv_writer.serialize(entry).map_err(|err| {
            ReqlogError::Internal(format!("Failed to write CSV row: {}", err))
        })?;
    }

    csv_writer
        .into_inner()
        .map_err(|err| ReqlogError::Internal(format!("Failed to finalize CSV export: {}", err)))
}

/// ストレージの全件をCSVとして取得
pub async fn export_csv(storage: &RequestLogStorage) -> LogResult<Vec<u8>> {
    let entries = storage.load_all_storage_order().await?;
    let body = write_csv(&entries)?;
    tracing::info!(rows = entries.len(), bytes = body.len(), "Exported request logs as CSV");
    Ok(body)
}
