//! ログエントリのデータモデル
//!
//! ストレージ・JSON API・CSVエクスポートで共有する型を定義します。

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// メソッド未指定時に記録するHTTPメソッド
pub const DEFAULT_METHOD: &str = "GET";

/// トランスポート層で失敗した呼び出しに記録するステータス
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// `time`列の文字列表現（SQLiteの`CURRENT_TIMESTAMP`と同じ形式）
pub const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 記録済みの外向きHTTP呼び出し1件
///
/// フィールドの並びはCSVのヘッダー行とJSONのキー順になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLogEntry {
    /// 挿入時に採番される一意なID
    pub id: i64,
    /// 呼び出し先URL
    pub endpoint: String,
    /// HTTPメソッド（大文字）
    pub method: String,
    /// レスポンスのステータスコード（トランスポート失敗時は0）
    pub response: u16,
    /// 記録時刻（UTC）
    #[serde(with = "sql_datetime")]
    pub time: NaiveDateTime,
}

/// 挿入用のログエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequestLogEntry {
    /// 呼び出し先URL
    pub endpoint: String,
    /// HTTPメソッド
    pub method: String,
    /// ステータスコード
    pub response: u16,
    /// 記録時刻。`None`ならテーブルのデフォルト値を使う
    pub time: Option<NaiveDateTime>,
}

impl NewRequestLogEntry {
    /// 完了した呼び出しから挿入用エントリを組み立てる
    ///
    /// メソッドは大文字化し、未指定なら`GET`とする。
    /// `status`が`None`の場合はトランスポート失敗として`0`を記録する。
    pub fn from_call(endpoint: impl Into<String>, method: Option<&str>, status: Option<u16>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: normalize_method(method),
            response: status.unwrap_or(TRANSPORT_FAILURE_STATUS),
            time: Some(now_truncated()),
        }
    }
}

/// HTTPメソッドを正規化する
pub fn normalize_method(method: Option<&str>) -> String {
    match method.map(str::trim) {
        Some(m) if !m.is_empty() => m.to_ascii_uppercase(),
        _ => DEFAULT_METHOD.to_string(),
    }
}

/// 秒単位に切り詰めた現在時刻（UTC）
pub fn now_truncated() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// `YYYY-MM-DD HH:MM:SS`形式でシリアライズするserdeモジュール
pub mod sql_datetime {
    use super::SQL_DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// シリアライズ
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(SQL_DATETIME_FORMAT))
    }

    /// デシリアライズ
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, SQL_DATETIME_FORMAT).map_err(D::Error::custom)
    }
}
