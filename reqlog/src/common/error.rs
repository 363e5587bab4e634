//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `ReqlogError`は`external_message()`と`status_code()`を提供し、
//! 内部情報を漏らさないHTTPエラーレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// リクエストロガーのエラー型
#[derive(Debug, Error)]
pub enum ReqlogError {
    /// ログエントリが存在しない
    #[error("Log entry not found: {0}")]
    EntryNotFound(i64),

    /// テーブルが空の状態でエクスポートが要求された
    #[error("No logs available to export.")]
    NothingToExport,

    /// データベースエラー
    #[error("Database error: {0}")]
    Database(String),

    /// HTTPクライアントエラー
    #[error("HTTP client error: {0}")]
    Http(String),

    /// 内部エラー
    #[error("Internal error: {0}")]
    Internal(String),

    /// 認証エラー
    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl ReqlogError {
    /// 外部クライアント向けの安全なメッセージ
    ///
    /// DBパスや呼び出し先URLは `Display` 側にだけ含め、サーバーログにのみ出力する。
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::EntryNotFound(_) => "Log entry not found",
            Self::NothingToExport => "No logs available to export.",
            Self::Database(_) => "Database error",
            Self::Http(_) => "Upstream request failed",
            Self::Internal(_) => "Internal server error",
            Self::Authentication(_) => "Authentication failed",
        }
    }

    /// 対応するHTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EntryNotFound(_) => StatusCode::NOT_FOUND,
            Self::NothingToExport => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

/// ストレージ層・API層で使う結果型
pub type LogResult<T> = Result<T, ReqlogError>;
