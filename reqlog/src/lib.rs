//! API Request Logger
//!
//! 外向きHTTP呼び出しを記録し、一覧・CSV・JSONで参照するサーバー

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 外向きHTTP呼び出しのキャプチャ
pub mod capture;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// CSVエクスポート
pub mod export;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動
pub mod server;

use capture::{ObservedClient, RequestLogger};
use common::error::LogResult;
use db::request_logs::RequestLogStorage;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// リクエストログストレージ
    pub request_logs: Arc<RequestLogStorage>,
    /// ロガーを登録済みの共有HTTPクライアント
    pub http_client: ObservedClient,
    /// HTTPクライアント設定
    pub http_config: config::HttpClientConfig,
    /// 管理API用トークン（`None` なら認証なし）
    pub admin_token: Option<String>,
}

impl AppState {
    /// マイグレーション済みのプールから状態を組み立てる
    ///
    /// 共有HTTPクライアントには `RequestLogger` が登録される。
    pub fn new(
        db_pool: sqlx::SqlitePool,
        http_config: config::HttpClientConfig,
        admin_token: Option<String>,
    ) -> LogResult<Self> {
        let request_logs = Arc::new(RequestLogStorage::new(db_pool));
        let http_client = ObservedClient::from_config(&http_config)?
            .with_observer(Arc::new(RequestLogger::new(request_logs.clone())));

        Ok(Self {
            request_logs,
            http_client,
            http_config,
            admin_token,
        })
    }
}
