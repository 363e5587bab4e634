//! 外向きHTTP呼び出しのキャプチャ
//!
//! `ObservedClient` が呼び出し完了ごとに登録済みの `RequestObserver` へ通知し、
//! `RequestLogger` がそれを `api_request_logs` に1行として書き込む。

/// オブザーバー付きHTTPクライアント
pub mod client;

/// ログ書き込みオブザーバー
pub mod logger;

pub use client::{CompletedRequest, ObservedClient, RequestObserver};
pub use logger::{sanitize_endpoint, RequestLogger};
