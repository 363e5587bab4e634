//! ログ初期化
//!
//! 標準出力への人間向けログと、データディレクトリ配下への
//! JSONログ（日次ローテーション）を同時に出力する。

use crate::common::error::{LogResult, ReqlogError};
use crate::config::{data_dir, get_env_with_fallback};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "reqlog.jsonl";

const DEFAULT_LOG_LEVEL: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// ログ出力先ディレクトリ（`{data_dir}/logs`）
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

/// `REQLOG_LOG_LEVEL`（旧: `RUST_LOG`）からフィルタを作る。未設定・不正値は `info`
pub fn env_filter() -> EnvFilter {
    get_env_with_fallback("REQLOG_LOG_LEVEL", "RUST_LOG")
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// グローバルsubscriberを初期化する
///
/// 2回目以降の呼び出しはエラーになる。
pub fn init() -> LogResult<()> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).map_err(|e| {
        ReqlogError::Internal(format!(
            "Failed to create log directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().json().with_writer(file_writer))
        .try_init()
        .map_err(|e| ReqlogError::Internal(format!("Failed to initialize logging: {}", e)))?;

    // guardを保持しないとファイル出力がフラッシュされない
    let _ = LOG_GUARD.set(guard);

    tracing::debug!(dir = %dir.display(), "Logging initialized");
    Ok(())
}
