//! データベースの初期化・インストール・アンインストール

use crate::common::error::{LogResult, ReqlogError};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/reqlog.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(ReqlogError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> LogResult<SqlitePool> {
    let pool = connect(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// マイグレーションを実行せずに接続だけ行う
///
/// データベースファイルとその親ディレクトリが存在しない場合は作成する。
pub async fn connect(database_url: &str) -> LogResult<SqlitePool> {
    ensure_parent_dir(database_url)?;

    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to check database: {}", e)))?
    {
        tracing::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| ReqlogError::Database(format!("Failed to create database: {}", e)))?;
    }

    SqlitePool::connect(database_url)
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to connect to database: {}", e)))
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// `api_request_logs` テーブルが存在しなければ作成する。
pub async fn run_migrations(pool: &SqlitePool) -> LogResult<()> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// ログテーブルを無条件に削除する（アンインストール）
///
/// バックアップやエクスポートは行わない。マイグレーション管理テーブルも
/// 併せて削除するため、再インストール時にはテーブルが作り直される。
pub async fn drop_tables(pool: &SqlitePool) -> LogResult<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to begin transaction: {}", e)))?;

    sqlx::query("DROP TABLE IF EXISTS api_request_logs")
        .execute(&mut *tx)
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to drop log table: {}", e)))?;

    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(&mut *tx)
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to drop migration table: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| ReqlogError::Database(format!("Failed to commit: {}", e)))?;

    tracing::info!("Dropped api_request_logs table");
    Ok(())
}

/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
fn ensure_parent_dir(database_url: &str) -> LogResult<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    // `sqlite::memory:` のような特殊指定はスキップ
    if path.starts_with(':') {
        return Ok(());
    }

    let normalized = path.trim_start_matches("//");
    let path_without_params = normalized.split('?').next().unwrap_or(normalized);
    if let Some(parent) = std::path::Path::new(path_without_params).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReqlogError::Internal(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
