//! install / uninstall サブコマンド

use crate::config;
use crate::db::migrations::{connect, drop_tables, run_migrations};

/// ログテーブルを作成する（既に存在すれば何もしない）
pub async fn install() -> Result<(), anyhow::Error> {
    let pool = connect(&config::database_url()).await?;
    run_migrations(&pool).await?;
    pool.close().await;
    println!("api_request_logs table is ready");
    Ok(())
}

/// ログテーブルを削除する（記録済みのログも全て失われる）
pub async fn uninstall() -> Result<(), anyhow::Error> {
    let pool = connect(&config::database_url()).await?;
    drop_tables(&pool).await?;
    pool.close().await;
    println!("api_request_logs table dropped");
    Ok(())
}
