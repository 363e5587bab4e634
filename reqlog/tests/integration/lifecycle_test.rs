//! Integration Test: install / uninstall against a file database

use reqlog::common::protocol::NewRequestLogEntry;
use reqlog::db::migrations::{connect, drop_tables, initialize_database};
use reqlog::db::request_logs::RequestLogStorage;
use serial_test::serial;

async fn table_exists(pool: &sqlx::SqlitePool) -> bool {
    sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name='api_request_logs'")
        .fetch_optional(pool)
        .await
        .unwrap()
        .is_some()
}

#[tokio::test]
async fn uninstall_then_reinstall_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("reqlog.db").display());

    let pool = initialize_database(&url).await.unwrap();
    let storage = RequestLogStorage::new(pool.clone());
    storage
        .insert(&NewRequestLogEntry::from_call("https://example.com", None, Some(200)))
        .await
        .unwrap();
    assert_eq!(storage.count().await.unwrap(), 1);

    drop_tables(&pool).await.unwrap();
    assert!(!table_exists(&pool).await);
    pool.close().await;

    let pool = initialize_database(&url).await.unwrap();
    assert!(table_exists(&pool).await);
    assert_eq!(RequestLogStorage::new(pool).count().await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn cli_install_and_uninstall_use_configured_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("reqlog.db");
    std::env::set_var("REQLOG_DATABASE_URL", format!("sqlite:{}", db_path.display()));

    reqlog::cli::lifecycle::install().await.unwrap();
    assert!(db_path.exists());

    let pool = connect(&format!("sqlite:{}", db_path.display())).await.unwrap();
    assert!(table_exists(&pool).await);

    reqlog::cli::lifecycle::uninstall().await.unwrap();
    assert!(!table_exists(&pool).await);

    pool.close().await;
    std::env::remove_var("REQLOG_DATABASE_URL");
}
