//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション・インストール/アンインストール
pub mod migrations;

/// 外向きリクエストログの保存・一覧・削除
pub mod request_logs;
