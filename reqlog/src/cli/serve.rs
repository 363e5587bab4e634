//! serve サブコマンド
//!
//! APIリクエストロガーサーバーを起動します。

use crate::config::{self, HttpClientConfig, ServerConfig};
use crate::db::migrations::initialize_database;
use crate::{server, AppState};
use clap::Args;
use tracing::info;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8080", env = "REQLOG_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "REQLOG_HOST")]
    pub host: String,
}

/// Run the server until a shutdown signal arrives.
///
/// The log table is created on startup if it does not exist yet.
pub async fn execute(server_config: ServerConfig) -> Result<(), anyhow::Error> {
    let database_url = config::database_url();
    info!("Using database {}", database_url);
    let pool = initialize_database(&database_url).await?;

    let admin_token = config::admin_token();
    if admin_token.is_none() {
        tracing::warn!("REQLOG_ADMIN_TOKEN is not set, admin API is unauthenticated");
    }

    let state = AppState::new(pool, HttpClientConfig::from_env(), admin_token)?;
    server::run(state, &server_config.bind_addr()).await?;
    Ok(())
}
