//! export サブコマンド
//!
//! 管理画面のCSVダウンロードと同じ内容をファイルまたは標準出力に書き出します。

use crate::config;
use crate::db::migrations::initialize_database;
use crate::db::request_logs::RequestLogStorage;
use crate::export::export_csv;
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// export サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the export command
pub async fn execute(args: &ExportArgs) -> Result<(), anyhow::Error> {
    let pool = initialize_database(&config::database_url()).await?;
    let storage = RequestLogStorage::new(pool.clone());
    let body = export_csv(&storage).await?;
    pool.close().await;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} bytes to {}", body.len(), path.display());
        }
        None => {
            std::io::stdout()
                .write_all(&body)
                .context("Failed to write CSV to stdout")?;
        }
    }
    Ok(())
}
