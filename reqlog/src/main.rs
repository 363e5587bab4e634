//! API request logger entry point

use clap::Parser;
use reqlog::cli::{Cli, Commands};
use reqlog::config::ServerConfig;
use reqlog::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => {
            logging::init()?;
            reqlog::cli::serve::execute(ServerConfig::from_args(args.host, args.port)).await
        }
        Some(Commands::Install) => {
            logging::init()?;
            reqlog::cli::lifecycle::install().await
        }
        Some(Commands::Uninstall) => {
            logging::init()?;
            reqlog::cli::lifecycle::uninstall().await
        }
        Some(Commands::Export(args)) => reqlog::cli::export::execute(&args).await,
        None => {
            // No subcommand - default to serve
            logging::init()?;
            reqlog::cli::serve::execute(ServerConfig::from_env()).await
        }
    }
}
