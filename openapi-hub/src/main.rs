//! OpenAPI hub Entry Point

use clap::Parser;
use openapi_hub::cli::{check, names, serve, Cli, Commands};
use openapi_hub::config::HubConfig;
use openapi_hub::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = HubConfig::from_env();

    match cli.command {
        Some(Commands::Names(args)) => names::execute(&args, config),
        Some(Commands::Check(args)) => check::execute(&args, config).await,
        Some(Commands::Serve(args)) => serve::execute(&args, config).await,
        None => serve::execute(&serve::ServeArgs::default(), config).await,
    }
}
