//! CLI module for openapi-hub
//!
//! Provides command-line interface for serving and inspecting endpoints.

pub mod check;
pub mod names;
pub mod serve;

use crate::config::HubConfig;
use crate::naming::parse_url_list;
use clap::{Args, Parser, Subcommand};

/// OpenAPI hub - Aggregated documentation viewer for OpenAPI endpoints
#[derive(Parser, Debug)]
#[command(name = "openapi-hub")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    OPENAPI_HUB_URLS                   Comma-separated OpenAPI document URLs
    OPENAPI_HUB_HOST                   Bind address (default: 0.0.0.0)
    OPENAPI_HUB_PORT                   Listen port (default: 8080)
    OPENAPI_HUB_FETCH_TIMEOUT_SECS     Per-request timeout (default: 10)
    OPENAPI_HUB_REFRESH_INTERVAL_SECS  Periodic refetch interval, 0 = off (default: 0)
    OPENAPI_HUB_LOG_LEVEL              Log level (default: info)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the documentation server (default)
    Serve(serve::ServeArgs),
    /// Print the derived endpoint names
    Names(names::NamesArgs),
    /// Fetch every endpoint once and print its status
    Check(check::CheckArgs),
}

/// エンドポイントURLの指定（全サブコマンド共通）
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Comma-separated OpenAPI document URLs (overrides OPENAPI_HUB_URLS)
    #[arg(long)]
    pub urls: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl SourceArgs {
    /// 環境変数の設定に引数を上書きする
    pub fn apply(&self, mut config: HubConfig) -> HubConfig {
        if let Some(raw) = &self.urls {
            config.urls = parse_url_list(raw);
        }
        if let Some(secs) = self.timeout_secs {
            config.fetch_timeout = std::time::Duration::from_secs(secs.max(1));
        }
        config
    }
}
