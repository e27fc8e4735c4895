//! serve サブコマンド
//!
//! ドキュメントサーバーを起動します。

use super::SourceArgs;
use crate::config::HubConfig;
use crate::refresh::AutoRefresher;
use crate::render::SwaggerUiRenderer;
use crate::{bootstrap, server, AppState};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Periodic refetch interval in seconds (0 disables)
    #[arg(long)]
    pub refresh_interval_secs: Option<u64>,

    /// Endpoint source
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ServeArgs {
    /// 環境変数の設定に引数を上書きする
    pub fn apply(&self, config: HubConfig) -> HubConfig {
        let mut config = self.source.apply(config);
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(secs) = self.refresh_interval_secs {
            config.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config
    }
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config: HubConfig) -> Result<(), anyhow::Error> {
    let config = args.apply(config);
    let hub = bootstrap::build(&config)?;

    // 初回取得はバックグラウンドで行い、その間はプレースホルダーを表示する
    let registry = hub.registry.clone();
    tokio::spawn(async move {
        registry.load().await;
    });

    if let Some(interval) = config.refresh_interval {
        AutoRefresher::new(hub.registry.clone(), interval).start();
    }

    let state = AppState::new(
        hub.registry,
        hub.upstream,
        Arc::new(SwaggerUiRenderer::default()),
    );

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting OpenAPI hub"
    );
    server::run(state, &config.bind_addr()).await?;
    Ok(())
}
