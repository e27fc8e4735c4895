//! 定期再取得
//!
//! 設定された間隔ごとにレジストリの`refetch()`を呼ぶ。

use crate::registry::EndpointRegistry;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

/// 定期再取得タスク
#[derive(Clone)]
pub struct AutoRefresher {
    registry: EndpointRegistry,
    interval: Duration,
}

impl AutoRefresher {
    /// 新しい定期再取得タスクを作成
    pub fn new(registry: EndpointRegistry, interval: Duration) -> Self {
        Self { registry, interval }
    }

    /// 再取得間隔
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// バックグラウンドで開始
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.refresh_loop().await })
    }

    async fn refresh_loop(&self) {
        let mut timer = interval(self.interval);

        info!(
            interval_secs = self.interval.as_secs(),
            "Auto refresh started"
        );

        // `interval()` ticks immediately on the first call; the initial pass is
        // started separately, so wait a full interval first.
        timer.tick().await;

        loop {
            timer.tick().await;

            if let Err(e) = self.registry.refetch().await {
                error!("Auto refresh task failed: {}", e);
            }
        }
    }
}
