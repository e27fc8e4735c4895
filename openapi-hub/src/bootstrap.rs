//! 起動時の組み立て
//!
//! 設定から名前マップ・トランスポート・取得器・キャッシュ・レジストリを組み立てる。

use crate::cache::DocumentCache;
use crate::config::HubConfig;
use crate::error::HubResult;
use crate::fetcher::SpecFetcher;
use crate::naming::derive_names;
use crate::registry::EndpointRegistry;
use crate::transport::{ReqwestTransport, Transport};
use std::sync::Arc;
use tracing::{info, warn};

/// 組み立て済みのコンポーネント
#[derive(Clone)]
pub struct Hub {
    /// エンドポイントレジストリ（プレースホルダー状態）
    pub registry: EndpointRegistry,
    /// 上流（実ネットワーク）トランスポート
    pub upstream: Arc<dyn Transport>,
}

/// 設定からコンポーネントを組み立てる
///
/// ネットワークアクセスは行わない。
pub fn build(config: &HubConfig) -> HubResult<Hub> {
    let transport = ReqwestTransport::new(config.fetch_timeout)?;
    Ok(build_with_transport(config, Arc::new(transport)))
}

/// 任意のトランスポートでコンポーネントを組み立てる
pub fn build_with_transport(config: &HubConfig, upstream: Arc<dyn Transport>) -> Hub {
    let names = derive_names(&config.urls);
    if names.is_empty() {
        warn!("No valid OpenAPI endpoints configured (set OPENAPI_HUB_URLS)");
    } else {
        info!(
            configured = config.urls.len(),
            endpoints = names.len(),
            "Endpoints discovered"
        );
    }

    let fetcher = SpecFetcher::new(Arc::clone(&upstream));
    let registry = EndpointRegistry::new(names, fetcher, DocumentCache::new());

    Hub { registry, upstream }
}
