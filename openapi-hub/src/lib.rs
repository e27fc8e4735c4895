//! OpenAPI hub
//!
//! 設定されたOpenAPIドキュメントのエンドポイントを取得・解析し、
//! エンドポイントごとのドキュメントビューアーと稼働状況（up/down、RTT）を提供する。

#![warn(missing_docs)]

/// REST API / ページハンドラー
pub mod api;

/// 起動時の組み立て
pub mod bootstrap;

/// ドキュメントキャッシュ
pub mod cache;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型
pub mod error;

/// ドキュメント取得
pub mod fetcher;

/// ロギング初期化ユーティリティ
pub mod logging;

/// エンドポイント名の導出
pub mod naming;

/// 定期再取得
pub mod refresh;

/// エンドポイントレジストリ
pub mod registry;

/// ドキュメントレンダラー
pub mod render;

/// axumサーバー
pub mod server;

/// HTTPトランスポート
pub mod transport;

/// 型定義
pub mod types;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// エンドポイントレジストリ
    pub registry: registry::EndpointRegistry,
    /// レンダラー経路で使うトランスポート（キャッシュ透過）
    pub transport: Arc<dyn transport::Transport>,
    /// ドキュメントレンダラー
    pub renderer: Arc<dyn render::DocumentRenderer>,
}

impl AppState {
    /// 上流トランスポートをレジストリのキャッシュでラップして状態を作る
    pub fn new(
        registry: registry::EndpointRegistry,
        upstream: Arc<dyn transport::Transport>,
        renderer: Arc<dyn render::DocumentRenderer>,
    ) -> Self {
        let transport = transport::CachingTransport::new(upstream, registry.cache().clone());
        Self {
            registry,
            transport: Arc::new(transport),
            renderer,
        }
    }
}
