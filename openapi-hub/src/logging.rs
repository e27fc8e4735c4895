//! ロギング初期化ユーティリティ

use crate::config::get_log_level;
use tracing_subscriber::EnvFilter;

/// tracing-subscriberを初期化する
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ `OPENAPI_HUB_LOG_LEVEL` を使う。
/// 既に初期化済みの場合はエラーを返す。
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(get_log_level()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
