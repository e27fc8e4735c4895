//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

use crate::naming::parse_url_list;
use crate::transport::DEFAULT_FETCH_TIMEOUT_SECS;
use std::time::Duration;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use openapi_hub::config::get_env_with_fallback;
///
/// let urls = get_env_with_fallback("OPENAPI_HUB_URLS", "VITE_OPENAPI_URLS");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// デフォルトの待受ポート
pub const DEFAULT_PORT: u16 = 8080;

/// openapi-hub の実行設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// エンドポイントURL（設定順、未検証）
    pub urls: Vec<String>,
    /// バインドアドレス
    pub host: String,
    /// 待受ポート
    pub port: u16,
    /// 1リクエストのタイムアウト
    pub fetch_timeout: Duration,
    /// 定期再取得の間隔（Noneなら無効）
    pub refresh_interval: Option<Duration>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            refresh_interval: None,
        }
    }
}

impl HubConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `OPENAPI_HUB_URLS` が未設定の場合は旧名 `VITE_OPENAPI_URLS` を参照する。
    pub fn from_env() -> Self {
        let urls = get_env_with_fallback("OPENAPI_HUB_URLS", "VITE_OPENAPI_URLS")
            .map(|raw| parse_url_list(&raw))
            .unwrap_or_default();
        let host = get_env_with_fallback_or("OPENAPI_HUB_HOST", "HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("OPENAPI_HUB_PORT", "PORT", DEFAULT_PORT);
        let timeout_secs = get_env_with_fallback_parse(
            "OPENAPI_HUB_FETCH_TIMEOUT_SECS",
            "FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        );
        let refresh_secs = get_env_with_fallback_parse(
            "OPENAPI_HUB_REFRESH_INTERVAL_SECS",
            "REFRESH_INTERVAL_SECS",
            0u64,
        );

        Self {
            urls,
            host,
            port,
            fetch_timeout: Duration::from_secs(timeout_secs.max(1)),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        }
    }

    /// バインド先（host:port）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ログレベルを取得
///
/// 環境変数 `OPENAPI_HUB_LOG_LEVEL`（旧: `LOG_LEVEL`）から取得し、未設定なら `info`。
pub fn get_log_level() -> String {
    get_env_with_fallback_or("OPENAPI_HUB_LOG_LEVEL", "LOG_LEVEL", "info")
}
