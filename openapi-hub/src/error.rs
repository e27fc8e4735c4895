//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `FetchError`は1エンドポイントの取得・解析失敗を表し、レジストリの外へは
//! 伝播しない（該当エンドポイントが`Down`になるだけ）。
//! `HubError`はHTTP層・CLI層で扱うエラー。

use reqwest::StatusCode;
use thiserror::Error;

/// ドキュメント取得エラー
#[derive(Debug, Error)]
pub enum FetchError {
    /// 接続できない（DNS、接続拒否など）
    #[error("Network error: {0}")]
    Network(String),

    /// タイムアウト
    #[error("Timeout: {0}")]
    Timeout(String),

    /// 成功以外のHTTPステータス
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// Content-Typeが未設定または未対応
    #[error("Unsupported spec format: {0}")]
    UnsupportedFormat(String),

    /// JSONとして解析できない
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAMLとして解析できない
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// 本文がUTF-8ではない
    #[error("Invalid UTF-8 body: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// 取得タスクが異常終了した
    #[error("Fetch task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status)
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// openapi-hub error type
#[derive(Debug, Error)]
pub enum HubError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Endpoint URL could not be used
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl {
        /// 設定された値
        url: String,
        /// 理由
        reason: String,
    },

    /// No endpoint with this name
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Endpoint exists but has no document
    #[error("Endpoint {0} is unavailable")]
    EndpointUnavailable(String),

    /// Document fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// I/O error (bind etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HubError {
    /// Returns a safe error message for external clients.
    ///
    /// Upstream URLs and parser output stay in the server logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration error",
            Self::InvalidUrl { .. } => "Invalid endpoint URL",
            Self::UnknownEndpoint(_) => "Endpoint not found",
            Self::EndpointUnavailable(_) => "Endpoint unavailable",
            Self::Fetch(_) => "Upstream document unavailable",
            Self::Io(_) => "Internal server error",
        }
    }
}

/// openapi-hub result type
pub type HubResult<T> = Result<T, HubError>;
