//! エンドポイント型定義
//!
//! 1エンドポイントのライフサイクル（未取得 / 取得成功 / 取得失敗）を
//! 直和型で表現する。成功時のみドキュメントとRTTを保持する。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// ドキュメント形式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// application/json
    Json,
    /// application/yaml 系
    Yaml,
}

impl DocumentFormat {
    /// DocumentFormatを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// エンドポイントの状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EndpointStatus {
    /// 初期状態（取得未完了）
    #[default]
    #[serde(rename = "unknown")]
    Pending,
    /// 取得・解析に成功
    Up {
        /// 解析済みドキュメント
        document: Arc<Value>,
        /// 往復時間（ミリ秒）
        rtt_ms: f64,
    },
    /// 取得または解析に失敗
    Down,
}

impl EndpointStatus {
    /// 表示用ラベル（unknown / up / down）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "unknown",
            Self::Up { .. } => "up",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 1エンドポイント分のレコード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointRecord {
    /// ドキュメントURL（作成後は不変）
    pub url: String,
    /// 状態
    #[serde(flatten)]
    pub status: EndpointStatus,
}

impl EndpointRecord {
    /// 取得前のプレースホルダーを作成
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: EndpointStatus::Pending,
        }
    }

    /// 取得成功レコードを作成
    pub fn up(url: impl Into<String>, document: Value, rtt_ms: f64) -> Self {
        Self {
            url: url.into(),
            status: EndpointStatus::Up {
                document: Arc::new(document),
                rtt_ms: rtt_ms.max(0.0),
            },
        }
    }

    /// 取得失敗レコードを作成
    pub fn down(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: EndpointStatus::Down,
        }
    }

    /// 取得試行が完了しているか（成功・失敗を問わない）
    pub fn initialized(&self) -> bool {
        !matches!(self.status, EndpointStatus::Pending)
    }

    /// 取得成功しているか
    pub fn is_up(&self) -> bool {
        matches!(self.status, EndpointStatus::Up { .. })
    }

    /// 往復時間（成功時のみ）
    pub fn rtt_ms(&self) -> Option<f64> {
        match &self.status {
            EndpointStatus::Up { rtt_ms, .. } => Some(*rtt_ms),
            _ => None,
        }
    }

    /// 解析済みドキュメント（成功時のみ）
    pub fn document(&self) -> Option<&Arc<Value>> {
        match &self.status {
            EndpointStatus::Up { document, .. } => Some(document),
            _ => None,
        }
    }
}

/// 名前付きエンドポイント（レジストリの1要素）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedEndpoint {
    /// 導出された表示名（一意）
    pub name: String,
    /// レコード
    #[serde(flatten)]
    pub record: EndpointRecord,
}

impl NamedEndpoint {
    /// 新しい名前付きエンドポイントを作成
    pub fn new(name: impl Into<String>, record: EndpointRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}
