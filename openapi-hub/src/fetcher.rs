//! OpenAPIドキュメント取得
//!
//! 名前 → URL のマップを受け取り、全エンドポイントを並列に取得・解析する。
//! 1エンドポイントの失敗（ネットワーク、HTTPステータス、形式、解析）は
//! そのエンドポイントを`Down`にするだけで、他の取得には影響しない。

use crate::error::FetchError;
use crate::naming::NameMap;
use crate::transport::Transport;
use crate::types::endpoint::{DocumentFormat, EndpointRecord, NamedEndpoint};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// YAMLとして扱うメディアタイプ
const YAML_MEDIA_TYPES: [&str; 4] = [
    "application/yaml",
    "application/x-yaml",
    "text/yaml",
    "text/x-yaml",
];

/// Content-Typeからドキュメント形式を判定する
///
/// パラメータ（`; charset=utf-8`など）は無視する。判定できなければ`None`。
pub fn detect_format(content_type: Option<&str>) -> Option<DocumentFormat> {
    let content_type = content_type?.to_ascii_lowercase();

    if content_type.contains("application/json") {
        Some(DocumentFormat::Json)
    } else if YAML_MEDIA_TYPES.iter().any(|t| content_type.contains(t)) {
        Some(DocumentFormat::Yaml)
    } else {
        None
    }
}

/// 本文を指定形式で解析する
///
/// YAMLはマージキーを展開したうえでJSON値に変換する。数値キー（`200:`など）は文字列キーになる。
pub fn parse_document(format: DocumentFormat, body: &[u8]) -> Result<Value, FetchError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_slice(body)?),
        DocumentFormat::Yaml => {
            let text = String::from_utf8(body.to_vec())?;
            let mut value: serde_yaml::Value = serde_yaml::from_str(&text)?;
            // `<<: *anchor` のマージキーを展開する
            value.apply_merge()?;
            Ok(serde_json::to_value(value)?)
        }
    }
}

/// ドキュメント取得器
#[derive(Clone)]
pub struct SpecFetcher {
    transport: Arc<dyn Transport>,
}

impl SpecFetcher {
    /// トランスポートを指定して作成
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 全エンドポイントを並列に取得する
    ///
    /// すべての取得が完了してから、名前マップと同じ順序で結果を返す。
    pub async fn fetch_all(&self, names: &NameMap) -> Vec<NamedEndpoint> {
        if names.is_empty() {
            info!("No endpoints to fetch");
            return Vec::new();
        }

        info!(count = names.len(), "Starting discovery pass");

        let handles = names.iter().map(|(_, url)| {
            let fetcher = self.clone();
            let url = url.to_string();
            tokio::spawn(async move { fetcher.fetch_one(&url).await })
        });
        let results = join_all(handles).await;

        let mut endpoints = Vec::with_capacity(results.len());
        let mut up = 0usize;

        for ((name, url), result) in names.iter().zip(results) {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    error!(endpoint_name = %name, url = %url, error = %e, "Fetch task join error");
                    EndpointRecord::down(url)
                }
            };
            if record.is_up() {
                up += 1;
            }
            endpoints.push(NamedEndpoint::new(name, record));
        }

        info!(
            up = up,
            down = endpoints.len() - up,
            "Discovery pass completed"
        );

        endpoints
    }

    /// 単一エンドポイントを取得する
    ///
    /// 失敗はすべて`Down`レコードに変換され、エラーとしては返らない。
    pub async fn fetch_one(&self, url: &str) -> EndpointRecord {
        match self.try_fetch(url).await {
            Ok((document, rtt_ms)) => {
                debug!(url = %url, rtt_ms = rtt_ms, "Fetched OpenAPI document");
                EndpointRecord::up(url, document, rtt_ms)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching or processing OpenAPI document");
                EndpointRecord::down(url)
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<(Value, f64), FetchError> {
        let start = Instant::now();
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let rtt_ms = start.elapsed().as_secs_f64() * 1000.0;

        let format = detect_format(response.content_type()).ok_or_else(|| {
            FetchError::UnsupportedFormat(
                response
                    .content_type()
                    .unwrap_or("missing Content-Type")
                    .to_string(),
            )
        })?;

        let document = parse_document(format, response.bytes())?;
        Ok((document, rtt_ms))
    }
}
