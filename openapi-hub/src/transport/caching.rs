//! キャッシュ透過トランスポート
//!
//! レンダラーは渡されたURLを自分で取り直すため、そのままでは同じドキュメントを
//! 二重に取得してしまう。このデコレータはキャッシュ済みURLへのGETを
//! 合成レスポンスで返し、それ以外は内側のトランスポートにそのまま渡す。

use super::{content_type_headers, HttpResponse, Transport};
use crate::cache::DocumentCache;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// 合成レスポンスのCache-Control
const CACHED_RESPONSE_CACHE_CONTROL: &str = "max-age=3600";

/// キャッシュを参照してから内側へ委譲するトランスポート
#[derive(Debug, Clone)]
pub struct CachingTransport<T> {
    inner: T,
    cache: DocumentCache,
}

impl<T: Transport> CachingTransport<T> {
    /// 内側のトランスポートとキャッシュから作成
    pub fn new(inner: T, cache: DocumentCache) -> Self {
        Self { inner, cache }
    }

    /// 参照しているキャッシュ
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// 内側のトランスポート
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

/// キャッシュ済みドキュメントから実レスポンスと同じ形のレスポンスを作る
pub fn cached_response(document: &Value) -> Result<HttpResponse, FetchError> {
    let body = serde_json::to_vec(document)?;
    let mut headers = content_type_headers("application/json");
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(CACHED_RESPONSE_CACHE_CONTROL),
    );
    Ok(HttpResponse::new(StatusCode::OK, headers, body))
}

#[async_trait]
impl<T: Transport> Transport for CachingTransport<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        if let Some(document) = self.cache.get(url) {
            debug!(url = %url, "Serving document from cache");
            return cached_response(&document);
        }
        self.inner.get(url).await
    }
}
