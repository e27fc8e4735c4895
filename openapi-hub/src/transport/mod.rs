//! HTTPトランスポート
//!
//! ドキュメント取得に使うGETの抽象。実ネットワーク実装（reqwest）と、
//! キャッシュ済みドキュメントを返すデコレータ（[`caching::CachingTransport`]）を提供する。
//! グローバルなfetchを差し替える代わりに、このトレイトを注入する。

pub mod caching;

pub use caching::CachingTransport;

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// デフォルトのリクエストタイムアウト（秒）
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// 取得済みHTTPレスポンス
///
/// 本文は読み込み済みなので、`json()` / `text()` は何度でも呼べる。
/// 実ネットワークのレスポンスとキャッシュからの合成レスポンスで同じ型を使う。
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    /// 新しいレスポンスを作成
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// ステータスコード
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// 2xxかどうか
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// レスポンスヘッダー
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Content-Typeヘッダー（文字列として読めない場合はNone）
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// 本文（バイト列）
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// 本文をUTF-8文字列として取得
    pub fn text(&self) -> Result<String, FetchError> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// 本文をJSONとしてデシリアライズ
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// 本文を取り出す
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// ドキュメント取得用のGETトランスポート
#[async_trait]
pub trait Transport: Send + Sync {
    /// URLにGETリクエストを送り、本文まで読み込んだレスポンスを返す
    ///
    /// 成功以外のステータスもエラーにはせず、そのまま返す。
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url).await
    }
}

/// reqwestによる実ネットワーク実装
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// タイムアウト付きのクライアントで作成
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// 既存のクライアントを使って作成
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

/// Content-Typeヘッダーだけを持つヘッダーマップを作る
pub(crate) fn content_type_headers(content_type: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers
}
