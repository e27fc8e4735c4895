//! エンドポイント状態API

use super::error::AppError;
use crate::error::HubError;
use crate::transport::Transport;
use crate::types::endpoint::NamedEndpoint;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

/// 一覧用のエンドポイント概要（ドキュメント本体は含まない）
#[derive(Debug, Serialize)]
pub struct EndpointSummary {
    /// 表示名
    pub name: String,
    /// ドキュメントURL
    pub url: String,
    /// unknown / up / down
    pub status: &'static str,
    /// 取得試行が完了しているか
    pub initialized: bool,
    /// 往復時間（ミリ秒）
    pub rtt_ms: Option<f64>,
}

impl From<&NamedEndpoint> for EndpointSummary {
    fn from(endpoint: &NamedEndpoint) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.record.url.clone(),
            status: endpoint.record.status.as_str(),
            initialized: endpoint.record.initialized(),
            rtt_ms: endpoint.record.rtt_ms(),
        }
    }
}

/// エンドポイント一覧レスポンス
#[derive(Debug, Serialize)]
pub struct EndpointListResponse {
    /// 最後にレジストリを置き換えた時刻
    pub last_fetched: Option<DateTime<Utc>>,
    /// 再取得の公開待ちか
    pub refetch_pending: bool,
    /// エンドポイント一覧（設定順）
    pub endpoints: Vec<EndpointSummary>,
}

/// GET /_hub/endpoints
pub async fn list_endpoints(State(state): State<AppState>) -> Json<EndpointListResponse> {
    let snapshot = state.registry.snapshot().await;

    Json(EndpointListResponse {
        last_fetched: snapshot.last_fetched,
        refetch_pending: state.registry.is_refetch_pending(),
        endpoints: snapshot.endpoints.iter().map(EndpointSummary::from).collect(),
    })
}

/// GET /_hub/endpoints/:name
pub async fn get_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<NamedEndpoint>, AppError> {
    let endpoint = state
        .registry
        .get(&name)
        .await
        .ok_or(HubError::UnknownEndpoint(name))?;
    Ok(Json(endpoint))
}

/// POST /_hub/refetch
///
/// キャッシュを即座に無効化し、取得パスをバックグラウンドで開始する。
pub async fn refetch(State(state): State<AppState>) -> impl IntoResponse {
    // 完了は待たない（ハンドルを捨ててもタスクは継続する）
    drop(state.registry.refetch());

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "accepted",
            "generation": state.registry.cache().generation(),
        })),
    )
}

/// GET /_hub/specs/:name
///
/// レンダラーによるドキュメント再取得。キャッシュ透過トランスポートを通すため、
/// キャッシュ済みならネットワークには出ない。
pub async fn get_spec(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let endpoint = state
        .registry
        .get(&name)
        .await
        .ok_or_else(|| HubError::UnknownEndpoint(name.clone()))?;

    if !endpoint.record.is_up() {
        return Err(HubError::EndpointUnavailable(name).into());
    }

    let upstream = state
        .transport
        .get(&endpoint.record.url)
        .await
        .map_err(HubError::from)?;

    let mut builder = Response::builder().status(upstream.status());
    for header in [CONTENT_TYPE, CACHE_CONTROL] {
        if let Some(value) = upstream.headers().get(&header) {
            builder = builder.header(header, value.clone());
        }
    }

    builder
        .body(Body::from(upstream.into_body()))
        .map_err(|e| AppError(HubError::Config(e.to_string())))
}
