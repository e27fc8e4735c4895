//! HTMLページハンドラー

use crate::api::spec_path;
use crate::render::pages::{landing_page, loading_page, not_found_page, unavailable_page};
use crate::render::DocumentView;
use crate::types::endpoint::EndpointStatus;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;

/// GET /
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.registry.snapshot().await;
    Html(landing_page(&snapshot, Utc::now()))
}

/// GET /:name
///
/// 取得前は待機ページ、失敗時は503、成功時はレンダラーの出力を返す。
pub async fn endpoint_page(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(endpoint) = state.registry.get(&name).await else {
        return Redirect::to("/404").into_response();
    };

    match &endpoint.record.status {
        EndpointStatus::Pending => Html(loading_page(&endpoint.name)).into_response(),
        EndpointStatus::Down => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(unavailable_page(&endpoint.name, &endpoint.record.url)),
        )
            .into_response(),
        EndpointStatus::Up { document, .. } => {
            let spec_path = spec_path(&endpoint.name);
            let view = DocumentView {
                name: &endpoint.name,
                url: &endpoint.record.url,
                document,
                spec_path: &spec_path,
            };
            Html(state.renderer.render(&view)).into_response()
        }
    }
}

/// GET /404
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(not_found_page()))
}

/// 未定義パスは`/404`へ
pub async fn fallback() -> Redirect {
    Redirect::to("/404")
}
