//! REST API / ページハンドラー
//!
//! - `/` 一覧、`/{name}` ドキュメント表示、`/404`、それ以外は`/404`へリダイレクト
//! - `/_hub/*` JSON API（状態一覧、再取得、レンダラー用ドキュメント取得）

pub mod endpoints;
pub mod error;
pub mod pages;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// レンダラーがドキュメントを取り直すパス
pub fn spec_path(name: &str) -> String {
    format!("/_hub/specs/{}", urlencoding::encode(name))
}

/// アプリケーションのルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/404", get(pages::not_found))
        .route("/:name", get(pages::endpoint_page))
        .route("/_hub/endpoints", get(endpoints::list_endpoints))
        .route("/_hub/endpoints/:name", get(endpoints::get_endpoint))
        .route("/_hub/refetch", post(endpoints::refetch))
        .route("/_hub/specs/:name", get(endpoints::get_spec))
        .fallback(pages::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
