//! Contract Test: HTMLページとリダイレクト

use crate::support::{app_for, body_text, get, mount_json};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use serde_json::json;
use wiremock::MockServer;

/// 一覧ページには全エンドポイントのカードが並ぶ
#[tokio::test]
async fn test_landing_page_lists_endpoints() {
    let server = MockServer::start().await;
    mount_json(&server, "/pets.json", &json!({"openapi": "3.0.0"})).await;
    let (app, hub) = app_for(&[
        format!("{}/pets.json", server.uri()),
        format!("{}/broken.json", server.uri()),
    ]);
    let snapshot = hub.registry.load().await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("OpenAPI Documentation"));
    for endpoint in &snapshot.endpoints {
        assert!(html.contains(&format!("href=\"/{}\"", endpoint.name)));
    }
    assert!(html.contains("RTT: "));
    assert!(html.contains("/_hub/refetch"));
}

/// 取得成功したエンドポイントはレンダラーの出力
#[tokio::test]
async fn test_endpoint_page_renders_document() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/pets.json",
        &json!({"openapi": "3.0.0", "info": {"title": "Pet Store"}}),
    )
    .await;
    let (app, hub) = app_for(&[format!("{}/pets.json", server.uri())]);
    let snapshot = hub.registry.load().await;
    let name = &snapshot.endpoints[0].name;

    let response = get(&app, &format!("/{}", name)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>Pet Store</title>"));
    assert!(html.contains(&format!("/_hub/specs/{}", name)));
}

/// 取得失敗は503、取得前は待機ページ
#[tokio::test]
async fn test_endpoint_page_down_and_pending() {
    let server = MockServer::start().await;
    let (app, hub) = app_for(&[format!("{}/broken.json", server.uri())]);
    let name = hub.registry.snapshot().await.endpoints[0].name.clone();

    let response = get(&app, &format!("/{}", name)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Loading"));

    hub.registry.load().await;

    let response = get(&app, &format!("/{}", name)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(response).await.contains("currently unavailable"));
}

/// 未知の名前・深いパスは/404へリダイレクト
#[tokio::test]
async fn test_unknown_paths_redirect_to_not_found() {
    let server = MockServer::start().await;
    let (app, _hub) = app_for(&[format!("{}/pets.json", server.uri())]);

    for uri in ["/no-such-api", "/a/b/c"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/404");
    }

    let response = get(&app, "/404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("No such API"));
}

/// パーセントエンコードされたパス由来の名前でもページに到達できる
#[tokio::test]
async fn test_percent_encoded_name_is_routable() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/my%20api/openapi.json",
        &json!({"openapi": "3.0.0", "info": {"title": "Spaced"}}),
    )
    .await;
    let (app, hub) = app_for(&[format!("{}/my%20api/openapi.json", server.uri())]);
    let name = hub.registry.snapshot().await.endpoints[0].name.clone();
    assert!(name.ends_with("-my api"), "{}", name);
    let encoded = urlencoding::encode(&name).into_owned();

    let landing = body_text(get(&app, "/").await).await;
    assert!(landing.contains(&format!("href=\"/{}\"", encoded)));

    let response = get(&app, &format!("/{}", encoded)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Loading"));

    hub.registry.load().await;

    let response = get(&app, &format!("/{}", encoded)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&format!("/_hub/specs/{}", encoded)));

    let response = get(&app, &format!("/_hub/specs/{}", encoded)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
