//! Integration Test: 取得パス（SpecFetcher + ReqwestTransport）
//!
//! Content-Typeによる形式判定と、エンドポイント単位の失敗分離を確認する。

use crate::support::{hub_for, mount_json, mount_json_delayed, mount_raw};
use openapi_hub::cache::DocumentCache;
use openapi_hub::fetcher::SpecFetcher;
use openapi_hub::naming::derive_names;
use openapi_hub::transport::ReqwestTransport;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

fn fetcher() -> SpecFetcher {
    SpecFetcher::new(Arc::new(
        ReqwestTransport::new(Duration::from_secs(5)).unwrap(),
    ))
}

/// 200 + application/json → up
#[tokio::test]
async fn test_json_endpoint_is_up() {
    let server = MockServer::start().await;
    mount_json(&server, "/openapi.json", &json!({"openapi": "3.0.0"})).await;

    let names = derive_names([format!("{}/openapi.json", server.uri())]);
    let endpoints = fetcher().fetch_all(&names).await;

    assert_eq!(endpoints.len(), 1);
    let record = &endpoints[0].record;
    assert_eq!(record.status.as_str(), "up");
    assert_eq!(
        record.document().map(|d| d.as_ref().clone()),
        Some(json!({"openapi": "3.0.0"}))
    );
    assert!(record.rtt_ms().unwrap() >= 0.0);
}

/// 500 → down（ドキュメント・RTTなし）
#[tokio::test]
async fn test_server_error_is_down() {
    let server = MockServer::start().await;
    mount_raw(&server, "/openapi.json", 500, "application/json", "{}").await;

    let names = derive_names([format!("{}/openapi.json", server.uri())]);
    let endpoints = fetcher().fetch_all(&names).await;

    let record = &endpoints[0].record;
    assert_eq!(record.status.as_str(), "down");
    assert!(record.initialized());
    assert!(record.document().is_none());
    assert!(record.rtt_ms().is_none());
}

/// text/plain → down（本文がJSONでも未対応形式）
#[tokio::test]
async fn test_text_plain_is_unsupported() {
    let server = MockServer::start().await;
    mount_raw(
        &server,
        "/openapi.json",
        200,
        "text/plain",
        r#"{"openapi":"3.0.0"}"#,
    )
    .await;

    let names = derive_names([format!("{}/openapi.json", server.uri())]);
    let endpoints = fetcher().fetch_all(&names).await;

    assert_eq!(endpoints[0].record.status.as_str(), "down");
}

/// YAML系のメディアタイプはYAMLとして解析される
#[tokio::test]
async fn test_yaml_media_types_are_parsed() {
    let server = MockServer::start().await;
    let yaml = "openapi: 3.1.0\ninfo:\n  title: Pets\n  version: '1.0'\npaths: {}\n";
    for (route, mime) in [
        ("/a.yaml", "application/yaml"),
        ("/b.yaml", "application/x-yaml"),
        ("/c.yaml", "text/yaml"),
    ] {
        mount_raw(&server, route, 200, mime, yaml).await;
    }

    let names = derive_names([
        format!("{}/a.yaml", server.uri()),
        format!("{}/b.yaml", server.uri()),
        format!("{}/c.yaml", server.uri()),
    ]);
    let endpoints = fetcher().fetch_all(&names).await;

    assert_eq!(endpoints.len(), 3);
    for endpoint in &endpoints {
        assert!(endpoint.record.is_up(), "{} should be up", endpoint.name);
        let document = endpoint.record.document().unwrap();
        assert_eq!(document["info"]["title"], "Pets");
    }
}

/// 壊れたYAMLはdown
#[tokio::test]
async fn test_invalid_yaml_is_down() {
    let server = MockServer::start().await;
    mount_raw(&server, "/spec", 200, "application/yaml", "openapi: [unclosed").await;

    let names = derive_names([format!("{}/spec", server.uri())]);
    let endpoints = fetcher().fetch_all(&names).await;

    assert_eq!(endpoints[0].record.status.as_str(), "down");
}

/// 遅い・落ちているエンドポイントがあっても他の結果は揃い、順序は設定順
#[tokio::test]
async fn test_failures_are_isolated_and_order_is_preserved() {
    let server = MockServer::start().await;
    mount_json_delayed(
        &server,
        "/slow",
        &json!({"openapi": "3.0.0", "info": {"title": "slow"}}),
        Duration::from_millis(200),
    )
    .await;
    mount_json(&server, "/fast", &json!({"openapi": "3.0.0", "info": {"title": "fast"}})).await;

    let names = derive_names([
        format!("{}/slow", server.uri()),
        "http://127.0.0.1:9/unreachable".to_string(),
        format!("{}/fast", server.uri()),
    ]);
    let endpoints = fetcher().fetch_all(&names).await;

    let statuses: Vec<&str> = endpoints
        .iter()
        .map(|e| e.record.status.as_str())
        .collect();
    assert_eq!(statuses, vec!["up", "down", "up"]);
    assert_eq!(endpoints[0].record.document().unwrap()["info"]["title"], "slow");
    assert_eq!(endpoints[2].record.document().unwrap()["info"]["title"], "fast");
}

/// 同じURLが2回設定されても両方の名前で取得される
#[tokio::test]
async fn test_duplicate_urls_each_get_a_record() {
    let server = MockServer::start().await;
    mount_json(&server, "/openapi.json", &json!({"openapi": "3.0.0"})).await;
    let url = format!("{}/openapi.json", server.uri());

    let hub = hub_for(&[url.clone(), url.clone()]);
    let snapshot = hub.registry.load().await;

    assert_eq!(snapshot.endpoints.len(), 2);
    assert_ne!(snapshot.endpoints[0].name, snapshot.endpoints[1].name);
    assert_eq!(snapshot.up_count(), 2);
    assert_eq!(hub.registry.cache().urls(), vec![url]);

    // キャッシュは常にレジストリから導出される
    assert_eq!(
        hub.registry.cache().len(),
        DocumentCache::derive(&snapshot.endpoints).len()
    );
}
