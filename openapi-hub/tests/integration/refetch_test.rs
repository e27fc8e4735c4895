//! Integration Test: 再取得とキャッシュ無効化
//!
//! refetchは即座にキャッシュを空にし、実行中の取得パスを追い越した場合は
//! 古い結果を捨てて最新の世代で公開する。

use crate::support::{hub_for, mount_json, mount_json_delayed, request_count};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// ロード後、キャッシュは取得成功したURLだけを持つ
#[tokio::test]
async fn test_cache_mirrors_up_endpoints_after_load() {
    let server = MockServer::start().await;
    mount_json(&server, "/pets.json", &json!({"openapi": "3.0.0"})).await;
    let up_url = format!("{}/pets.json", server.uri());
    let down_url = format!("{}/missing.json", server.uri());

    let hub = hub_for(&[up_url.clone(), down_url]);
    let snapshot = hub.registry.load().await;

    assert_eq!(snapshot.up_count(), 1);
    assert_eq!(hub.registry.cache().urls(), vec![up_url]);
}

/// refetch直後はキャッシュが空、完了後は新しいパスの内容になる
#[tokio::test]
async fn test_refetch_invalidates_then_repopulates() {
    let server = MockServer::start().await;
    mount_json_delayed(
        &server,
        "/openapi.json",
        &json!({"openapi": "3.0.0"}),
        Duration::from_millis(100),
    )
    .await;
    let url = format!("{}/openapi.json", server.uri());

    let hub = hub_for(&[url.clone()]);
    hub.registry.load().await;
    assert!(hub.registry.cache().contains(&url));

    let handle = hub.registry.refetch();
    assert!(hub.registry.cache().is_empty());
    assert!(hub.registry.is_refetch_pending());

    let snapshot = handle.await.unwrap();
    assert!(!hub.registry.is_refetch_pending());
    assert_eq!(snapshot.generation, hub.registry.cache().generation());
    assert!(hub.registry.cache().contains(&url));
    assert_eq!(request_count(&server).await, 2);
}

/// 連続したrefetchは1回の取得パスにまとまる
#[tokio::test]
async fn test_concurrent_refetches_coalesce() {
    let server = MockServer::start().await;
    mount_json(&server, "/openapi.json", &json!({"openapi": "3.0.0"})).await;

    let hub = hub_for(&[format!("{}/openapi.json", server.uri())]);
    hub.registry.load().await;

    let first = hub.registry.refetch();
    let second = hub.registry.refetch();
    let third = hub.registry.refetch();

    let a = first.await.unwrap();
    let b = second.await.unwrap();
    let c = third.await.unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&b, &c));
    assert_eq!(request_count(&server).await, 2);
}

/// 追い越されたパスはスナップショットだけ公開し、キャッシュには入れずに再実行する
#[tokio::test]
async fn test_superseded_pass_does_not_fill_cache() {
    let server = MockServer::start().await;
    mount_json_delayed(
        &server,
        "/openapi.json",
        &json!({"openapi": "3.0.0"}),
        Duration::from_millis(300),
    )
    .await;

    let hub = hub_for(&[format!("{}/openapi.json", server.uri())]);
    let initial = hub.registry.load().await;
    assert_eq!(initial.generation, 1);

    let stale = hub.registry.refetch();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let latest = hub.registry.refetch();

    // 追い越されたパスの完了後、再実行の完了前
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(hub.registry.snapshot().await.generation, 2);
    assert!(hub.registry.cache().is_empty());
    assert!(hub.registry.is_refetch_pending());

    let stale = stale.await.unwrap();
    let latest = latest.await.unwrap();

    assert_eq!(stale.generation, 3);
    assert!(Arc::ptr_eq(&stale, &latest));
    assert_eq!(hub.registry.snapshot().await.generation, 3);
    assert_eq!(hub.registry.cache().len(), 1);
    // 初回 + 追い越されたパス + 再実行
    assert_eq!(request_count(&server).await, 3);
}

/// 上流が変わらなければ再取得結果も同じ
#[tokio::test]
async fn test_refetch_is_idempotent() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/a.json",
        &json!({"openapi": "3.0.0", "info": {"title": "A"}}),
    )
    .await;
    let urls = vec![
        format!("{}/a.json", server.uri()),
        format!("{}/gone.json", server.uri()),
    ];

    let hub = hub_for(&urls);
    hub.registry.load().await;

    let summarize = |snapshot: &openapi_hub::registry::RegistrySnapshot| {
        snapshot
            .endpoints
            .iter()
            .map(|e| {
                (
                    e.name.clone(),
                    e.record.url.clone(),
                    e.record.status.as_str(),
                    e.record.document().map(|d| d.as_ref().clone()),
                )
            })
            .collect::<Vec<_>>()
    };

    let first = hub.registry.refetch().await.unwrap();
    let second = hub.registry.refetch().await.unwrap();

    assert_eq!(summarize(&first), summarize(&second));
    assert!(second.generation > first.generation);
}
