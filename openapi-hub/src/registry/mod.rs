//! エンドポイントレジストリ
//!
//! 名前 → エンドポイントレコードの現在のスナップショットを保持する。
//! 起動直後は取得前のプレースホルダーを同期的に返し、取得パスが完了するたびに
//! スナップショットを丸ごと置き換える（部分更新は公開しない）。
//!
//! # 再取得ポリシー
//!
//! 取得パスは同時に1つだけ実行する。各パスは開始時のキャッシュ世代を記録し、
//! 完了時には常にスナップショットを公開する。キャッシュへの反映は世代が
//! 変わっていない場合だけで、変わっていれば最新の世代に対して1回だけ再実行する。
//! 実行中に何回`refetch()`されても再実行は1回にまとまり、
//! 再取得が続いてもスナップショットはパスごとに更新される。

use crate::cache::DocumentCache;
use crate::fetcher::SpecFetcher;
use crate::naming::NameMap;
use crate::types::endpoint::{EndpointRecord, NamedEndpoint};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// 追い越されたパスの再実行回数の上限（1回の`load()`あたり）
const MAX_RERUNS: u32 = 1;

/// レジストリのスナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    /// 設定順のエンドポイント一覧
    pub endpoints: Vec<NamedEndpoint>,
    /// 最後に置き換えた時刻（プレースホルダーではNone）
    pub last_fetched: Option<DateTime<Utc>>,
    /// このスナップショットを作った取得パスのキャッシュ世代（プレースホルダーは0）
    pub generation: u64,
}

impl RegistrySnapshot {
    /// 名前でエンドポイントを探す
    pub fn get(&self, name: &str) -> Option<&NamedEndpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// 取得成功しているエンドポイント数
    pub fn up_count(&self) -> usize {
        self.endpoints.iter().filter(|e| e.record.is_up()).count()
    }

    /// 全エンドポイントの取得試行が完了しているか
    pub fn is_initialized(&self) -> bool {
        self.endpoints.iter().all(|e| e.record.initialized())
    }
}

struct Inner {
    names: NameMap,
    fetcher: SpecFetcher,
    cache: DocumentCache,
    snapshot: RwLock<Arc<RegistrySnapshot>>,
    /// 最後に公開したキャッシュ世代（0 = 未公開）
    published: AtomicU64,
    /// 取得パスの直列化
    pass: Mutex<()>,
}

/// エンドポイントレジストリ
#[derive(Clone)]
pub struct EndpointRegistry {
    inner: Arc<Inner>,
}

impl EndpointRegistry {
    /// 取得前のプレースホルダースナップショットを作る（ネットワークアクセスなし）
    pub fn initial(names: &NameMap) -> RegistrySnapshot {
        RegistrySnapshot {
            endpoints: names
                .iter()
                .map(|(name, url)| NamedEndpoint::new(name, EndpointRecord::pending(url)))
                .collect(),
            last_fetched: None,
            generation: 0,
        }
    }

    /// プレースホルダーを持つレジストリを作成
    ///
    /// 取得は行わない。`load()`を呼ぶまで全エンドポイントは未取得のまま。
    pub fn new(names: NameMap, fetcher: SpecFetcher, cache: DocumentCache) -> Self {
        let initial = Self::initial(&names);
        Self {
            inner: Arc::new(Inner {
                names,
                fetcher,
                cache,
                snapshot: RwLock::new(Arc::new(initial)),
                published: AtomicU64::new(0),
                pass: Mutex::new(()),
            }),
        }
    }

    /// 名前マップ
    pub fn names(&self) -> &NameMap {
        &self.inner.names
    }

    /// ドキュメントキャッシュ
    pub fn cache(&self) -> &DocumentCache {
        &self.inner.cache
    }

    /// 現在のスナップショット
    pub async fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.inner.snapshot.read().await.clone()
    }

    /// 名前でエンドポイントを取得
    pub async fn get(&self, name: &str) -> Option<NamedEndpoint> {
        self.snapshot().await.get(name).cloned()
    }

    /// 最後にスナップショットを置き換えた時刻
    pub async fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.snapshot().await.last_fetched
    }

    /// 再取得が要求され、まだ公開されていないか
    pub fn is_refetch_pending(&self) -> bool {
        self.inner.published.load(Ordering::SeqCst) < self.inner.cache.generation()
    }

    /// 現在のキャッシュ世代に対する取得結果を公開する
    ///
    /// 既にこの世代の結果が公開済みなら、取得せずに現在のスナップショットを返す。
    /// 実行中に再取得が要求された場合でも、完了したパスのスナップショットは公開する
    /// （キャッシュには入れない）。そのうえで最新の世代に対して1回だけ再実行する。
    pub async fn load(&self) -> Arc<RegistrySnapshot> {
        let mut wanted = self.inner.cache.generation();
        let mut reruns = 0u32;

        loop {
            let _pass = self.inner.pass.lock().await;

            if self.inner.published.load(Ordering::SeqCst) >= wanted {
                debug!(generation = wanted, "Discovery pass already published");
                return self.snapshot().await;
            }

            let generation = self.inner.cache.generation();
            let endpoints = self.inner.fetcher.fetch_all(&self.inner.names).await;
            let snapshot = Arc::new(RegistrySnapshot {
                endpoints,
                last_fetched: Some(Utc::now()),
                generation,
            });

            let mut current = self.inner.snapshot.write().await;
            let installed = self
                .inner
                .cache
                .install(generation, DocumentCache::derive(&snapshot.endpoints));
            *current = Arc::clone(&snapshot);
            self.inner.published.fetch_max(generation, Ordering::SeqCst);
            drop(current);

            info!(
                generation = generation,
                endpoints = snapshot.endpoints.len(),
                up = snapshot.up_count(),
                cached = installed,
                "Registry updated"
            );

            if installed || reruns >= MAX_RERUNS {
                return snapshot;
            }

            reruns += 1;
            wanted = self.inner.cache.generation();
            debug!(
                generation = generation,
                latest = wanted,
                "Discovery pass superseded by refetch, rerunning"
            );
        }
    }

    /// キャッシュを即座に無効化し、バックグラウンドで取得パスを起動する
    ///
    /// 返されたハンドルをawaitすると公開されたスナップショットが得られる。
    pub fn refetch(&self) -> JoinHandle<Arc<RegistrySnapshot>> {
        let generation = self.inner.cache.invalidate();
        info!(generation = generation, "Refetch requested, cache invalidated");

        let registry = self.clone();
        tokio::spawn(async move { registry.load().await })
    }
}
