//! ドキュメントキャッシュ
//!
//! URL → 最後に解析に成功したドキュメント。
//! レジストリが置き換わるたびに [`DocumentCache::derive`] で丸ごと作り直す（差分更新しない）。
//!
//! キャッシュは無効化世代（generation）を持つ。`invalidate()` は内容を空にして世代を進め、
//! `install()` は取得開始時の世代と一致する場合だけ内容を置き換える。
//! これにより、再取得要求より前に始まった取得パスの結果がキャッシュに戻ることはない。

use crate::types::endpoint::{EndpointStatus, NamedEndpoint};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 初期世代（最初の取得パスはこの世代で公開される）
pub const INITIAL_GENERATION: u64 = 1;

#[derive(Debug)]
struct CacheState {
    entries: HashMap<String, Arc<Value>>,
    generation: u64,
}

/// 共有ドキュメントキャッシュ
#[derive(Debug, Clone)]
pub struct DocumentCache {
    state: Arc<RwLock<CacheState>>,
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCache {
    /// 空のキャッシュを作成
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState {
                entries: HashMap::new(),
                generation: INITIAL_GENERATION,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// レジストリの内容からキャッシュ内容を導出する
    ///
    /// `Up` のレコードだけが対象。
    pub fn derive(endpoints: &[NamedEndpoint]) -> HashMap<String, Arc<Value>> {
        endpoints
            .iter()
            .filter_map(|endpoint| match &endpoint.record.status {
                EndpointStatus::Up { document, .. } => {
                    Some((endpoint.record.url.clone(), Arc::clone(document)))
                }
                _ => None,
            })
            .collect()
    }

    /// URLに対応するドキュメントを取得
    pub fn get(&self, url: &str) -> Option<Arc<Value>> {
        self.read().entries.get(url).cloned()
    }

    /// URLがキャッシュされているか
    pub fn contains(&self, url: &str) -> bool {
        self.read().entries.contains_key(url)
    }

    /// キャッシュ済みURL一覧（ソート済み）
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.read().entries.keys().cloned().collect();
        urls.sort();
        urls
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// 現在の世代
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// 内容を破棄して世代を進める
    ///
    /// 新しい世代を返す。
    pub fn invalidate(&self) -> u64 {
        let mut state = self.write();
        state.entries.clear();
        state.generation += 1;
        state.generation
    }

    /// 世代が一致する場合だけ内容を丸ごと置き換える
    ///
    /// 世代が進んでいた（取得中に無効化された）場合は何もせず`false`を返す。
    pub fn install(&self, generation: u64, entries: HashMap<String, Arc<Value>>) -> bool {
        let mut state = self.write();
        if state.generation != generation {
            return false;
        }
        state.entries = entries;
        true
    }
}
