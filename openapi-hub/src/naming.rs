//! エンドポイント名の導出
//!
//! 設定されたURL一覧から、ルーティングと表示に使う短い一意名を作る。
//! ネットワークアクセスも状態も持たない純粋関数。

use crate::error::HubError;
use reqwest::Url;
use serde::Serialize;
use tracing::warn;

/// 名前 → URL の順序付きマップ（挿入順 = 設定順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameMap {
    entries: Vec<(String, String)>,
}

impl NameMap {
    /// 空のマップを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前からURLを取得
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }

    /// 名前が登録済みか
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// (名前, URL) を挿入順に返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 候補名を一意化して挿入し、確定した名前を返す
    fn insert_unique(&mut self, candidate: String, url: String) -> String {
        let mut name = candidate.clone();
        let mut counter = 1u32;
        while self.contains(&name) {
            name = format!("{}-{}", candidate, counter);
            counter += 1;
        }
        self.entries.push((name.clone(), url));
        name
    }
}

/// カンマ区切りの設定値をURL候補に分割する
///
/// 前後の空白は除去し、空要素は捨てる。
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// エンドポイントURLを検証してパースする
///
/// HTTP(S)以外のスキームは取得できないため拒否する。
pub fn parse_endpoint_url(raw: &str) -> Result<Url, HubError> {
    let url = Url::parse(raw).map_err(|e| HubError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HubError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// パース済みURLから候補名（一意化前）を作る
///
/// ホストのラベルが3つ以上なら最後のラベルだけを落とし、
/// それ以外は先頭ラベルのみを使う。パスの先頭セグメントがあれば
/// パーセントデコードして末尾に付ける。
pub fn candidate_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let labels: Vec<&str> = host.split('.').collect();

    let parts: Vec<&str> = if labels.len() > 2 {
        labels[..labels.len() - 1].to_vec()
    } else {
        labels.into_iter().take(1).collect()
    };

    let mut name = parts.join("-");

    // ルーティング時にデコードされたパスと一致させるため、デコード済みの値を使う
    if let Some(first) = url
        .path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()))
    {
        let segment = urlencoding::decode(first)
            .map(|decoded| decoded.replace('/', "-"))
            .unwrap_or_else(|_| first.to_string());
        if name.is_empty() {
            name = segment;
        } else {
            name = format!("{}-{}", name, segment);
        }
    }

    name
}

/// URL一覧から一意な名前を導出する
///
/// パースできないURLは警告ログを出してスキップし、残りの処理は続ける。
pub fn derive_names<I, S>(urls: I) -> NameMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = NameMap::new();

    for raw in urls {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            continue;
        }

        match parse_endpoint_url(raw) {
            Ok(url) => {
                map.insert_unique(candidate_name(&url), raw.to_string());
            }
            Err(e) => {
                warn!(url = %raw, error = %e, "Invalid URL skipped");
            }
        }
    }

    map
}
