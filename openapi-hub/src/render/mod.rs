//! ドキュメントレンダラー境界
//!
//! 解析済みドキュメントを人間向けのAPIエクスプローラーとして描画する部分は外部コンポーネント。
//! ここではその入口（[`DocumentRenderer`]）と、Swagger UIを読み込むだけの最小実装を置く。
//!
//! レンダラーは`spec_path`から自分でドキュメントを取り直す。このパスは
//! キャッシュ透過トランスポート経由で応答するため、ネットワークへの再取得は起きない。

pub mod pages;

use serde_json::Value;

/// レンダラーに渡すビュー
#[derive(Debug, Clone, Copy)]
pub struct DocumentView<'a> {
    /// エンドポイント名
    pub name: &'a str,
    /// ドキュメントの取得元URL
    pub url: &'a str,
    /// 解析済みドキュメント
    pub document: &'a Value,
    /// レンダラーがドキュメントを取り直すためのパス
    pub spec_path: &'a str,
}

/// ドキュメントレンダラー
pub trait DocumentRenderer: Send + Sync {
    /// ビューをHTMLとして描画する
    fn render(&self, view: &DocumentView<'_>) -> String;
}

/// Swagger UI配布物のベースURL
const SWAGGER_UI_DIST: &str = "https://unpkg.com/swagger-ui-dist@5";

/// Swagger UIを読み込むだけのレンダラー
#[derive(Debug, Clone)]
pub struct SwaggerUiRenderer {
    asset_base: String,
}

impl Default for SwaggerUiRenderer {
    fn default() -> Self {
        Self {
            asset_base: SWAGGER_UI_DIST.to_string(),
        }
    }
}

impl SwaggerUiRenderer {
    /// アセットの配信元を指定して作成
    pub fn with_asset_base(asset_base: impl Into<String>) -> Self {
        Self {
            asset_base: asset_base.into(),
        }
    }
}

impl DocumentRenderer for SwaggerUiRenderer {
    fn render(&self, view: &DocumentView<'_>) -> String {
        let title = view
            .document
            .pointer("/info/title")
            .and_then(Value::as_str)
            .unwrap_or(view.name);
        // <script>内に埋め込むため、JSON文字列化したうえで "</" を分断する
        let spec_path = serde_json::to_string(view.spec_path)
            .unwrap_or_else(|_| "\"\"".to_string())
            .replace("</", "<\\/");

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="{base}/swagger-ui.css">
</head>
<body>
<p><a href="/">&larr; All APIs</a> &middot; <code>{url}</code></p>
<div id="swagger-ui"></div>
<script src="{base}/swagger-ui-bundle.js"></script>
<script>window.ui = SwaggerUIBundle({{ url: {spec_path}, dom_id: "#swagger-ui" }});</script>
</body>
</html>
"##,
            title = escape_html(title),
            base = escape_html(&self.asset_base),
            url = escape_html(view.url),
            spec_path = spec_path,
        )
    }
}

/// HTML特殊文字をエスケープする
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
