//! 一覧・待機・エラーページ

use super::escape_html;
use crate::registry::RegistrySnapshot;
use crate::types::endpoint::EndpointStatus;
use chrono::{DateTime, Utc};

/// 状態インジケーターの色
pub fn status_color(status: &EndpointStatus) -> &'static str {
    match status {
        EndpointStatus::Up { .. } => "#28a745",
        EndpointStatus::Down => "#dc3545",
        EndpointStatus::Pending => "#6c757d",
    }
}

/// 経過時間を「N seconds ago」形式で返す
pub fn time_ago(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "never".to_string();
    };
    let diff = now.signed_duration_since(timestamp).num_seconds().max(0);

    if diff < 60 {
        format!("{} seconds ago", diff)
    } else if diff < 3600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86400 {
        format!("{} hours ago", diff / 3600)
    } else {
        format!("{} days ago", diff / 86400)
    }
}

const STYLE: &str = r#"<style>
body { font-family: Arial, sans-serif; max-width: 900px; margin: 2rem auto; color: #333; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card { display: block; padding: 1.25rem; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.2); color: inherit; text-decoration: none; }
.card.muted { background: #f0f0f0; }
.led { display: inline-block; width: 12px; height: 12px; border-radius: 50%; margin-right: .5rem; }
.rtt { color: #666; font-size: .9rem; margin-top: .25rem; }
</style>"#;

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

/// 一覧ページ
pub fn landing_page(snapshot: &RegistrySnapshot, now: DateTime<Utc>) -> String {
    let mut cards = String::new();
    for endpoint in &snapshot.endpoints {
        let status = &endpoint.record.status;
        let color = status_color(status);
        let rtt = endpoint
            .record
            .rtt_ms()
            .map(|rtt| format!("<div class=\"rtt\">RTT: {:.1} ms</div>", rtt))
            .unwrap_or_default();
        cards.push_str(&format!(
            "<a class=\"card{muted}\" href=\"/{href}\"><span class=\"led\" title=\"{label}\" style=\"background:{color};box-shadow:0 0 8px {color}\"></span><strong>{name}</strong>{rtt}</a>\n",
            muted = if endpoint.record.is_up() { "" } else { " muted" },
            href = escape_html(&urlencoding::encode(&endpoint.name)),
            label = status.as_str(),
            color = color,
            name = escape_html(&endpoint.name),
            rtt = rtt,
        ));
    }

    let body = format!(
        "<h1>OpenAPI Documentation</h1>\n<p>Select an API to view its documentation:</p>\n<div class=\"grid\">\n{cards}</div>\n<hr>\n<p class=\"rtt\">Last fetched: {ago} <button title=\"Refetch openapi specs\" onclick=\"fetch('/_hub/refetch',{{method:'POST'}}).then(function(){{setTimeout(function(){{location.reload()}},500)}})\">&#x21bb;</button></p>",
        cards = cards,
        ago = time_ago(snapshot.last_fetched, now),
    );
    page("OpenAPI Documentation", &body)
}

/// 取得完了待ちページ（数秒ごとに再読み込みする）
pub fn loading_page(name: &str) -> String {
    let body = format!(
        "<meta http-equiv=\"refresh\" content=\"2\">\n<p><a href=\"/\">&larr; All APIs</a></p>\n<p>Loading <strong>{}</strong>&hellip;</p>",
        escape_html(name)
    );
    page(name, &body)
}

/// 取得失敗ページ
pub fn unavailable_page(name: &str, url: &str) -> String {
    let body = format!(
        "<p><a href=\"/\">&larr; All APIs</a></p>\n<h1>{}</h1>\n<p>The OpenAPI document at <code>{}</code> is currently unavailable.</p>",
        escape_html(name),
        escape_html(url)
    );
    page(name, &body)
}

/// 404ページ
pub fn not_found_page() -> String {
    page(
        "Not Found",
        "<h1>404</h1>\n<p>No such API. <a href=\"/\">Back to the list</a></p>",
    )
}
