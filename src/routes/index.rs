// SPDX-License-Identifier: MIT

//! SPA shell.
//!
//! Serves the HTML that boots the client, with Open Graph metadata
//! templated per path so link previews work before any JavaScript runs.

use axum::{
    extract::State,
    http::Uri,
    response::Html,
};
use std::sync::Arc;

use crate::AppState;

struct PageMeta {
    title: String,
    description: String,
    image_url: String,
}

/// Metadata for a given path. Currently every path shares the default;
/// the lookup point exists so per-path previews can be added.
fn page_meta(app_origin: &str, _path: &str) -> PageMeta {
    PageMeta {
        title: "TEAMe".to_string(),
        description: "デジタル練習ノート".to_string(),
        image_url: format!("{}/assets/icon.png", app_origin),
    }
}

/// Serve the SPA shell.
pub async fn index_html(State(state): State<Arc<AppState>>, uri: Uri) -> Html<String> {
    Html(shell_html(&state.config.app_origin, uri.path()))
}

fn shell_html(app_origin: &str, path: &str) -> String {
    let meta = page_meta(app_origin, path);
    format!(
        r##"<!doctype html>
<html lang="ja">

<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width,initial-scale=1.0">
    <meta name="description" content="TEAMe デジタル練習ノート">
    <meta name="theme-color" content="#a7d86e">
    <title>TEAMe デジタル練習ノート</title>
    <link rel="icon" href="{origin}/assets/icon.png">
    <link rel="manifest" href="{origin}/manifest.json">
    <meta name="twitter:card" content="summary_large_image">
    <meta property="og:url" content="{origin}{path}">
    <meta property="og:title" content="{title}">
    <meta property="og:site_name" content="TEAMe">
    <meta property="og:description" content="{description}">
    <meta property="og:image" content="{image}">
    <script src="{origin}/main.js" defer></script>
    <style>
        html {{
            height: 100%;
        }}

        body {{
            margin: 0;
            height: 100%;
        }}
    </style>
</head>

<body>
    プログラムをダウンロード中……
    <noscript>
        TEAMeではJavaScriptを使用します。ブラウザの設定で有効にしてください。
    </noscript>
</body>

</html>
"##,
        origin = app_origin,
        path = escape_html(path),
        title = escape_html(&meta.title),
        description = escape_html(&meta.description),
        image = escape_html(&meta.image_url),
    )
}

/// Escape text for embedding in HTML attribute or element content.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#x27;"),
            '`' => escaped.push_str("&#x60;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
