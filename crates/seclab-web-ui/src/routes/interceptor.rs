//! Page that quietly fires background requests, so students can watch them
//! in an intercepting proxy, plus the endpoints catching that traffic.

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{ConnectInfo, State};
use axum::http::header::{self, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use bytes::Bytes;
use maud::{PreEscaped, html};
use tracing::info;

use super::Maud;
use crate::{LOG_TARGET, SharedState};

/// Custom header set by the page's `fetch` call.
pub const DEMO_HEADER: &str = "x-training-demo";

/// 1x1 transparent GIF.
const PIXEL_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff,
    0xff, 0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x01, 0x00, 0x2c, 0x00,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

const BACKGROUND_REQUESTS_JS: &str = r#"
  fetch('/track', {
    method: 'POST',
    headers: {
      'Content-Type': 'application/x-www-form-urlencoded',
      'X-Training-Demo': 'Burp-Should-See-Me'
    },
    body: 'event=pageview&path=/interceptor.html'
  }).catch(() => {});

  window.addEventListener('load', () => {
    setTimeout(() => document.getElementById('autopost').submit(), 400);
  });
"#;

pub async fn get_page(state: State<SharedState>) -> Maud {
    let cache_buster = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let content = html! {
        div ."card" {
            p { "This page performs a few background requests so you can intercept them:" }
            ol {
                li { "Fetch POST → " code { "/track" } " with a custom header" }
                li { "Silent image beacon → " code { "/pixel.gif" } }
                li { "Auto-submitted form POST → " code { "/submit" } }
            }
            p { "Open Burp's Proxy → HTTP history to observe these." }
        }
        form ."card" id="autopost" action="/submit" method="POST" {
            input type="hidden" name="username" value="student";
            input type="hidden" name="password" value="hunter2";
            p ."muted" { "Auto-posting demo credentials…" }
        }
        img alt="" src=(format!("/pixel.gif?rand={cache_buster}"))
            width="1" height="1"
            style="position:absolute;left:-9999px;top:-9999px";
        script { (PreEscaped(BACKGROUND_REQUESTS_JS)) }
    };

    Maud(state.render_html_page("Page 1 - Interceptor Demo", content))
}

pub async fn post_track(
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    info!(
        target: LOG_TARGET,
        %remote,
        demo_header = headers
            .get(DEMO_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        body = %String::from_utf8_lossy(&body),
        "Tracking beacon"
    );
    ([(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))], "ok")
}

pub async fn post_submit(state: State<SharedState>, headers: HeaderMap, body: Bytes) -> Maud {
    let fields = parse_submitted_body(&headers, &body);
    let pretty = serde_json::to_string_pretty(&fields).unwrap_or_default();

    info!(target: LOG_TARGET, fields = %fields, "Form submitted");

    let content = html! {
        p { "Form POST received. Burp should have recorded this request." }
        pre { (pretty) }
        p { a href="/interceptor.html" { "Back" } }
    };

    Maud(state.render_html_page("Submit Received", content))
}

pub async fn get_pixel() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/gif"))],
        PIXEL_GIF,
    )
}

/// Turn a submitted body into a JSON object for display.
///
/// Accepts JSON and url-encoded forms; anything unreadable becomes `{}`.
fn parse_submitted_body(headers: &HeaderMap, body: &[u8]) -> serde_json::Value {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json {
        return serde_json::from_slice(body)
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
    }

    let fields: serde_json::Map<String, serde_json::Value> = url::form_urlencoded::parse(body)
        .into_owned()
        .map(|(k, v)| (k, serde_json::Value::String(v)))
        .collect();
    serde_json::Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_becomes_object() {
        let headers = HeaderMap::new();

        let value = parse_submitted_body(&headers, b"username=student&password=hunter2");

        assert_eq!(
            value,
            serde_json::json!({ "username": "student", "password": "hunter2" })
        );
    }

    #[test]
    fn broken_json_becomes_empty_object() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        assert_eq!(
            parse_submitted_body(&headers, b"{not json"),
            serde_json::json!({})
        );
    }

    #[test]
    fn pixel_is_a_gif() {
        assert!(PIXEL_GIF.starts_with(b"GIF89a"));
        assert_eq!(PIXEL_GIF.last(), Some(&0x3b));
    }
}
