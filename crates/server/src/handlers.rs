//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{Html, IntoResponse};
use folio_core::{Reader, render_index, render_page};
use serde::Serialize;

/// Locks the page down to its own inline stylesheet and remote images/media.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; img-src * data:; media-src *; style-src 'unsafe-inline'; \
     base-uri 'none'; form-action 'self'; frame-ancestors 'none'";

const PAGE_HEADERS: [(HeaderName, &str); 4] = [
    (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::REFERRER_POLICY, "no-referrer"),
    (header::CACHE_CONTROL, "no-store"),
];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<Reader>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}

/// `GET /` landing form.
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, PAGE_HEADERS, Html(render_index()))
}

/// `GET /read?url=…` renders the article, or an error page, always with 200.
pub async fn read(State(state): State<AppState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let raw = query.as_deref().and_then(first_url_param);
    let outcome = state.reader.render(raw.as_deref()).await;

    (StatusCode::OK, PAGE_HEADERS, Html(render_page(&outcome)))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { healthy: true, version: env!("CARGO_PKG_VERSION").to_string() })
}

/// First `url` value of a query string. Later repeats are ignored.
fn first_url_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_url_param() {
        assert_eq!(first_url_param("url=a&url=b").as_deref(), Some("a"));
        assert_eq!(first_url_param("x=1&url=https%3A%2F%2Fex.com%2F").as_deref(), Some("https://ex.com/"));
        assert_eq!(first_url_param("url=").as_deref(), Some(""));
        assert_eq!(first_url_param("u=1"), None);
    }
}
