//! Retrieving article HTML from the web, local files and stdin.
//!
//! [`Fetcher`] performs one uncached GET per call through a pooled
//! `reqwest` client. It rejects non-success statuses and non-HTML content
//! types from the headers alone, and streams the body against a size cap so
//! an oversized response is never buffered whole.

use std::fs;
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE},
    redirect,
};
#[cfg(feature = "fetch")]
use url::Url;

#[cfg(feature = "fetch")]
use crate::NormalizedUrl;
use crate::{FolioError, Result};

const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent upstream.
    pub user_agent: String,
    /// Largest accepted response body.
    pub max_body_bytes: usize,
    /// Redirects followed before giving up.
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: concat!("Mozilla/5.0 (compatible; Folio/", env!("CARGO_PKG_VERSION"), "; reader view)")
                .to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_redirects: 10,
        }
    }
}

/// A successfully fetched HTML page.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Body decoded as UTF-8, invalid sequences replaced.
    pub html: String,
    /// The `Content-Type` header as sent.
    pub content_type: String,
    /// URL after redirects.
    pub final_url: Url,
    pub status: u16,
}

/// Fetches pages with a client built once and reused across requests.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl Fetcher {
    /// Builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Performs a single GET for `url`.
    ///
    /// # Errors
    ///
    /// - [`FolioError::UpstreamStatus`] for a non-2xx response
    /// - [`FolioError::NotHtml`] when `Content-Type` lacks `text/html`
    /// - [`FolioError::ContentTooLarge`] when the body exceeds the cap
    /// - [`FolioError::Timeout`] or [`FolioError::Network`] for transport failures
    pub async fn fetch(&self, url: &NormalizedUrl) -> Result<FetchedPage> {
        let mut response = self
            .client
            .get(url.url().clone())
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.to_ascii_lowercase().contains("text/html") {
            return Err(FolioError::NotHtml);
        }

        let limit = self.config.max_body_bytes;
        if response.content_length().is_some_and(|length| length > limit as u64) {
            return Err(FolioError::ContentTooLarge { limit });
        }

        let final_url = response.url().clone();
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.transport_error(e))? {
            if body.len() + chunk.len() > limit {
                return Err(FolioError::ContentTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url = %final_url, bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            html: String::from_utf8_lossy(&body).into_owned(),
            content_type,
            final_url,
            status: status.as_u16(),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> FolioError {
        if err.is_timeout() { FolioError::Timeout { timeout: self.config.timeout } } else { FolioError::from(err) }
    }
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(FolioError::FileNotFound(path_buf))
    } else {
        let bytes = fs::read(&path_buf)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
