//! End-to-end rendering: raw input in, reader fragment or rejection out.
//!
//! The stages run strictly in order: normalize, fetch, extract, absolutize,
//! sanitize, strip presentation. Any failure ends the request as a
//! [`RenderOutcome::Rejected`]; nothing is retried and nothing is cached.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{NormalizedUrl, render_html};
//!
//! let url = NormalizedUrl::parse("https://example.com/post").unwrap();
//! let article = render_html(r#"<main class="x"><a href="/next" onclick="go()">Next</a></main>"#, &url);
//!
//! assert!(article.html.contains(r#"href="https://example.com/next""#));
//! assert!(!article.html.contains("onclick"));
//! assert!(!article.html.contains("class="));
//! ```

use serde::Serialize;

use crate::absolutize::absolutize;
use crate::extract::{ExtractionStrategyKind, Extractor};
use crate::normalize::NormalizedUrl;
use crate::presentation::strip_presentation;
use crate::readability::ReadabilityConfig;
use crate::sanitize::{SanitizerStrength, sanitize};

#[cfg(feature = "fetch")]
use crate::Result;
#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, Fetcher};
#[cfg(feature = "fetch")]
use crate::normalize::normalize;
#[cfg(feature = "fetch")]
use tracing::Instrument;

/// A sanitized article ready to embed in a reader page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedArticle {
    pub source_url: String,
    pub title: Option<String>,
    /// Final fragment: absolute links, sanitized, presentation stripped.
    pub html: String,
    pub strategy: ExtractionStrategyKind,
    pub sanitizer: SanitizerStrength,
}

/// Why a request produced no article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Input could not be normalized. No request was made.
    InvalidUrl { received: Option<String> },
    /// Fetching failed; `reason` is user-facing.
    Failed { source_url: String, reason: String },
}

/// The two terminal states of a render.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Rendered(RenderedArticle),
    Rejected(Rejection),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    pub fn article(&self) -> Option<&RenderedArticle> {
        match self {
            RenderOutcome::Rendered(article) => Some(article),
            RenderOutcome::Rejected(_) => None,
        }
    }

    /// Short user-facing description of a rejection.
    pub fn error_message(&self) -> Option<String> {
        match self {
            RenderOutcome::Rendered(_) => None,
            RenderOutcome::Rejected(Rejection::InvalidUrl { .. }) => Some("Invalid or missing URL.".to_string()),
            RenderOutcome::Rejected(Rejection::Failed { reason, .. }) => {
                Some(format!("Failed to render article: {reason}"))
            }
        }
    }
}

/// Settings for a [`Reader`].
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    #[cfg(feature = "fetch")]
    pub fetch: FetchConfig,
    pub readability: ReadabilityConfig,
}

impl ReaderConfig {
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::new()
    }
}

/// Fluent builder for [`ReaderConfig`].
///
/// # Example
///
/// ```rust
/// use folio_core::ReaderConfig;
///
/// let config = ReaderConfig::builder()
///     .timeout(10)
///     .max_body_bytes(1024 * 1024)
///     .char_threshold(400)
///     .build();
///
/// assert_eq!(config.fetch.timeout, 10);
/// assert_eq!(config.readability.char_threshold, 400);
/// ```
#[derive(Debug, Default)]
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upstream request timeout in seconds.
    #[cfg(feature = "fetch")]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    #[cfg(feature = "fetch")]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    /// Sets the response body cap in bytes.
    #[cfg(feature = "fetch")]
    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.config.fetch.max_body_bytes = bytes;
        self
    }

    #[cfg(feature = "fetch")]
    pub fn max_redirects(mut self, redirects: usize) -> Self {
        self.config.fetch.max_redirects = redirects;
        self
    }

    /// Minimum readability score before falling back to structural matching.
    pub fn min_score(mut self, score: f64) -> Self {
        self.config.readability.min_score = score;
        self
    }

    /// Minimum readability text length before falling back to structural matching.
    pub fn char_threshold(mut self, chars: usize) -> Self {
        self.config.readability.char_threshold = chars;
        self
    }

    pub fn readability(mut self, readability: ReadabilityConfig) -> Self {
        self.config.readability = readability;
        self
    }

    pub fn build(self) -> ReaderConfig {
        self.config
    }
}

/// Runs stages 3 through 6 on already-fetched HTML with the default extractor.
pub fn render_html(html: &str, url: &NormalizedUrl) -> RenderedArticle {
    render_with(&Extractor::default(), html, url)
}

fn render_with(extractor: &Extractor, html: &str, url: &NormalizedUrl) -> RenderedArticle {
    let fragment = extractor.extract(html, url.url());
    tracing::debug!(strategy = %fragment.strategy, bytes = fragment.html.len(), "extracted content");

    let absolute = absolutize(&fragment.html, url.url());
    let sanitized = sanitize(&absolute);
    tracing::debug!(sanitizer = %sanitized.strength, "sanitized fragment");

    let html = strip_presentation(&sanitized.html);

    RenderedArticle {
        source_url: url.to_string(),
        title: fragment.title,
        html,
        strategy: fragment.strategy,
        sanitizer: sanitized.strength,
    }
}

/// The long-lived pipeline: configuration plus a pooled HTTP client.
///
/// Immutable once built; share it behind an `Arc`.
#[cfg(feature = "fetch")]
#[derive(Debug)]
pub struct Reader {
    fetcher: Fetcher,
    extractor: Extractor,
}

#[cfg(feature = "fetch")]
impl Reader {
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: ReaderConfig) -> Result<Self> {
        Ok(Self { fetcher: Fetcher::new(config.fetch)?, extractor: Extractor::new(config.readability) })
    }

    /// Renders the article behind `raw`, the untrusted user input.
    pub async fn render(&self, raw: Option<&str>) -> RenderOutcome {
        let Some(url) = raw.and_then(normalize) else {
            tracing::debug!(received = ?raw, "rejected url");
            let received = raw.filter(|r| !r.is_empty()).map(str::to_string);
            return RenderOutcome::Rejected(Rejection::InvalidUrl { received });
        };

        let span = tracing::info_span!("render", url = %url);
        self.render_url(&url).instrument(span).await
    }

    /// Fetches and renders an already-normalized URL.
    pub async fn render_url(&self, url: &NormalizedUrl) -> RenderOutcome {
        match self.fetcher.fetch(url).await {
            Ok(page) => {
                let article = self.render_html(&page.html, url);
                tracing::info!(strategy = %article.strategy, sanitizer = %article.sanitizer, "rendered article");
                RenderOutcome::Rendered(article)
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed");
                RenderOutcome::Rejected(Rejection::Failed { source_url: url.to_string(), reason: e.to_string() })
            }
        }
    }

    /// The underlying fetcher, for callers that time or inspect the fetch separately.
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Stages 3 through 6 with this reader's extraction settings.
    pub fn render_html(&self, html: &str, url: &NormalizedUrl) -> RenderedArticle {
        render_with(&self.extractor, html, url)
    }
}
