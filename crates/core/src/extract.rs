//! Main-content extraction as an ordered list of strategies.
//!
//! [`Extractor`] tries each [`ExtractionStrategy`] in turn and keeps the first
//! fragment produced. The default list is readability scoring followed by the
//! structural fallback, which always succeeds.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ExtractionStrategyKind, StructuralMatch, extract};
//! use url::Url;
//!
//! let base = Url::parse("https://example.com/").unwrap();
//! let fragment = extract("<main><p>Short</p></main>", &base);
//! assert_eq!(fragment.strategy, ExtractionStrategyKind::Structural(StructuralMatch::Main));
//! ```

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::parse::Document;
use crate::readability::{ReadabilityConfig, extract_readable};
use crate::structural::{StructuralMatch, extract_structural};

/// Which strategy produced a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "match")]
pub enum ExtractionStrategyKind {
    Readability,
    Structural(StructuralMatch),
}

impl fmt::Display for ExtractionStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStrategyKind::Readability => f.write_str("readability"),
            ExtractionStrategyKind::Structural(found) => write!(f, "structural ({found})"),
        }
    }
}

/// An HTML fragment believed to hold the article. Not yet safe to display.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedFragment {
    pub html: String,
    pub title: Option<String>,
    pub strategy: ExtractionStrategyKind,
}

/// A way of locating the main content of a page.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns `None` when this strategy has nothing to offer for `html`.
    fn attempt(&self, html: &str, base: &Url) -> Option<ExtractedFragment>;
}

/// Readability scoring on the unmodified document.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityStrategy {
    config: ReadabilityConfig,
}

impl ReadabilityStrategy {
    pub fn new(config: ReadabilityConfig) -> Self {
        Self { config }
    }
}

impl ExtractionStrategy for ReadabilityStrategy {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn attempt(&self, html: &str, _base: &Url) -> Option<ExtractedFragment> {
        let doc = Document::parse(html);
        match extract_readable(&doc, &self.config) {
            Ok(readable) => {
                tracing::debug!(score = readable.score, "readability candidate accepted");
                Some(ExtractedFragment {
                    html: readable.content,
                    title: readable.title,
                    strategy: ExtractionStrategyKind::Readability,
                })
            }
            Err(e) => {
                tracing::debug!(reason = %e, "readability found nothing");
                None
            }
        }
    }
}

/// Fixed-precedence container matching after stripping chrome.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralStrategy;

impl StructuralStrategy {
    fn fragment(html: &str) -> ExtractedFragment {
        let (fragment, found) = extract_structural(html);
        ExtractedFragment {
            html: fragment,
            title: Document::parse(html).article_title(),
            strategy: ExtractionStrategyKind::Structural(found),
        }
    }
}

impl ExtractionStrategy for StructuralStrategy {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn attempt(&self, html: &str, _base: &Url) -> Option<ExtractedFragment> {
        Some(Self::fragment(html))
    }
}

/// Runs strategies in order until one yields a fragment.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Readability with `config`, then the structural fallback.
    pub fn new(config: ReadabilityConfig) -> Self {
        Self::with_strategies(vec![Box::new(ReadabilityStrategy::new(config)), Box::new(StructuralStrategy)])
    }

    /// A custom strategy list. If every strategy declines, the structural
    /// fallback still runs so extraction never comes back empty.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, html: &str, base: &Url) -> ExtractedFragment {
        let found = self.strategies.iter().find_map(|strategy| {
            let fragment = strategy.attempt(html, base);
            if fragment.is_some() {
                tracing::debug!(strategy = strategy.name(), "extraction strategy matched");
            }
            fragment
        });

        found.unwrap_or_else(|| StructuralStrategy::fragment(html))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ReadabilityConfig::default())
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").field("strategies", &self.strategy_names()).finish()
    }
}

/// Extracts with the default strategy list.
pub fn extract(html: &str, base: &Url) -> ExtractedFragment {
    Extractor::default().extract(html, base)
}
