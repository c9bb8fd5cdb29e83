//! Readability-style main content detection.
//!
//! The scorer walks the parsed tree once, skipping subtrees that can never be
//! article text (scripts, forms, navigation, hidden or "unlikely" containers).
//! Every paragraph-like node with enough text awards points to its parent and,
//! at half weight, its grandparent. Ancestors start from a tag- and
//! class-based prior and are penalized by their link density; the best one,
//! plus any siblings that look like they belong to the same story, becomes
//! the article.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Document, ReadabilityConfig, extract_readable};
//!
//! let paragraph = "<p>Readable prose goes here, with commas, clauses, and enough length to count as a real paragraph of text.</p>";
//! let html = format!("<html><body><article>{}</article></body></html>", paragraph.repeat(4));
//!
//! let doc = Document::parse(&html);
//! let readable = extract_readable(&doc, &ReadabilityConfig::default()).unwrap();
//! assert!(readable.content.contains("Readable prose"));
//! ```

use std::collections::HashMap;

use crate::parse::{Document, Element};
use crate::preprocess;
use crate::scoring::{
    ScoreConfig, base_tag_score, class_id_weight, is_hidden, is_unlikely_candidate, link_density, paragraph_score,
};
use crate::{FolioError, Result};

/// Subtrees the scorer never descends into.
const SKIP_SUBTREE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "object", "embed", "svg", "canvas", "form", "button", "select",
    "textarea", "nav", "aside", "footer",
];

/// Nodes whose own text is scored.
const PARAGRAPH_TAGS: &[&str] = &["p", "pre", "td"];

/// Children that stop a `<div>` from counting as a paragraph.
const BLOCK_TAGS: &[&str] = &[
    "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul", "section", "article", "figure",
];

/// Paragraphs shorter than this are ignored.
const MIN_PARAGRAPH_CHARS: usize = 25;

/// Configuration for readability extraction.
///
/// # Example
///
/// ```rust
/// use folio_core::ReadabilityConfig;
///
/// let config = ReadabilityConfig::builder()
///     .min_score(25.0)
///     .char_threshold(500)
///     .build();
/// assert_eq!(config.char_threshold, 500);
/// ```
#[derive(Debug, Clone)]
pub struct ReadabilityConfig {
    /// Minimum score the top candidate needs (default: 20.0).
    pub min_score: f64,

    /// Minimum characters of text in the result (default: 250).
    pub char_threshold: usize,

    /// Siblings scoring at least this fraction of the top score are kept (default: 0.2).
    pub sibling_threshold: f64,

    /// Scoring weights.
    pub scoring: ScoreConfig,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self { min_score: 20.0, char_threshold: 250, sibling_threshold: 0.2, scoring: ScoreConfig::default() }
    }
}

impl ReadabilityConfig {
    pub fn builder() -> ReadabilityConfigBuilder {
        ReadabilityConfigBuilder::new()
    }
}

/// Fluent builder for [`ReadabilityConfig`].
pub struct ReadabilityConfigBuilder {
    config: ReadabilityConfig,
}

impl ReadabilityConfigBuilder {
    pub fn new() -> Self {
        Self { config: ReadabilityConfig::default() }
    }

    /// Sets the minimum score threshold.
    pub fn min_score(mut self, value: f64) -> Self {
        self.config.min_score = value;
        self
    }

    /// Sets the minimum result length in characters.
    pub fn char_threshold(mut self, value: usize) -> Self {
        self.config.char_threshold = value;
        self
    }

    /// Sets the sibling inclusion ratio.
    pub fn sibling_threshold(mut self, value: f64) -> Self {
        self.config.sibling_threshold = value;
        self
    }

    pub fn build(self) -> ReadabilityConfig {
        self.config
    }
}

impl Default for ReadabilityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a successful readability pass.
#[derive(Debug, Clone)]
pub struct Readable {
    /// Article HTML wrapped in a single `<div>`.
    pub content: String,
    /// Derived title (`og:title`, `<title>` or first `<h1>`).
    pub title: Option<String>,
    /// Score of the winning candidate.
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

/// Finds the main content of `doc`.
///
/// # Errors
///
/// - [`FolioError::NoContent`] when no paragraph qualifies or the result is
///   shorter than `char_threshold`.
/// - [`FolioError::NotReadable`] when the best candidate scores below `min_score`.
pub fn extract_readable(doc: &Document, config: &ReadabilityConfig) -> Result<Readable> {
    let candidates = score_candidates(doc, &config.scoring);

    let top = candidates
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or(FolioError::NoContent)?;

    if top.score < config.min_score {
        return Err(FolioError::NotReadable { score: top.score, threshold: config.min_score });
    }

    let parts: String = with_siblings(top, &candidates, config)
        .iter()
        .map(Element::outer_html)
        .collect();
    let content = preprocess::clean_readable(&format!("<div>{parts}</div>"));

    let text_length = Document::parse(&content).text_content().trim().chars().count();
    if text_length < config.char_threshold {
        tracing::debug!(text_length, threshold = config.char_threshold, "readability result too short");
        return Err(FolioError::NoContent);
    }

    Ok(Readable { content, title: doc.article_title(), score: top.score })
}

fn score_candidates<'a>(doc: &'a Document, config: &ScoreConfig) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = Vec::new();
    let mut slots = HashMap::new();

    for paragraph in scorable_paragraphs(doc) {
        let text = paragraph.text();
        let text = text.trim();
        if text.chars().count() < MIN_PARAGRAPH_CHARS {
            continue;
        }

        let points = paragraph_score(text, config);
        let parent = paragraph.parent();
        let grandparent = parent.and_then(|p| p.parent());

        for (divider, ancestor) in [(1.0, parent), (2.0, grandparent)] {
            let Some(ancestor) = ancestor.filter(|a| a.tag_name() != "html") else {
                continue;
            };
            let slot = *slots.entry(ancestor.element_ref().id()).or_insert_with(|| {
                let prior = base_tag_score(&ancestor.tag_name()) + class_id_weight(&ancestor, config);
                candidates.push(Candidate { element: ancestor, score: prior });
                candidates.len() - 1
            });
            candidates[slot].score += points / divider;
        }
    }

    for candidate in &mut candidates {
        candidate.score *= 1.0 - link_density(&candidate.element);
    }

    candidates
}

/// Paragraph-like elements outside of skipped subtrees, in document order.
fn scorable_paragraphs<'a>(doc: &'a Document) -> Vec<Element<'a>> {
    let mut found = Vec::new();
    let mut stack = vec![doc.root()];

    while let Some(element) = stack.pop() {
        let tag = element.tag_name();
        if SKIP_SUBTREE_TAGS.contains(&tag.as_str()) || is_hidden(&element) || is_unlikely_candidate(&element) {
            continue;
        }

        if PARAGRAPH_TAGS.contains(&tag.as_str()) || (tag == "div" && !has_block_children(&element)) {
            found.push(element);
        }

        let children: Vec<Element<'a>> = element.children().collect();
        stack.extend(children.into_iter().rev());
    }

    found
}

fn has_block_children(element: &Element<'_>) -> bool {
    element
        .children()
        .any(|child| BLOCK_TAGS.contains(&child.tag_name().as_str()))
}

/// The top candidate plus siblings that read like part of the same story.
fn with_siblings<'a>(top: &Candidate<'a>, candidates: &[Candidate<'a>], config: &ReadabilityConfig) -> Vec<Element<'a>> {
    let Some(parent) = top.element.parent() else {
        return vec![top.element];
    };

    let top_id = top.element.element_ref().id();
    let top_class = top.element.attr("class").filter(|c| !c.trim().is_empty());
    let threshold = (top.score * config.sibling_threshold).max(10.0);

    parent
        .children()
        .filter(|sibling| {
            let id = sibling.element_ref().id();
            if id == top_id {
                return true;
            }

            let bonus = if top_class.is_some() && sibling.attr("class") == top_class { top.score * 0.2 } else { 0.0 };
            if let Some(candidate) = candidates.iter().find(|c| c.element.element_ref().id() == id)
                && candidate.score + bonus >= threshold
            {
                return true;
            }

            sibling.tag_name() == "p" && is_prose(sibling)
        })
        .collect()
}

fn is_prose(paragraph: &Element<'_>) -> bool {
    let text = paragraph.text();
    let text = text.trim();
    let length = text.chars().count();
    let density = link_density(paragraph);

    if length > 80 {
        density < 0.25
    } else {
        length > 0 && density == 0.0 && (text.contains(". ") || text.ends_with('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(n: usize) -> String {
        (0..n)
            .map(|i| {
                format!(
                    "<p>Paragraph {i} carries the story forward, with commas, clauses, and enough detail \
                     that a reader would recognize it as genuine article prose.</p>"
                )
            })
            .collect()
    }

    fn article_page() -> String {
        format!(
            r##"<!DOCTYPE html>
            <html>
            <head><title>Storm Season</title><script>track()</script></head>
            <body>
                <nav><a href="/">Home</a><a href="/world">World</a></nav>
                <div class="sidebar"><p>Trending stories you might have missed, click through, please, now, today.</p></div>
                <div class="story-body">
                    <h1>Storm Season</h1>
                    {}
                    <script>alert('x')</script>
                </div>
                <footer>Copyright</footer>
            </body>
            </html>"##,
            paragraphs(6)
        )
    }

    #[test]
    fn test_readability_config_default() {
        let config = ReadabilityConfig::default();
        assert_eq!(config.min_score, 20.0);
        assert_eq!(config.char_threshold, 250);
        assert_eq!(config.sibling_threshold, 0.2);
    }

    #[test]
    fn test_readability_config_builder() {
        let config = ReadabilityConfig::builder()
            .min_score(30.0)
            .char_threshold(1000)
            .sibling_threshold(0.3)
            .build();

        assert_eq!(config.min_score, 30.0);
        assert_eq!(config.char_threshold, 1000);
        assert_eq!(config.sibling_threshold, 0.3);
    }

    #[test]
    fn test_extracts_story_body() {
        let doc = Document::parse(&article_page());
        let readable = extract_readable(&doc, &ReadabilityConfig::default()).unwrap();

        assert!(readable.content.contains("Paragraph 0 carries"));
        assert!(readable.content.contains("Paragraph 5 carries"));
        assert!(!readable.content.contains("Trending stories"));
        assert!(!readable.content.contains("<script"));
        assert!(!readable.content.contains("Copyright"));
        assert_eq!(readable.title, Some("Storm Season".to_string()));
        assert!(readable.score >= 20.0);
    }

    #[test]
    fn test_navigation_page_is_not_readable() {
        let html = r##"
            <html><body>
                <nav class="menu"><a href="#">Link 1</a><a href="#">Link 2</a></nav>
                <div class="links"><a href="#">Another link</a> <a href="#">More</a></div>
            </body></html>
        "##;

        let result = extract_readable(&Document::parse(html), &ReadabilityConfig::default());
        assert!(matches!(result, Err(FolioError::NoContent) | Err(FolioError::NotReadable { .. })));
    }

    #[test]
    fn test_short_article_falls_below_char_threshold() {
        let html = format!("<html><body><article>{}</article></body></html>", paragraphs(1));
        let config = ReadabilityConfig::builder().min_score(0.0).build();

        let result = extract_readable(&Document::parse(&html), &config);
        assert!(matches!(result, Err(FolioError::NoContent)));
    }

    #[test]
    fn test_hidden_and_unlikely_paragraphs_are_ignored() {
        let html = format!(
            r#"<html><body>
                <div id="comments">{}</div>
                <div style="display:none">{}</div>
            </body></html>"#,
            paragraphs(5),
            paragraphs(5)
        );

        let result = extract_readable(&Document::parse(&html), &ReadabilityConfig::default());
        assert!(matches!(result, Err(FolioError::NoContent)));
    }

    #[test]
    fn test_sibling_paragraphs_are_kept() {
        let html = format!(
            r#"<html><body><div id="wrap">
                <div class="entry">{}</div>
                <p>A closing paragraph that sits beside the main container, with plenty of ordinary text to count as prose.</p>
            </div></body></html>"#,
            paragraphs(5)
        );

        let readable = extract_readable(&Document::parse(&html), &ReadabilityConfig::default()).unwrap();
        assert!(readable.content.contains("A closing paragraph"));
    }
}
