use serde::Serialize;

use crate::formatters::text::extract_text_with_paragraphs;
use crate::{ExtractionStrategyKind, RenderedArticle, Result, SanitizerStrength};

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    pub source_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub strategy: ExtractionStrategyKind,
    pub sanitizer: SanitizerStrength,
    pub html: &'a str,
    /// Plain text, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Include plain text in output
    pub include_text: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serializes the article and how it was produced.
pub fn convert_to_json(article: &RenderedArticle, config: &JsonConfig) -> Result<String> {
    let output = JsonOutput {
        source_url: &article.source_url,
        title: article.title.as_deref(),
        strategy: article.strategy,
        sanitizer: article.sanitizer,
        html: &article.html,
        text: config.include_text.then(|| extract_text_with_paragraphs(&article.html)),
    };

    let json = if config.pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
    Ok(json)
}
