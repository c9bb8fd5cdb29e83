use crate::RenderedArticle;

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Include title as H1 heading at the start of content
    pub include_title_heading: bool,
    /// Append a `Source:` line linking back to the article
    pub include_source: bool,
}

/// Converts the article fragment to Markdown.
pub fn convert_to_markdown(article: &RenderedArticle, config: &MarkdownConfig) -> String {
    let mut output = String::new();

    if config.include_title_heading
        && let Some(title) = &article.title
    {
        output.push_str(&format!("# {}\n\n", title));
    }

    output.push_str(html_to_markdown(&article.html).trim());

    if config.include_source {
        output.push_str(&format!("\n\nSource: <{}>", article.source_url));
    }

    output
}

/// Convert HTML to Markdown using htmd crate
#[cfg(feature = "markdown")]
fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_default()
}

/// Fallback HTML to text conversion when markdown feature is disabled
#[cfg(not(feature = "markdown"))]
fn html_to_markdown(html: &str) -> String {
    super::text::extract_text_with_paragraphs(html)
}
