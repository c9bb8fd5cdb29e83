use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::RenderedArticle;

/// Block-level elements that become their own paragraph.
const BLOCK_ELEMENTS: &str = "p, h1, h2, h3, h4, h5, h6, li, blockquote, pre, figcaption, dt, dd, td, th";

static BLOCKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(BLOCK_ELEMENTS).expect("block selector"));

/// Plain text of the article: optional title line, then one paragraph per
/// innermost block element, separated by blank lines.
pub fn convert_to_text(article: &RenderedArticle, include_title: bool) -> String {
    let mut output = String::new();

    if include_title && let Some(title) = &article.title {
        output.push_str(title);
        output.push_str("\n\n");
    }

    output.push_str(&extract_text_with_paragraphs(&article.html));
    output
}

/// Text of `html` with paragraph breaks preserved.
pub fn extract_text_with_paragraphs(html: &str) -> String {
    let fragment = Html::parse_fragment(html);

    let paragraphs: Vec<String> = fragment
        .select(&BLOCKS)
        .filter(|block| block.select(&BLOCKS).next().is_none())
        .map(|block| collapse_whitespace(&block.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    if paragraphs.is_empty() {
        collapse_whitespace(&fragment.root_element().text().collect::<String>())
    } else {
        paragraphs.join("\n\n")
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
