//! Structural fallback extraction.
//!
//! Used when the readability pass finds nothing. The page is first stripped of
//! active content and chrome, then searched for the first container that
//! looks like the article, in a fixed order of precedence.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::parse::{Document, Element};
use crate::preprocess;

static BODY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body[\s>/]").expect("body tag pattern"));

/// Class fragments that mark an article container.
const CONTENT_CLASS_HINTS: &[&str] = &["article", "post", "story", "content"];

/// Which rule located the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralMatch {
    /// First `<article>`.
    Article,
    /// First `<main>`.
    Main,
    /// First element with `id="content"`.
    ContentId,
    /// First element whose class mentions article, post, story or content.
    ContentClass,
    /// The `<body>` element.
    Body,
    /// Nothing matched; the whole stripped input.
    WholeDocument,
}

impl fmt::Display for StructuralMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructuralMatch::Article => "article",
            StructuralMatch::Main => "main",
            StructuralMatch::ContentId => "#content",
            StructuralMatch::ContentClass => "content class",
            StructuralMatch::Body => "body",
            StructuralMatch::WholeDocument => "whole document",
        };
        f.write_str(name)
    }
}

/// Strips active content and chrome from `html`, then returns the outer HTML
/// of the first matching container and the rule that found it.
///
/// Never fails: the last resort is the stripped input itself.
pub fn extract_structural(html: &str) -> (String, StructuralMatch) {
    let stripped = preprocess::strip_active_content(html);
    let doc = Document::parse(&stripped);

    if let Some(found) = find_container(&doc, &stripped) {
        return found;
    }

    (stripped, StructuralMatch::WholeDocument)
}

fn find_container(doc: &Document, source: &str) -> Option<(String, StructuralMatch)> {
    let rules: [(StructuralMatch, fn(&Element<'_>) -> bool); 4] = [
        (StructuralMatch::Article, |el| el.tag_name() == "article"),
        (StructuralMatch::Main, |el| el.tag_name() == "main"),
        (StructuralMatch::ContentId, |el| {
            el.attr("id").is_some_and(|id| id.eq_ignore_ascii_case("content"))
        }),
        (StructuralMatch::ContentClass, |el| el.attr("class").is_some_and(has_content_hint)),
    ];

    for (kind, matches) in rules {
        if let Some(element) = doc.elements().find(|el| matches(el)) {
            return Some((element.outer_html(), kind));
        }
    }

    // html5ever always synthesizes a body, so only trust one the source wrote.
    if BODY_TAG.is_match(source)
        && let Ok(Some(body)) = doc.select_first("body")
    {
        return Some((body.outer_html(), StructuralMatch::Body));
    }

    None
}

fn has_content_hint(class: &str) -> bool {
    let class = class.to_ascii_lowercase();
    CONTENT_CLASS_HINTS.iter().any(|hint| class.contains(hint))
}
