//! Streaming HTML rewrites shared by the extractors.
//!
//! Every pass here runs through `lol_html`, so element and attribute edits
//! follow the real tag structure instead of textual patterns. A rewrite that
//! fails (malformed encoding, parser bailout) returns the input unchanged and
//! logs a warning; the sanitizer downstream still gets a chance at it.

use std::sync::LazyLock;

use lol_html::{RewriteStrSettings, element, rewrite_str};
use regex::Regex;

/// Elements that can execute code or submit data.
pub const ACTIVE_CONTENT_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed", "form"];

/// Page chrome that pollutes structural matching.
pub const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// Elements dropped from a readability result before it is serialized.
const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "object", "embed", "svg", "canvas", "form", "button", "input",
    "select", "textarea", "nav", "aside", "footer",
];

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

/// Removes `script, style, iframe, object, embed, form`, the chrome tags
/// `nav, header, footer, aside`, and every `on*` event-handler attribute.
pub fn strip_active_content(html: &str) -> String {
    let tags: Vec<&str> = ACTIVE_CONTENT_TAGS.iter().chain(CHROME_TAGS).copied().collect();
    let removed = remove_elements(html, &tags);
    strip_event_handlers(&removed)
}

/// Removes every element matching one of `selectors`, content included.
pub fn remove_elements(html: &str, selectors: &[&str]) -> String {
    let element_content_handlers = selectors
        .iter()
        .map(|selector| {
            element!(*selector, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    let result = rewrite_str(
        html,
        RewriteStrSettings { element_content_handlers, ..RewriteStrSettings::default() },
    );

    unwrap_rewrite(html, result)
}

/// Drops `on*` attributes (`onclick`, `onerror`, …) from every element.
pub fn strip_event_handlers(html: &str) -> String {
    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let handlers: Vec<String> = el
                    .attributes()
                    .iter()
                    .map(|attr| attr.name())
                    .filter(|name| name.starts_with("on"))
                    .collect();
                for name in handlers {
                    el.remove_attribute(&name);
                }
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    );

    unwrap_rewrite(html, result)
}

/// Cleans a readability result: non-content elements, hidden elements and comments.
pub fn clean_readable(html: &str) -> String {
    let selectors: Vec<&str> = NON_CONTENT_TAGS
        .iter()
        .copied()
        .chain(["[hidden]", "[aria-hidden='true']"])
        .collect();

    remove_comments(&remove_elements(html, &selectors))
}

/// Removes HTML comments.
pub fn remove_comments(html: &str) -> String {
    COMMENT.replace_all(html, "").into_owned()
}

fn unwrap_rewrite(html: &str, result: Result<String, lol_html::errors::RewritingError>) -> String {
    match result {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(error = %e, "html rewrite failed, keeping input");
            html.to_string()
        }
    }
}
