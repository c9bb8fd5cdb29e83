//! Removal of markup that can execute code or exfiltrate data.
//!
//! With the default `ammonia` feature, fragments go through ammonia's
//! allow-list cleaner and come back [`SanitizerStrength::Strict`]. Builds
//! without it use [`sanitize_best_effort`], a regex tag stripper that only
//! knows a fixed list of dangerous elements and inline handlers. It is
//! strictly weaker, so its output is tagged [`SanitizerStrength::BestEffort`]
//! and every use is logged.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// How thoroughly a fragment was cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizerStrength {
    /// Allow-list sanitizer.
    Strict,
    /// Regex deny-list fallback.
    BestEffort,
}

impl fmt::Display for SanitizerStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizerStrength::Strict => f.write_str("strict"),
            SanitizerStrength::BestEffort => f.write_str("best-effort"),
        }
    }
}

/// A fragment that has been through a sanitizer.
#[derive(Debug, Clone)]
pub struct SanitizedFragment {
    pub html: String,
    pub strength: SanitizerStrength,
}

/// Elements the fallback removes along with everything up to their closing tag.
const FALLBACK_SPAN_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "form", "nav", "header", "footer", "aside",
];

static FALLBACK_SPANS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FALLBACK_SPAN_TAGS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b.*?</{tag}\s*>")).expect("fallback span pattern"))
        .collect()
});

static EVENT_HANDLERS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)\son[a-z]+\s*=\s*"[^"]*""#).expect("double-quoted handler pattern"),
        Regex::new(r"(?i)\son[a-z]+\s*=\s*'[^']*'").expect("single-quoted handler pattern"),
        Regex::new(r"(?i)\son[a-z]+\s*=\s*[^\s>]+").expect("bare handler pattern"),
    ]
});

/// Cleans `fragment` with the strongest sanitizer compiled in.
pub fn sanitize(fragment: &str) -> SanitizedFragment {
    #[cfg(feature = "ammonia")]
    {
        SanitizedFragment { html: sanitize_strict(fragment), strength: SanitizerStrength::Strict }
    }

    #[cfg(not(feature = "ammonia"))]
    {
        tracing::warn!("strict sanitizer not compiled in, using best-effort tag stripping");
        SanitizedFragment { html: sanitize_best_effort(fragment), strength: SanitizerStrength::BestEffort }
    }
}

/// Allow-list cleaning with ammonia.
///
/// Ammonia's default profile, minus `script, style, iframe, object, embed,
/// form` (the first five dropped with their content). Links open in a new
/// tab with `rel="noopener noreferrer"`.
#[cfg(feature = "ammonia")]
pub fn sanitize_strict(fragment: &str) -> String {
    ammonia::Builder::default()
        .rm_tags(["script", "style", "iframe", "object", "embed", "form"])
        .add_clean_content_tags(["iframe", "object", "embed"])
        .link_rel(Some("noopener noreferrer"))
        .set_tag_attribute_value("a", "target", "_blank")
        .clean(fragment)
        .to_string()
}

/// Regex stripping of known-dangerous spans and inline event handlers.
///
/// Not a security boundary: unknown vectors (`javascript:` URLs, SVG
/// payloads, unclosed tags) pass through.
pub fn sanitize_best_effort(fragment: &str) -> String {
    let without_spans = FALLBACK_SPANS
        .iter()
        .fold(fragment.to_string(), |html, span| span.replace_all(&html, "").into_owned());

    EVENT_HANDLERS
        .iter()
        .fold(without_spans, |html, handler| handler.replace_all(&html, "").into_owned())
}
