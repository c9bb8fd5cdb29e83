use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Weights used by the readability scorer.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum paragraph bonus from character count
    pub max_length_bonus: f64,
    /// Characters per point of length bonus
    pub chars_per_point: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { positive_weight: 25.0, negative_weight: -25.0, max_length_bonus: 3.0, chars_per_point: 100 }
    }
}

/// Class/id fragments that suggest main content.
static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story|tweet)")
        .expect("positive pattern")
});

/// Class/id fragments that suggest boilerplate.
static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|share|social|promo)")
        .expect("negative pattern")
});

/// Containers skipped outright unless they also look like content.
static UNLIKELY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(banner|breadcrumbs?|combx|comment|community|cover-wrap|disqus|extra|foot|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote)")
        .expect("unlikely pattern")
});

static MAYBE_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(and|article|body|column|content|main|shadow)").expect("maybe pattern"));

static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("hidden style pattern"));

/// Score contribution of the tag itself.
///
/// - ARTICLE: +10, SECTION: +8, DIV: +5
/// - TD, BLOCKQUOTE: +3, PRE: 0
/// - FORM, ADDRESS and list elements: -3
/// - headings, TH, HEADER, FOOTER, NAV: -5
pub fn base_tag_score(tag_name: &str) -> f64 {
    match tag_name {
        "article" => 10.0,
        "section" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID weight: positive wins over negative, id is checked before class.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let id = element.attr("id").into_iter();
    let classes = element.attr("class").into_iter().flat_map(str::split_whitespace);

    for name in id.chain(classes) {
        if POSITIVE.is_match(name) {
            return config.positive_weight;
        }
        if NEGATIVE.is_match(name) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Score a paragraph-like node contributes to its ancestors: one point for
/// existing, one per comma, and a capped bonus per `chars_per_point` chars.
pub fn paragraph_score(text: &str, config: &ScoreConfig) -> f64 {
    let commas = text.chars().filter(|c| matches!(c, ',' | '，')).count() as f64;
    let length_bonus = (text.chars().count() / config.chars_per_point) as f64;

    1.0 + commas + length_bonus.min(config.max_length_bonus)
}

/// Ratio of link text to all text, 0.0 to 1.0.
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text().chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text().chars().count())
        .sum();

    link_length as f64 / text_length as f64
}

/// Whether the element's class/id marks it as boilerplate.
///
/// Structural content tags are never unlikely, whatever their class says.
pub fn is_unlikely_candidate(element: &Element<'_>) -> bool {
    if matches!(element.tag_name().as_str(), "html" | "body" | "article" | "main" | "a") {
        return false;
    }

    let signature = format!(
        "{} {}",
        element.attr("class").unwrap_or_default(),
        element.attr("id").unwrap_or_default()
    );

    UNLIKELY.is_match(&signature) && !MAYBE_CANDIDATE.is_match(&signature)
}

/// Hidden via `hidden`, `aria-hidden="true"` or an inline display/visibility style.
pub fn is_hidden(element: &Element<'_>) -> bool {
    element.attr("hidden").is_some()
        || element.attr("aria-hidden") == Some("true")
        || element.attr("style").is_some_and(|style| HIDDEN_STYLE.is_match(style))
}
