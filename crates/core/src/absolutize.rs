//! Rewrites relative `href`/`src` values against the article URL.
//!
//! A reader page is served from a different origin than the article, so every
//! relative link and asset reference must be made absolute before display.

use lol_html::{RewriteStrSettings, element, rewrite_str};
use url::Url;

/// Values with these prefixes are already usable as-is.
const PASSTHROUGH_PREFIXES: &[&str] = &["http:", "https:", "data:", "mailto:", "tel:", "#"];

/// Resolves every relative `href` and `src` in `fragment` against `base`.
///
/// Empty values, absolute http(s) URLs, `data:`, `mailto:`, `tel:` and
/// in-page anchors are left alone. A value that cannot be joined is kept
/// verbatim; attributes are never dropped.
///
/// ```rust
/// use folio_core::absolutize;
/// use url::Url;
///
/// let base = Url::parse("https://news.example.com/world/story").unwrap();
/// let html = absolutize(r#"<a href="../sport">Sport</a><img src="/img/a.png">"#, &base);
/// assert!(html.contains(r#"href="https://news.example.com/sport""#));
/// assert!(html.contains(r#"src="https://news.example.com/img/a.png""#));
/// ```
pub fn absolutize(fragment: &str, base: &Url) -> String {
    let rewrite = move |name: &'static str| {
        element!(format!("[{name}]"), move |el| {
            if let Some(value) = el.get_attribute(name)
                && let Some(resolved) = resolve(&value, base)
            {
                el.set_attribute(name, &resolved)?;
            }
            Ok(())
        })
    };

    let result = rewrite_str(
        fragment,
        RewriteStrSettings { element_content_handlers: vec![rewrite("href"), rewrite("src")], ..RewriteStrSettings::default() },
    );

    match result {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(error = %e, "absolutize rewrite failed, keeping fragment");
            fragment.to_string()
        }
    }
}

/// The absolute form of `value`, or `None` when it should stay untouched.
fn resolve(value: &str, base: &Url) -> Option<String> {
    if value.trim().is_empty() || is_passthrough(value) {
        return None;
    }

    base.join(value).ok().map(String::from)
}

fn is_passthrough(value: &str) -> bool {
    PASSTHROUGH_PREFIXES.iter().any(|prefix| {
        value
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
