//! Strips source-site styling hooks so the reader stylesheet applies.

use lol_html::{RewriteStrSettings, element, rewrite_str};

/// Removes `style`, `class`, `id` and every `data-*` attribute from all
/// elements. Tag names and other attributes are untouched.
///
/// Runs on sanitized output only.
///
/// ```rust
/// use folio_core::strip_presentation;
///
/// let html = strip_presentation(r#"<p class="lead" data-x="1" title="t">Hi</p>"#);
/// assert_eq!(html, r#"<p title="t">Hi</p>"#);
/// ```
pub fn strip_presentation(fragment: &str) -> String {
    let result = rewrite_str(
        fragment,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let presentational: Vec<String> = el
                    .attributes()
                    .iter()
                    .map(|attr| attr.name())
                    .filter(|name| is_presentational(name))
                    .collect();
                for name in presentational {
                    el.remove_attribute(&name);
                }
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    );

    match result {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(error = %e, "presentation rewrite failed, keeping fragment");
            fragment.to_string()
        }
    }
}

fn is_presentational(name: &str) -> bool {
    matches!(name, "style" | "class" | "id") || name.starts_with("data-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_presentational_attributes() {
        let html = r#"<div id="main" class="wrap" style="color:red" data-track="1" data-x='y'><a href="https://ex.com/" class="btn">x</a></div>"#;
        assert_eq!(strip_presentation(html), r#"<div><a href="https://ex.com/">x</a></div>"#);
    }

    #[test]
    fn test_other_attributes_untouched() {
        let html = r#"<img src="https://ex.com/a.png" alt="A" width="100">"#;
        assert_eq!(strip_presentation(html), html);
    }

    #[test]
    fn test_uppercase_attribute_names() {
        let html = r#"<P CLASS="x" STYLE="y" Data-Id="z">t</P>"#;
        let result = strip_presentation(html);
        assert!(!result.to_lowercase().contains("class"));
        assert!(!result.to_lowercase().contains("style"));
        assert!(!result.to_lowercase().contains("data-id"));
        assert!(result.contains('t'));
    }

    #[test]
    fn test_text_mentioning_attributes_survives() {
        let html = r#"<p>Set class="x" in your style sheet</p>"#;
        assert_eq!(strip_presentation(html), html);
    }
}
