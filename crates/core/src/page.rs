//! The reader page around a [`RenderOutcome`].
//!
//! All dynamic text goes through maud's escaping. The article fragment is the
//! only markup emitted verbatim, and it has already been sanitized.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::reader::{Rejection, RenderOutcome, RenderedArticle};

const READER_CSS: &str = r#"
body { margin: 0; min-height: 100vh; background: #111114; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; }
.topbar { position: sticky; top: 0; display: flex; justify-content: space-between; align-items: center; padding: 12px 16px; background: rgba(0,0,0,0.5); border-bottom: 1px solid rgba(255,255,255,0.1); font-size: 14px; }
.topbar a { color: #f0abfc; text-decoration: none; }
.topbar span { color: rgba(255,255,255,0.8); }
main { max-width: 72rem; margin: 0 auto; padding: 16px; }
.notice { border: 1px solid rgba(248,113,113,0.3); background: rgba(239,68,68,0.1); border-radius: 12px; padding: 16px; font-size: 14px; color: #fecaca; }
.notice div + div, .notice div + a { margin-top: 8px; }
.notice .received { color: rgba(255,255,255,0.6); word-break: break-all; }
.notice a { display: inline-block; color: #f0abfc; }
.reader { color: #e5e7eb; }
.reader a { color: #f0abfc; text-decoration: underline; }
.reader-meta { font-size: 12px; color: rgba(255,255,255,0.6); margin-bottom: 12px; }
.reader-title { font-size: 2.25rem; font-weight: 700; margin: 0.5rem 0 1rem; }
.reader-body { font-size: 16px; line-height: 1.75; }
.reader-body h1 { font-size: 1.875rem; font-weight: 700; margin: 1rem 0 0.5rem; }
.reader-body h2 { font-size: 1.5rem; font-weight: 700; margin: 1rem 0 0.5rem; }
.reader-body h3 { font-size: 1.25rem; font-weight: 600; margin: 1rem 0 0.5rem; }
.reader-body p { margin: 0.75rem 0; }
.reader-body ul, .reader-body ol { padding-left: 1.25rem; margin: 0.75rem 0; }
.reader-body li { margin: 0.25rem 0; }
.reader-body blockquote { border-left: 3px solid rgba(255,255,255,0.2); padding-left: 0.75rem; color: rgba(255,255,255,0.8); margin: 1rem 0; }
.reader-body img, .reader-body video, .reader-body picture, .reader-body figure { max-width: 100%; height: auto; border-radius: 8px; margin: 0.75rem 0; }
.reader-body table { width: 100%; border-collapse: collapse; margin: 1rem 0; }
.reader-body th, .reader-body td { border: 1px solid rgba(255,255,255,0.15); padding: 0.5rem; }
.reader-body code, .reader-body pre { background: rgba(255,255,255,0.06); padding: 0.2rem 0.35rem; border-radius: 6px; }
.reader-body pre { overflow: auto; padding: 0.75rem; }
"#;

/// Renders a complete HTML document for `outcome`.
pub fn render_page(outcome: &RenderOutcome) -> String {
    let title = outcome
        .article()
        .and_then(|article| article.title.as_deref())
        .unwrap_or("Reader");

    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="referrer" content="no-referrer";
                title { (title) }
                style { (PreEscaped(READER_CSS)) }
            }
            body {
                header class="topbar" {
                    a href="/" { "← Back" }
                    span { "Reader" }
                    div {}
                }
                main {
                    @match outcome {
                        RenderOutcome::Rendered(article) => { (article_view(article)) }
                        RenderOutcome::Rejected(rejection) => { (rejection_view(rejection)) }
                    }
                }
            }
        }
    };

    page.into_string()
}

/// A minimal landing page with a form that submits to `/read`.
pub fn render_index() -> String {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Reader" }
                style { (PreEscaped(READER_CSS)) }
            }
            body {
                header class="topbar" {
                    span { "Reader" }
                }
                main {
                    form class="reader" method="get" action="/read" {
                        label for="url" { "Article URL" }
                        " "
                        input id="url" type="text" name="url" placeholder="https://" autofocus;
                        " "
                        button type="submit" { "Read" }
                    }
                }
            }
        }
    };

    page.into_string()
}

fn article_view(article: &RenderedArticle) -> Markup {
    // Extracted fragments usually carry their own headline.
    let heading = article.title.as_deref().filter(|_| !article.html.contains("<h1"));

    html! {
        div class="reader" {
            @if let Some(heading) = heading {
                h1 class="reader-title" { (heading) }
            }
            div class="reader-meta" {
                "Source: "
                a href=(article.source_url) target="_blank" rel="noreferrer" { (article.source_url) }
            }
            div class="reader-body" { (PreEscaped(&article.html)) }
        }
    }
}

fn rejection_view(rejection: &Rejection) -> Markup {
    html! {
        div class="notice" {
            @match rejection {
                Rejection::InvalidUrl { received } => {
                    div { "Invalid or missing URL." }
                    @if let Some(received) = received {
                        div class="received" { "Received: " (received) }
                    }
                }
                Rejection::Failed { source_url, reason } => {
                    div { "Failed to render article: " (reason) }
                    a href=(source_url) target="_blank" rel="noreferrer" { "Open at source" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionStrategyKind;
    use crate::sanitize::SanitizerStrength;

    fn rendered(title: Option<&str>, html: &str) -> RenderOutcome {
        RenderOutcome::Rendered(RenderedArticle {
            source_url: "https://ex.com/story?a=1&b=2".to_string(),
            title: title.map(str::to_string),
            html: html.to_string(),
            strategy: ExtractionStrategyKind::Readability,
            sanitizer: SanitizerStrength::Strict,
        })
    }

    #[test]
    fn test_invalid_url_echoes_escaped_input() {
        let outcome = RenderOutcome::Rejected(Rejection::InvalidUrl {
            received: Some("<script>alert(1)</script>".to_string()),
        });
        let page = render_page(&outcome);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Invalid or missing URL."));
        assert!(page.contains("Received: &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_missing_url_has_no_received_line() {
        let page = render_page(&RenderOutcome::Rejected(Rejection::InvalidUrl { received: None }));
        assert!(page.contains("Invalid or missing URL."));
        assert!(!page.contains("Received:"));
    }

    #[test]
    fn test_failure_links_to_source() {
        let outcome = RenderOutcome::Rejected(Rejection::Failed {
            source_url: "https://ex.com/gone".to_string(),
            reason: "Upstream error 404".to_string(),
        });
        let page = render_page(&outcome);

        assert!(page.contains("Failed to render article: Upstream error 404"));
        assert!(page.contains(r#"<a href="https://ex.com/gone" target="_blank" rel="noreferrer">Open at source</a>"#));
    }

    #[test]
    fn test_article_fragment_is_embedded_verbatim() {
        let page = render_page(&rendered(Some("Tram <Lines>"), "<p>Body <em>text</em></p>"));

        assert!(page.contains(r#"<div class="reader-body"><p>Body <em>text</em></p></div>"#));
        assert!(page.contains("<title>Tram &lt;Lines&gt;</title>"));
        assert!(page.contains(r#"<h1 class="reader-title">Tram &lt;Lines&gt;</h1>"#));
        assert!(page.contains("Source: "));
        assert!(page.contains(r#"href="https://ex.com/story?a=1&amp;b=2""#));
        assert!(page.contains(".reader-body blockquote"));
        assert!(page.contains(r#"<a href="/">← Back</a>"#));
    }

    #[test]
    fn test_index_form_targets_reader() {
        let page = render_index();
        assert!(page.contains(r#"action="/read""#));
        assert!(page.contains(r#"name="url""#));
    }

    #[test]
    fn test_title_heading_skipped_when_fragment_has_one() {
        let page = render_page(&rendered(Some("Trams"), "<h1>Trams</h1><p>x</p>"));
        assert!(!page.contains("reader-title\""));
        assert!(page.contains("<title>Trams</title>"));
    }
}
