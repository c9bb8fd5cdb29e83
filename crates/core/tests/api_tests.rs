//! Library API integration tests
use folio_core::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
}

#[test]
fn test_render_html_article_fixture() {
    let url = NormalizedUrl::parse("https://riverside.example/news/2024/tram").unwrap();
    let article = render_html(&fixture("article.html"), &url);

    assert_eq!(article.strategy, ExtractionStrategyKind::Readability);
    assert_eq!(article.title.as_deref(), Some("City Approves Tram Expansion"));
    assert!(article.html.contains("expand the tram network"));
    assert!(article.html.contains("Business groups welcomed"));

    assert!(article.html.contains(r#"src="https://riverside.example/news/2024/images/tram-depot.jpg""#));
    assert!(article.html.contains(r#"href="https://riverside.example/news/reports/transport-plan.pdf""#));
    assert!(article.html.contains(r#"href="mailto:consult@riverside.example""#));

    for needle in [
        "Trending", "First! This is a comment", "All rights reserved", "<script", "<iframe", "onclick", "onerror",
        "style=", "class=", "data-author-id", "id=",
    ] {
        assert!(!article.html.contains(needle), "{needle} survived");
    }
}

#[test]
fn test_navigation_page_falls_back_to_main() {
    let url = NormalizedUrl::parse("https://ex.com/").unwrap();
    let article = render_html(&fixture("navigation.html"), &url);

    assert_eq!(article.strategy, ExtractionStrategyKind::Structural(StructuralMatch::Main));
    assert!(article.html.contains(r#"href="https://ex.com/post/1""#));
    assert!(!article.html.contains("Footer"));
}

#[test]
fn test_readability_declines_navigation_page() {
    let base = url::Url::parse("https://ex.com/").unwrap();
    assert!(ReadabilityStrategy::default().attempt(&fixture("navigation.html"), &base).is_none());
}

#[test]
fn test_sanitizer_and_stripper_order() {
    let fragment = r#"<div class="c" style="x"><a href="https://ex.com/" onclick="steal()">Link</a></div>"#;
    let sanitized = sanitize(fragment);
    let stripped = strip_presentation(&sanitized.html);

    assert!(!stripped.contains("onclick"));
    assert!(!stripped.contains("class="));
    assert!(!stripped.contains("style="));
    assert!(stripped.contains(r#"href="https://ex.com/""#));
}

#[tokio::test]
async fn test_fetcher_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .and(header("cache-control", "no-cache"))
        .respond_with(html_response("<html><body><p>Hi</p></body></html>"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
    let url = NormalizedUrl::parse(&format!("{}/story", server.uri())).unwrap();
    let page = fetcher.fetch(&url).await.unwrap();

    assert_eq!(page.status, 200);
    assert!(page.content_type.starts_with("text/html"));
    assert!(page.html.contains("<p>Hi</p>"));
    assert_eq!(page.final_url.path(), "/story");
}

#[tokio::test]
async fn test_fetcher_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
    let url = NormalizedUrl::parse(&format!("{}/missing", server.uri())).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(err, FolioError::UpstreamStatus(404)));
    assert_eq!(err.to_string(), "Upstream error 404");
}

#[tokio::test]
async fn test_fetcher_rejects_non_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
    let url = NormalizedUrl::parse(&format!("{}/paper.pdf", server.uri())).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(err.to_string(), "Not an HTML document");
}

#[tokio::test]
async fn test_fetcher_enforces_body_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(&"x".repeat(4096)))
        .mount(&server)
        .await;

    let config = FetchConfig { max_body_bytes: 1024, ..FetchConfig::default() };
    let fetcher = Fetcher::new(config).unwrap();
    let url = NormalizedUrl::parse(&format!("{}/big", server.uri())).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(err, FolioError::ContentTooLarge { limit: 1024 }));
}

#[tokio::test]
async fn test_fetcher_decodes_invalid_utf8_lossily() {
    let server = MockServer::start().await;
    let mut body = b"<p>caf".to_vec();
    body.extend_from_slice(&[0xff, 0xfe]);
    body.extend_from_slice(b"</p>");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
    let url = NormalizedUrl::parse(&server.uri()).unwrap();
    let page = fetcher.fetch(&url).await.unwrap();

    assert!(page.html.contains('\u{FFFD}'));
    assert!(page.html.ends_with("</p>"));
}

#[tokio::test]
async fn test_reader_renders_fixture_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/2024/tram"))
        .respond_with(html_response(&fixture("article.html")))
        .mount(&server)
        .await;

    let reader = Reader::new(ReaderConfig::default()).unwrap();
    let raw = format!("  <{}/news/2024/tram>  ", server.uri());
    let outcome = reader.render(Some(&raw)).await;

    let article = outcome.article().expect("article should render");
    assert_eq!(article.source_url, format!("{}/news/2024/tram", server.uri()));
    assert!(article.html.contains("expand the tram network"));
    assert!(article.html.contains(&format!(r#"src="{}/news/2024/images/tram-depot.jpg""#, server.uri())));

    let page = render_page(&outcome);
    assert!(page.contains(r#"<div class="reader-body">"#));
    assert!(page.contains("Source: "));
}

#[tokio::test]
async fn test_reader_reports_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let reader = Reader::new(ReaderConfig::default()).unwrap();
    let source = format!("{}/down", server.uri());
    let outcome = reader.render(Some(&source)).await;

    assert!(matches!(
        &outcome,
        RenderOutcome::Rejected(Rejection::Failed { source_url, reason })
            if *source_url == source && reason == "Upstream error 503"
    ));

    let page = render_page(&outcome);
    assert!(page.contains("Failed to render article: Upstream error 503"));
    assert!(page.contains("Open at source"));
}

#[tokio::test]
async fn test_reader_invalid_url_never_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response("<p>never</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let reader = Reader::new(ReaderConfig::default()).unwrap();
    let outcome = reader.render(Some("javascript:alert(1)")).await;

    assert!(matches!(outcome, RenderOutcome::Rejected(Rejection::InvalidUrl { .. })));
    assert!(render_page(&outcome).contains("Received: javascript:alert(1)"));
}

#[test]
fn test_output_formats() {
    let url = NormalizedUrl::parse("https://riverside.example/news/2024/tram").unwrap();
    let article = render_html(&fixture("article.html"), &url);

    let text = convert_to_text(&article, true);
    assert!(text.starts_with("City Approves Tram Expansion\n\n"));
    assert!(text.contains("The city council voted on Tuesday"));

    let json = convert_to_json(&article, &JsonConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["strategy"]["kind"], "readability");

    #[cfg(feature = "markdown")]
    {
        let md = convert_to_markdown(&article, &MarkdownConfig::default());
        assert!(md.contains("expand the tram network"));
    }
}

#[tokio::test]
async fn test_reader_reports_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let reader = Reader::new(ReaderConfig::builder().timeout(5).build()).unwrap();
    let url = NormalizedUrl::parse(&format!("http://127.0.0.1:{port}/story")).unwrap();
    let outcome = reader.render_url(&url).await;

    match &outcome {
        RenderOutcome::Rejected(Rejection::Failed { source_url, reason }) => {
            assert_eq!(*source_url, url.to_string());
            assert!(!reason.is_empty());
        }
        other => panic!("expected a fetch failure, got {other:?}"),
    }
    assert!(render_page(&outcome).contains("Failed to render article: "));
}

#[tokio::test]
async fn test_fetcher_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response("<p>late</p>").set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(FetchConfig { timeout: 1, ..Default::default() }).unwrap();
    let url = NormalizedUrl::parse(&format!("{}/slow", server.uri())).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(err, FolioError::Timeout { timeout: 1 }));
    assert_eq!(err.to_string(), "Request timed out after 1 seconds");
}

#[tokio::test]
async fn test_reader_reports_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response("<p>late</p>").set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let reader = Reader::new(ReaderConfig::builder().timeout(1).build()).unwrap();
    let outcome = reader.render(Some(&format!("{}/slow", server.uri()))).await;

    assert_eq!(
        outcome.error_message().as_deref(),
        Some("Failed to render article: Request timed out after 1 seconds")
    );
}
