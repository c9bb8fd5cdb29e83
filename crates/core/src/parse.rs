//! HTML parsing and DOM queries.
//!
//! [`Document`] wraps a `scraper` parse tree and exposes the few queries the
//! extractors need: CSS selection, document-order traversal and a derived
//! article title.
//!
//! # Example
//!
//! ```rust
//! use folio_core::Document;
//!
//! let html = r#"<html><head><title>Test</title></head><body><p class="lead">Hello</p></body></html>"#;
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! assert_eq!(doc.select("p.lead").unwrap().len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{FolioError, Result};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full document. html5ever never fails; malformed markup is
    /// repaired the way a browser would repair it.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// The underlying `scraper` tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The `<html>` element.
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(Element::from).collect())
    }

    /// First element matching `selector`, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(Element::from))
    }

    /// Every element in document order, starting with `<html>`.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(Element::from)
    }

    /// Content of the `<title>` element, trimmed.
    pub fn title(&self) -> Option<String> {
        let title = self.select_first("title").ok()??.text();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }

    /// Best-guess article title: `og:title`, then `<title>`, then the first `<h1>`.
    pub fn article_title(&self) -> Option<String> {
        let og_title = self
            .select_first(r#"meta[property="og:title"]"#)
            .ok()
            .flatten()
            .and_then(|meta| meta.attr("content").map(|c| c.trim().to_string()))
            .filter(|c| !c.is_empty());

        og_title.or_else(|| self.title()).or_else(|| {
            let h1 = self.select_first("h1").ok()??.text();
            let h1 = h1.trim();
            (!h1.is_empty()).then(|| h1.to_string())
        })
    }

    /// All text nodes of the document concatenated.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| FolioError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A single element in a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Element<'a> {
    /// The wrapped `scraper` reference.
    pub fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Nearest element ancestor.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::from)
    }

    /// Element children in order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.element.children().filter_map(ElementRef::wrap).map(Element::from)
    }

    /// Selects descendants using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(Element::from).collect())
    }
}
