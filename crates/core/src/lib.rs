//! Folio turns arbitrary web pages into safe, readable article fragments.
//!
//! The pipeline is linear: [`normalize`] the user's input into an http(s)
//! URL, fetch the page, [`extract`] the main content, [`absolutize`] its
//! links, [`sanitize`] it and [`strip_presentation`]. [`Reader`] runs all of
//! it and [`render_page`] wraps the outcome in a complete HTML document.
//!
//! ```rust,no_run
//! use folio_core::{Reader, ReaderConfig, render_page};
//!
//! # async fn run() -> folio_core::Result<()> {
//! let reader = Reader::new(ReaderConfig::default())?;
//! let outcome = reader.render(Some("example.com/article")).await;
//! println!("{}", render_page(&outcome));
//! # Ok(())
//! # }
//! ```

pub mod absolutize;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod normalize;
pub mod page;
pub mod parse;
pub mod preprocess;
pub mod presentation;
pub mod readability;
pub mod reader;
pub mod sanitize;
pub mod scoring;
pub mod structural;

pub use absolutize::absolutize;
pub use error::{FolioError, Result};
pub use extract::{
    ExtractedFragment, ExtractionStrategy, ExtractionStrategyKind, Extractor, ReadabilityStrategy, StructuralStrategy,
    extract,
};
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::{FetchedPage, Fetcher};
pub use formatters::{JsonConfig, MarkdownConfig, convert_to_json, convert_to_markdown, convert_to_text};
pub use normalize::{NormalizedUrl, normalize};
pub use page::{render_index, render_page};
pub use parse::{Document, Element};
pub use presentation::strip_presentation;
pub use readability::{Readable, ReadabilityConfig, ReadabilityConfigBuilder, extract_readable};
#[cfg(feature = "fetch")]
pub use reader::Reader;
pub use reader::{ReaderConfig, ReaderConfigBuilder, Rejection, RenderOutcome, RenderedArticle, render_html};
#[cfg(feature = "ammonia")]
pub use sanitize::sanitize_strict;
pub use sanitize::{SanitizedFragment, SanitizerStrength, sanitize, sanitize_best_effort};
#[doc(hidden)]
pub use scoring::{ScoreConfig, base_tag_score, class_id_weight, link_density};
pub use structural::{StructuralMatch, extract_structural};
