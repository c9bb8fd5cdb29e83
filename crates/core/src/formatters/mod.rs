//! Alternative renderings of a [`crate::RenderedArticle`].
//!
//! The reader page is the primary output; these serve the CLI and callers that
//! want the article outside a browser.

pub mod json;
pub mod markdown;
pub mod text;

pub use json::{JsonConfig, convert_to_json};
pub use markdown::{MarkdownConfig, convert_to_markdown};
pub use text::convert_to_text;
