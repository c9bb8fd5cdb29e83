//! URL normalization for untrusted reader input.
//!
//! Users paste links in every imaginable shape: wrapped in quotes or angle
//! brackets, percent-encoded (sometimes twice), scheme-relative, missing the
//! scheme entirely, with a `http:/` typo, or base64-encoded by some share
//! widget. [`normalize`] repairs what it can and hands back a
//! [`NormalizedUrl`] whose scheme is guaranteed to be `http` or `https`.
//!
//! # Example
//!
//! ```rust
//! use folio_core::normalize;
//!
//! let url = normalize("  \"https://example.com/a b\"  ").unwrap();
//! assert_eq!(url.as_str(), "https://example.com/a%20b");
//!
//! assert!(normalize("not a url at all").is_none());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use percent_encoding::percent_decode_str;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use url::Url;

use crate::{FolioError, Result};

static SINGLE_SLASH_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?):/([^/]|$)").expect("single-slash scheme pattern"));

static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z][a-z0-9+.-]*):").expect("scheme prefix pattern"));

static BARE_HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(www\.)?\S+\.\S{2,}").expect("bare hostname pattern"));

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// An absolute `http`/`https` URL produced by [`normalize`].
///
/// Keeps the accepted candidate string verbatim alongside its parsed form, so
/// `as_str()` is exactly what the user meant (e.g. no trailing slash is added
/// to a bare host) while `url()` is available for relative resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    candidate: String,
    url: Url,
}

impl NormalizedUrl {
    /// Normalizes `input`, returning [`FolioError::InvalidUrl`] on rejection.
    pub fn parse(input: &str) -> Result<Self> {
        normalize(input).ok_or_else(|| FolioError::InvalidUrl(input.to_string()))
    }

    /// The accepted URL string.
    pub fn as_str(&self) -> &str {
        &self.candidate
    }

    /// The parsed URL, used as the base for relative links.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_string(self) -> String {
        self.candidate
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.candidate)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.candidate
    }
}

impl FromStr for NormalizedUrl {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Turns arbitrary user input into a validated absolute http(s) URL.
///
/// Returns `None` when nothing usable can be recovered; callers must treat
/// that as "invalid URL" and must not fetch anything. This function never
/// panics and never returns a partially repaired URL.
pub fn normalize(input: &str) -> Option<NormalizedUrl> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unquoted = unwrap_pair(unwrap_quotes(trimmed), '<', '>');
    let candidate = repair(unquoted);

    match Url::parse(&candidate) {
        Ok(url) => accept(candidate, url),
        Err(_) => from_base64(&candidate),
    }
}

/// Steps 2 through 7: decoding, scheme repairs and whitespace encoding.
fn repair(value: &str) -> String {
    let mut candidate = value.to_string();
    for _ in 0..2 {
        if let Some(decoded) = decode_uri_component(&candidate) {
            candidate = decoded;
        }
    }

    let mut candidate: String = candidate.nfc().collect();

    if candidate.starts_with("//") {
        candidate = format!("https:{candidate}");
    }

    let candidate = SINGLE_SLASH_SCHEME.replacen(&candidate, 1, "${1}://${2}");
    let candidate = WHITESPACE_RUN.replace_all(&candidate, " ");
    let candidate = candidate.trim().replace(' ', "%20");

    if !has_scheme(&candidate) && BARE_HOSTNAME.is_match(&candidate) {
        format!("https://{candidate}")
    } else {
        candidate
    }
}

fn accept(candidate: String, url: Url) -> Option<NormalizedUrl> {
    match url.scheme() {
        "http" | "https" => Some(NormalizedUrl { candidate, url }),
        _ => None,
    }
}

/// Last resort for share links that carry the target URL base64-encoded.
fn from_base64(candidate: &str) -> Option<NormalizedUrl> {
    let bytes = [STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(candidate).ok())?;
    let decoded = String::from_utf8_lossy(&bytes).into_owned();
    let url = Url::parse(&decoded).ok()?;
    tracing::debug!(url = %decoded, "accepted base64-encoded url");
    accept(decoded, url)
}

/// True when `value` starts with a URI scheme. A dotted prefix such as
/// `example.com:8080` is a host and port, not a scheme.
fn has_scheme(value: &str) -> bool {
    SCHEME_PREFIX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .is_some_and(|scheme| !scheme.as_str().contains('.'))
}

/// Strips one layer of double or single quotes, not both.
fn unwrap_quotes(value: &str) -> &str {
    let unquoted = unwrap_pair(value, '"', '"');
    if unquoted.len() != value.len() { unquoted } else { unwrap_pair(value, '\'', '\'') }
}

/// Strips one layer of `open…close` wrapping.
fn unwrap_pair(value: &str, open: char, close: char) -> &str {
    if value.len() >= open.len_utf8() + close.len_utf8() && value.starts_with(open) && value.ends_with(close) {
        &value[open.len_utf8()..value.len() - close.len_utf8()]
    } else {
        value
    }
}

/// Strict percent-decoding: a stray `%` or a non-UTF-8 result is a failure.
fn decode_uri_component(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(value).decode_utf8().ok().map(Cow::into_owned)
}
