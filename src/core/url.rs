//! URL path and site URL types.
//!
//! - `UrlPath`: root-relative path, always decoded (human-readable)
//! - `SiteUrl`: absolute base URL; turns paths into `loc` values
//!
//! Paths are decoded internally and percent-encoded only when an absolute
//! URL is produced.

use std::borrow::Borrow;
use std::sync::{Arc, OnceLock};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters escaped inside a single path segment (RFC 3986 unreserved kept).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

// ============================================================================
// UrlPath
// ============================================================================

/// Decoded root-relative URL path
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - No query string, no fragment, no empty segments
/// - No trailing slash, except for the root path `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Create from a decoded path. Normalizes slashes, strips query/fragment.
    pub fn new(decoded: &str) -> Self {
        let trimmed = decoded.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Self::root();
        }

        // Leading slash first: `foo:bar` must not parse as a URL scheme
        let collapsed = collapse_slashes(&format!("/{trimmed}"));
        let path = Self::strip_query_fragment(&collapsed);

        let without_trailing = path.trim_end_matches('/');
        if without_trailing.is_empty() {
            return Self::root();
        }

        Self(Arc::from(without_trailing))
    }

    /// Create from a percent-encoded path (decodes, then normalizes).
    pub fn from_encoded(encoded: &str) -> Self {
        // Strip query string before decoding so an encoded `?` survives
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_decoded_path(&decoded)
    }

    /// Normalize a path whose query/fragment has already been removed.
    fn from_decoded_path(path: &str) -> Self {
        let collapsed = collapse_slashes(path.trim());
        let trimmed = collapsed.trim_matches('/');
        if trimmed.is_empty() {
            Self::root()
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    /// Strip query string and fragment from a path using url crate.
    ///
    /// Also resolves `.` and `..` segments.
    fn strip_query_fragment(path: &str) -> String {
        // Use a dummy base URL to parse the path
        static BASE: OnceLock<url::Url> = OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").expect("static base URL"));

        match base.join(path) {
            Ok(parsed) => {
                // url crate returns percent-encoded path, decode it
                percent_decode_str(parsed.path())
                    .decode_utf8()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| parsed.path().to_string())
            }
            // Fallback to simple split if url parsing fails
            Err(_) => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode for URLs (percent-encode non-ASCII and reserved characters).
    pub fn to_encoded(&self) -> String {
        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Check if this is the root path `/`.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }

    /// Non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Check if path starts with the given prefix.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Prepend a single segment: `/posts/42` + `fr` → `/fr/posts/42`.
    pub fn with_prefix(&self, segment: &str) -> Self {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            return self.clone();
        }
        if self.is_root() {
            Self(Arc::from(format!("/{segment}")))
        } else {
            Self(Arc::from(format!("/{segment}{}", self.0)))
        }
    }

    /// Append a relative path under this one.
    pub fn join(&self, child: &str) -> Self {
        Self::new(&format!("{}/{}", self.0, child.trim_start_matches('/')))
    }
}

/// Replace runs of `/` with a single `/`.
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for UrlPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

// ============================================================================
// SiteUrl
// ============================================================================

/// Errors when parsing the configured site URL.
#[derive(Debug, Error)]
pub enum SiteUrlError {
    #[error("invalid site url: {0}")]
    Parse(#[from] url::ParseError),

    #[error("site url must use http or https, got `{0}`")]
    Scheme(String),

    #[error("site url has no host")]
    MissingHost,
}

/// Absolute base URL of the site (`scheme://host[:port][/prefix]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    /// `scheme://host[:port]`
    origin: Arc<str>,
    /// Path prefix without trailing slash (empty for root deployments)
    prefix: Arc<str>,
}

impl SiteUrl {
    pub const DEFAULT: &'static str = "http://localhost";

    pub fn parse(raw: &str) -> Result<Self, SiteUrlError> {
        let parsed = url::Url::parse(raw.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SiteUrlError::Scheme(parsed.scheme().to_string()));
        }
        if parsed.host_str().is_none() {
            return Err(SiteUrlError::MissingHost);
        }

        let origin = parsed.origin().ascii_serialization();
        let prefix = parsed.path().trim_end_matches('/');
        Ok(Self {
            origin: Arc::from(origin),
            prefix: Arc::from(prefix),
        })
    }

    /// Base URL as configured, without trailing slash.
    pub fn base(&self) -> String {
        format!("{}{}", self.origin, self.prefix)
    }

    /// Absolute URL for a root-relative path.
    pub fn absolute(&self, path: &UrlPath) -> String {
        if path.is_root() {
            format!("{}{}/", self.origin, self.prefix)
        } else {
            format!("{}{}{}", self.origin, self.prefix, path.to_encoded())
        }
    }

    /// Path of an absolute URL on this site, `None` for other origins.
    pub fn relative_path(&self, absolute: &str) -> Option<UrlPath> {
        let parsed = url::Url::parse(absolute).ok()?;
        if parsed.origin().ascii_serialization() != *self.origin {
            return None;
        }
        let path = parsed.path();
        let rest = path.strip_prefix(self.prefix.as_ref())?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        Some(UrlPath::from_encoded(rest))
    }
}

impl Default for SiteUrl {
    fn default() -> Self {
        Self {
            origin: Arc::from(Self::DEFAULT),
            prefix: Arc::from(""),
        }
    }
}

impl std::fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.origin, self.prefix)
    }
}
