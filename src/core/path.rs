//! Route path type for type-safe routing keys.
//!
//! - Internal representation: always decoded, no leading or trailing `/`
//! - Browser boundary: decode on input ([`RoutePath::from_location`]), encode on output

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::route::RouteError;

/// Normalized route path (routing key)
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Never starts or ends with `/`; the root route is the empty path
/// - No empty, `.` or `..` segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(Arc<str>);

impl RoutePath {
    /// The root route (`""`).
    pub fn root() -> Self {
        Self(Arc::from(""))
    }

    /// Parse a route path supplied at registration time.
    ///
    /// Surrounding whitespace and slashes are trimmed. Query strings,
    /// fragments and malformed segments are rejected.
    pub fn new(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_matches('/');

        if trimmed.contains(['?', '#']) {
            return Err(RouteError::InvalidArgument(format!(
                "route path '{path}' must not contain a query string or fragment"
            )));
        }

        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(RouteError::InvalidArgument(format!(
                    "route path '{path}' contains an empty or relative segment"
                )));
            }
        }

        Ok(Self(Arc::from(trimmed)))
    }

    /// Create from a browser location (decode percent-encoding, strip query and fragment).
    ///
    /// Never fails: dot segments are resolved and empty segments dropped.
    pub fn from_location(encoded: &str) -> Self {
        let path = Self::strip_query_fragment(encoded.trim());
        let joined = path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(Arc::from(joined))
    }

    /// Lenient normalization for lookup keys.
    ///
    /// Lookups never fail: a string that could not have been registered maps
    /// to a key that is simply absent.
    #[inline]
    pub(crate) fn lookup_key(path: &str) -> &str {
        path.trim().trim_matches('/')
    }

    /// Strip query string and fragment from a location using the url crate.
    fn strip_query_fragment(location: &str) -> String {
        use percent_encoding::percent_decode_str;

        // Use a dummy base URL to parse the location
        static BASE: std::sync::OnceLock<Option<url::Url>> = std::sync::OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").ok());

        let joined = base.as_ref().and_then(|base| {
            // A leading `//` (or `\\`) would make the first segment a host
            let absolute = format!("/{}", location.trim_start_matches(['/', '\\']));
            base.join(&absolute).ok()
        });

        match joined {
            Some(parsed) => percent_decode_str(parsed.path())
                .decode_utf8()
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| parsed.path().to_string()),
            // Fallback to simple split if url parsing fails
            None => location
                .split(['?', '#'])
                .next()
                .unwrap_or(location)
                .to_string(),
        }
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the root route.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the path segments (none for the root route).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Append parameter segments to this path.
    ///
    /// `greet` + `["bob"]` -> `greet/bob`
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> Self {
        let mut out = self.0.to_string();
        for segment in segments {
            let segment = segment.as_ref().trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(segment);
        }
        Self(Arc::from(out))
    }

    /// Split into the first `n` segments and the remaining ones.
    pub fn split_at(&self, n: usize) -> (Self, Vec<String>) {
        let segments: Vec<&str> = self.segments().collect();
        let n = n.min(segments.len());
        let head = Self(Arc::from(segments[..n].join("/")));
        let tail = segments[n..].iter().map(|s| s.to_string()).collect();
        (head, tail)
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
        self.segments()
            .map(|segment| utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RoutePath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoutePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for RoutePath {
    type Error = RouteError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoutePath {
    type Error = RouteError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl PartialEq<str> for RoutePath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for RoutePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for RoutePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoutePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
