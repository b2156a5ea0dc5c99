//! Dotted key parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A key such as `server.port`, split into its segments.
///
/// Segments are never empty and never contain `.`. The empty key is the
/// root path and has no segments.
///
/// # Examples
///
/// ```
/// use tiers::tree::DottedPath;
///
/// let path = DottedPath::parse("server.tls.cert").unwrap();
/// assert_eq!(path.segments(), ["server", "tls", "cert"]);
/// assert_eq!(path.prefix(2), "server.tls");
///
/// assert!(DottedPath::parse("").unwrap().is_root());
/// assert!(DottedPath::parse("server..port").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    /// Splits `key` on `.`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if any segment is empty, as in
    /// `a..b`, `.a`, or `a.`.
    pub fn parse(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Ok(Self::root());
        }
        let segments: Vec<String> = key.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::InvalidPath {
                path: key.to_string(),
                reason: "empty segment".to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// Builds a path from pre-split segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if a segment is empty or contains `.`.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if let Some(bad) = segments.iter().find(|s| s.is_empty() || s.contains('.')) {
            return Err(Error::InvalidPath {
                path: segments.join("."),
                reason: format!("invalid segment '{bad}'"),
            });
        }
        Ok(Self { segments })
    }

    /// The root path.
    #[must_use]
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// The first `n` segments joined back with `.`.
    #[must_use]
    pub fn prefix(&self, n: usize) -> String {
        self.segments[..n.min(self.segments.len())].join(".")
    }

    /// A new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }
}

impl FromStr for DottedPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
