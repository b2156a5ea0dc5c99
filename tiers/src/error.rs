//! Error types for the tiers library.
//!
//! Every failure the library reports is a variant of [`Error`]. Callers can
//! either log the human-readable message or branch on [`Error::kind`] and
//! inspect the structured [`Error::details`] tree.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use thiserror::Error;

use crate::format::Format;
use crate::tree::{Tree, Value};

/// Result type alias for operations that may fail with a tiers error.
///
/// # Examples
///
/// ```
/// use tiers::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tiers library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file was missing, unreadable, or unwritable.
    #[error("{}", file_access_message(.path.as_ref(), .reason))]
    FileAccess {
        /// The file involved, when one was known.
        path: Option<PathBuf>,
        /// Why the file could not be accessed.
        reason: String,
    },

    /// A configuration document could not be parsed or serialized.
    #[error("{}", format_message(*.format, .path.as_ref(), .message))]
    Format {
        /// The format being read or written.
        format: Format,
        /// The file involved, when one was known.
        path: Option<PathBuf>,
        /// Description of the underlying failure.
        message: String,
    },

    /// Required configuration keys were missing.
    #[error("missing required configuration keys: {}", .missing_keys.join(", "))]
    Validation {
        /// Every required dotted path that could not be resolved.
        missing_keys: Vec<String>,
        /// Keys whose values were present but invalid.
        invalid_values: IndexMap<String, String>,
    },

    /// A write passed through a segment holding a non-tree value.
    #[error("cannot set '{path}': '{segment}' is not a section (found {found})")]
    StructuralConflict {
        /// The dotted path being written.
        path: String,
        /// The prefix of the path that holds the non-tree value.
        segment: String,
        /// Type name of the value found at `segment`.
        found: &'static str,
    },

    /// A dotted path was malformed.
    #[error("invalid key '{path}': {reason}")]
    InvalidPath {
        /// The offending key.
        path: String,
        /// Why the key was rejected.
        reason: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File could not be read or written.
    FileAccess,
    /// Document could not be parsed or serialized.
    Format,
    /// Required keys were missing or values invalid.
    Validation,
    /// A dotted path was malformed or conflicted with the tree's shape.
    Structure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess => write!(f, "file access"),
            Self::Format => write!(f, "format"),
            Self::Validation => write!(f, "validation"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

fn file_access_message(path: Option<&PathBuf>, reason: &str) -> String {
    match path {
        Some(path) => format!("cannot access config file {}: {reason}", path.display()),
        None => format!("config file error: {reason}"),
    }
}

fn format_message(format: Format, path: Option<&PathBuf>, message: &str) -> String {
    match path {
        Some(path) => format!("invalid {format} in {}: {message}", path.display()),
        None => format!("invalid {format}: {message}"),
    }
}

impl Error {
    /// Build a file access error for `path`.
    pub(crate) fn file_access(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::FileAccess {
            path: Some(path.into()),
            reason: reason.to_string(),
        }
    }

    /// Build a validation error listing missing keys.
    #[must_use]
    pub fn missing(missing_keys: Vec<String>) -> Self {
        Self::Validation {
            missing_keys,
            invalid_values: IndexMap::new(),
        }
    }

    /// Returns the coarse kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiers::{Error, ErrorKind};
    ///
    /// let err = Error::missing(vec!["app.name".to_string()]);
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileAccess { .. } => ErrorKind::FileAccess,
            Self::Format { .. } => ErrorKind::Format,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::StructuralConflict { .. } | Self::InvalidPath { .. } => ErrorKind::Structure,
        }
    }

    /// The human-readable message, identical to the `Display` output.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured details about the failure.
    ///
    /// Keys used: `file_path`, `format_type`, `missing_keys`,
    /// `invalid_values`, `path`, and `segment`. Only the keys relevant to the
    /// variant are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiers::Error;
    ///
    /// let err = Error::missing(vec!["a".to_string(), "b.c".to_string()]);
    /// let details = err.details();
    /// let keys = details.get("missing_keys").unwrap().as_sequence().unwrap();
    /// assert_eq!(keys.len(), 2);
    /// ```
    #[must_use]
    pub fn details(&self) -> Tree {
        let mut details = Tree::new();
        match self {
            Self::FileAccess { path, .. } => {
                if let Some(path) = path {
                    details.insert("file_path", path.display().to_string());
                }
            }
            Self::Format { format, path, .. } => {
                details.insert("format_type", format.to_string());
                if let Some(path) = path {
                    details.insert("file_path", path.display().to_string());
                }
            }
            Self::Validation {
                missing_keys,
                invalid_values,
            } => {
                if !missing_keys.is_empty() {
                    let keys = missing_keys.iter().cloned().map(Value::from).collect();
                    details.insert("missing_keys", Value::Sequence(keys));
                }
                if !invalid_values.is_empty() {
                    let values: Tree = invalid_values
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                        .collect();
                    details.insert("invalid_values", values);
                }
            }
            Self::StructuralConflict { path, segment, .. } => {
                details.insert("path", path.as_str());
                details.insert("segment", segment.as_str());
            }
            Self::InvalidPath { path, .. } => {
                details.insert("path", path.as_str());
            }
        }
        details
    }

    /// The missing keys of a validation error; empty for other kinds.
    #[must_use]
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::Validation { missing_keys, .. } => missing_keys,
            _ => &[],
        }
    }

    /// Check if the error concerns a file that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileAccess { reason, .. } if reason.contains("does not exist"))
    }
}
