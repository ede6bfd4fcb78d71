//! Error types for the pathreg library.
//!
//! This module provides the error hierarchy for every registry operation,
//! using `thiserror` for ergonomic error handling. A change that a
//! pre-commit callback defers is not an error; see
//! [`ChangeOutcome`](crate::registry::ChangeOutcome).

use thiserror::Error;

/// Result type alias for operations that may fail with a pathreg error.
///
/// # Examples
///
/// ```
/// use pathreg::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/srv/app".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathreg library.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced path name is not registered.
    #[error("path entry '{name}' not found")]
    NotFound {
        /// The missing path name.
        name: String,
    },

    /// A path with the same name is already registered.
    #[error("path entry '{name}' already exists")]
    AlreadyExists {
        /// The duplicate path name.
        name: String,
    },

    /// The entry was registered read-only and cannot be changed or removed.
    #[error("path '{name}' is read-only")]
    ReadOnly {
        /// The read-only path name.
        name: String,
    },

    /// The entry cannot be removed while other entries are relative to it.
    #[error("cannot remove path '{name}': it has dependents [{}]", dependents.join(", "))]
    HasDependents {
        /// The path name whose removal was refused.
        name: String,
        /// Every entry still declaring `name` as its relative-to target.
        dependents: Vec<String>,
    },

    /// A path value or fragment is malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPathSyntax {
        /// The offending path or fragment.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A relative-to chain loops back on itself.
    #[error("circular relative-to chain for '{name}': {}", chain.join(" -> "))]
    CircularDependency {
        /// The entry at which the cycle was detected.
        name: String,
        /// The chain of names forming the cycle.
        chain: Vec<String>,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file is not a valid configuration document.
    #[error("configuration error in {}: {source}", path.display())]
    Configuration {
        /// The file that failed to parse.
        path: std::path::PathBuf,
        /// The parser's complaint.
        #[source]
        source: serde_yaml::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error reports a missing path entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathreg::Error;
    ///
    /// let err = Error::NotFound { name: "data".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error was caused by a read-only entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathreg::Error;
    ///
    /// let err = Error::ReadOnly { name: "app.home".to_string() };
    /// assert!(err.is_read_only());
    /// ```
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly { .. })
    }

    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPathSyntax {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = Error::not_found("logs");
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("logs"));
        assert!(err.is_not_found());
        assert!(!err.is_read_only());
    }

    #[test]
    fn test_already_exists_error() {
        let err = Error::AlreadyExists {
            name: "data".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("already exists"));
        assert!(display.contains("data"));
    }

    #[test]
    fn test_read_only_error() {
        let err = Error::ReadOnly {
            name: "app.home".to_string(),
        };
        assert_eq!(format!("{err}"), "path 'app.home' is read-only");
        assert!(err.is_read_only());
    }

    #[test]
    fn test_has_dependents_lists_every_dependent() {
        let err = Error::HasDependents {
            name: "data".to_string(),
            dependents: vec!["logs".to_string(), "tmp".to_string()],
        };
        let display = format!("{err}");
        assert!(display.contains("data"));
        assert!(display.contains("[logs, tmp]"));
    }

    #[test]
    fn test_invalid_path_syntax_error() {
        let err = Error::invalid_path("/", "a bare separator is not a relative path");
        let display = format!("{err}");
        assert!(display.contains("invalid path '/'"));
        assert!(display.contains("bare separator"));
    }

    #[test]
    fn test_circular_dependency_error() {
        let err = Error::CircularDependency {
            name: "a".to_string(),
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert!(format!("{err}").contains("a -> b -> a"));
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "paths[0].name".to_string(),
            message: "must be non-empty".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("paths[0].name"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Err(Error::not_found("missing"))
        }

        assert!(returns_result().is_err());
    }
}
