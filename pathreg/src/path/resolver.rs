//! Resolution strategies for path entries.
//!
//! An entry resolves either as an absolute path or relative to another named
//! entry. The strategy is a tagged variant selected from the entry's
//! relative-to field, never stored independently of it.

use serde::Serialize;

use crate::error::Result;
use crate::path::{normalize, syntax};

/// How a path entry turns its stored `path` into a concrete path.
///
/// # Examples
///
/// ```
/// use pathreg::path::Resolution;
///
/// assert_eq!(Resolution::for_relative_to(None), Resolution::Absolute);
/// assert_eq!(
///     Resolution::for_relative_to(Some("data")).target(),
///     Some("data")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "kebab-case")]
pub enum Resolution {
    /// The stored path is normalized against the working directory.
    Absolute,
    /// The stored path is a fragment appended to the named entry's resolved path.
    RelativeTo(String),
}

impl Resolution {
    /// Select the strategy for an optional relative-to name.
    #[must_use]
    pub fn for_relative_to(relative_to: Option<&str>) -> Self {
        match relative_to {
            Some(target) => Self::RelativeTo(target.to_string()),
            None => Self::Absolute,
        }
    }

    /// The relative-to target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Absolute => None,
            Self::RelativeTo(target) => Some(target),
        }
    }

    /// Whether this is the absolute strategy.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute)
    }

    /// Check that `path` is acceptable under this strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathSyntax`](crate::Error::InvalidPathSyntax)
    /// for an empty absolute path or a malformed relative fragment.
    pub fn check_syntax(&self, path: &str) -> Result<()> {
        match self {
            Self::Absolute if path.is_empty() => Err(crate::Error::invalid_path(
                path,
                "an absolute path must not be empty",
            )),
            Self::Absolute => Ok(()),
            Self::RelativeTo(_) => syntax::convert_fragment(path).map(|_| ()),
        }
    }
}

/// Resolve a path stored under the absolute strategy.
///
/// # Errors
///
/// Returns an error if normalization fails.
pub fn resolve_absolute(path: &str) -> Result<String> {
    normalize::normalize(path)
}

/// Resolve a fragment against its target's already-resolved path.
///
/// # Errors
///
/// Returns an error if the fragment is malformed.
///
/// # Examples
///
/// ```
/// use pathreg::path::resolver::resolve_relative;
///
/// # #[cfg(unix)]
/// # {
/// assert_eq!(resolve_relative("/srv/app", "log").unwrap(), "/srv/app/log");
/// assert_eq!(resolve_relative("/srv/app/", "/log").unwrap(), "/srv/app/log");
/// assert_eq!(resolve_relative("/srv/app", "").unwrap(), "/srv/app");
/// # }
/// ```
pub fn resolve_relative(base: &str, fragment: &str) -> Result<String> {
    let converted = syntax::convert_fragment(fragment)?;
    Ok(syntax::join(base, converted.as_deref()))
}
