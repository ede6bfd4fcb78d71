//! Syntax rules for path names and relative fragments.

use std::path::MAIN_SEPARATOR;

use crate::error::{Error, Result};

/// Maximum length of a path entry name.
pub const MAX_NAME_LEN: usize = 255;

/// Validate a path entry name.
///
/// Names must be non-empty after trimming, contain no NUL bytes, and be at
/// most [`MAX_NAME_LEN`] bytes long.
///
/// # Errors
///
/// Returns [`Error::Validation`] describing the first rule violated.
///
/// # Examples
///
/// ```
/// use pathreg::path::syntax::validate_name;
///
/// assert!(validate_name("jboss.server.log.dir").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    let message = if name.trim().is_empty() {
        "cannot be empty or only whitespace"
    } else if name.contains('\0') {
        "cannot contain null bytes"
    } else if name.len() > MAX_NAME_LEN {
        "cannot exceed 255 characters"
    } else {
        return Ok(());
    };

    Err(Error::Validation {
        field: format!("name '{name}'"),
        message: message.to_string(),
    })
}

/// Check whether `path` uses the Windows drive-letter absolute form (`X:\...`).
///
/// # Examples
///
/// ```
/// use pathreg::path::syntax::is_drive_absolute;
///
/// assert!(is_drive_absolute("C:\\data"));
/// assert!(!is_drive_absolute("data\\C:\\x"));
/// ```
#[must_use]
pub fn is_drive_absolute(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), Some('\\')) if letter.is_ascii_alphabetic()
    )
}

/// Convert a relative fragment to the form appended to its target.
///
/// - An empty fragment yields `None`: the entry resolves to its target.
/// - A leading `/` is stripped; a bare `/` is rejected.
/// - The drive-letter absolute form is rejected.
/// - The separator foreign to the host is replaced by the host separator.
///
/// # Errors
///
/// Returns [`Error::InvalidPathSyntax`] for a bare separator or a
/// drive-letter absolute path.
///
/// # Examples
///
/// ```
/// use pathreg::path::syntax::convert_fragment;
///
/// assert_eq!(convert_fragment("").unwrap(), None);
/// assert!(convert_fragment("/").is_err());
/// assert!(convert_fragment("C:\\logs").is_err());
/// # #[cfg(unix)]
/// # {
/// assert_eq!(convert_fragment("/log").unwrap().as_deref(), Some("log"));
/// # }
/// ```
pub fn convert_fragment(fragment: &str) -> Result<Option<String>> {
    if fragment.is_empty() {
        return Ok(None);
    }

    let stripped = if let Some(rest) = fragment.strip_prefix('/') {
        if rest.is_empty() {
            return Err(Error::invalid_path(
                fragment,
                "a bare separator is not a valid relative path",
            ));
        }
        rest
    } else if is_drive_absolute(fragment) {
        return Err(Error::invalid_path(
            fragment,
            "a drive-letter absolute path cannot be used relative to another path",
        ));
    } else {
        fragment
    };

    let foreign = if MAIN_SEPARATOR == '/' { '\\' } else { '/' };
    Ok(Some(stripped.replace(foreign, &MAIN_SEPARATOR.to_string())))
}

/// Join a resolved base path and a converted fragment.
///
/// A trailing separator on `base` is not doubled.
///
/// # Examples
///
/// ```
/// use pathreg::path::syntax::join;
///
/// # #[cfg(unix)]
/// # {
/// assert_eq!(join("/srv/app", Some("log")), "/srv/app/log");
/// assert_eq!(join("/", Some("log")), "/log");
/// assert_eq!(join("/srv/app", None), "/srv/app");
/// # }
/// ```
#[must_use]
pub fn join(base: &str, fragment: Option<&str>) -> String {
    match fragment {
        None => base.to_string(),
        Some(fragment) if base.ends_with(MAIN_SEPARATOR) => format!("{base}{fragment}"),
        Some(fragment) => format!("{base}{MAIN_SEPARATOR}{fragment}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_rules() {
        assert!(validate_name("data").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("a\0b").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_bare_separator_rejected() {
        let err = convert_fragment("/").unwrap_err();
        assert!(matches!(err, Error::InvalidPathSyntax { ref path, .. } if path == "/"));
    }

    #[test]
    fn test_drive_letter_rejected() {
        assert!(convert_fragment("D:\\logs").is_err());
        assert!(convert_fragment("d:\\").is_err());
        // Only the absolute form at the start is reserved.
        assert!(convert_fragment("logs\\D:\\x").is_ok());
        assert!(convert_fragment("1:\\x").is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn test_leading_slash_stripped_once() {
        assert_eq!(convert_fragment("/log").unwrap().as_deref(), Some("log"));
        assert_eq!(convert_fragment("//log").unwrap().as_deref(), Some("/log"));
    }

    #[test]
    #[cfg(unix)]
    fn test_foreign_separator_replaced() {
        assert_eq!(
            convert_fragment("a\\b\\c").unwrap().as_deref(),
            Some("a/b/c")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_join_collapses_trailing_separator() {
        assert_eq!(join("/srv/app/", Some("log")), "/srv/app/log");
        assert_eq!(join("/srv/app", Some("log/x")), "/srv/app/log/x");
    }
}
