//! Normalization of paths stored on absolute entries.
//!
//! Absolute entries keep the text the operator wrote. Resolving one turns
//! that text into a concrete path: anything still relative is anchored at
//! the working directory, and `.`/`..` segments are collapsed without
//! touching the filesystem. A `..` at the root stays at the root, so every
//! non-empty path normalizes.

use std::env;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Turn a stored absolute-entry path into its concrete absolute form.
///
/// The text is taken literally: `~` is an ordinary segment. Symlinks are
/// not followed and the result need not exist.
///
/// # Errors
///
/// [`Error::InvalidPathSyntax`] for an empty path, a missing working
/// directory, or a result that is not UTF-8.
///
/// # Examples
///
/// ```no_run
/// use pathreg::path::normalize::normalize;
///
/// assert_eq!(normalize("/srv/./app/../app").unwrap(), "/srv/app");
/// assert_eq!(normalize("/../etc").unwrap(), "/etc");
/// assert!(normalize("relative/dir").unwrap().ends_with("relative/dir"));
/// ```
pub fn normalize(path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(Error::invalid_path(path, "path must not be empty"));
    }

    let stored = Path::new(path);
    let anchored = if stored.is_absolute() {
        stored.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|e| Error::invalid_path(path, format!("no working directory: {e}")))?
            .join(stored)
    };

    collapse(&anchored)
        .into_os_string()
        .into_string()
        .map_err(|_| Error::invalid_path(path, "resolved path is not valid UTF-8"))
}

/// Lexically drops `.` and applies `..`; a `..` with nothing left to pop
/// is discarded.
fn collapse(path: &Path) -> PathBuf {
    let mut anchor = PathBuf::new();
    let mut segments: Vec<&OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                segments.pop();
            }
            Component::Normal(segment) => segments.push(segment),
        }
    }

    anchor.extend(segments);
    anchor
}
