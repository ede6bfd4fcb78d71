//! Read-only well-known paths of the host process.

use std::env;
use std::path::Path;

use crate::entry::PathDefinition;

/// The user's home directory.
pub const USER_HOME: &str = "user.home";
/// The process working directory at the time the paths were added.
pub const USER_DIR: &str = "user.dir";
/// The OS temporary directory.
pub const TEMP_DIR: &str = "temp.dir";

/// Whether `name` is one of the system path names.
#[must_use]
pub fn is_system_path(name: &str) -> bool {
    matches!(name, USER_HOME | USER_DIR | TEMP_DIR)
}

/// Read-only definitions for every system path determinable on this host.
///
/// Paths that cannot be determined or are not valid UTF-8 are skipped.
#[must_use]
pub fn definitions() -> Vec<PathDefinition> {
    let candidates = [
        (USER_HOME, home::home_dir()),
        (USER_DIR, env::current_dir().ok()),
        (TEMP_DIR, Some(env::temp_dir())),
    ];

    candidates
        .into_iter()
        .filter_map(|(name, path)| {
            let path = path?;
            let Some(path) = path.to_str() else {
                log::warn!("skipping system path '{name}': not valid UTF-8");
                return None;
            };
            Some(PathDefinition::absolute(name, path).read_only())
        })
        .filter(|definition| Path::new(&definition.path).is_absolute())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_are_read_only_and_absolute() {
        let definitions = definitions();
        assert!(!definitions.is_empty());
        for definition in &definitions {
            assert!(definition.read_only);
            assert!(definition.relative_to.is_none());
            assert!(is_system_path(&definition.name));
        }
    }

    #[test]
    fn test_user_dir_matches_cwd() {
        let cwd = env::current_dir().unwrap();
        let user_dir = definitions()
            .into_iter()
            .find(|d| d.name == USER_DIR)
            .unwrap();
        assert_eq!(Path::new(&user_dir.path), cwd);
    }

    #[test]
    fn test_is_system_path() {
        assert!(is_system_path("temp.dir"));
        assert!(!is_system_path("data"));
    }
}
