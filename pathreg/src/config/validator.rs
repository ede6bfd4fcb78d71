//! Configuration validation.
//!
//! Checks that the path definitions in a configuration could all be added
//! to a registry: names and fragments are well formed, names are unique,
//! every relative-to target is defined, and no chain loops back on itself.

use crate::config::schema::Config;
use crate::entry::PathDefinition;
use crate::error::{Error, Result};
use crate::system;
use std::collections::{HashMap, HashSet};

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use pathreg::config::{Config, ConfigValidator};
/// use pathreg::PathDefinition;
///
/// let config = Config {
///     paths: Some(vec![
///         PathDefinition::absolute("data", "/srv/app"),
///         PathDefinition::relative("logs", "log", "data"),
///     ]),
///     ..Default::default()
/// };
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found:
    /// - a validation error for a bad or duplicate name, a system path name
    ///   redefined while system paths are enabled, or an undefined
    ///   relative-to target
    /// - [`Error::InvalidPathSyntax`] for a malformed path or fragment
    /// - [`Error::CircularDependency`] for a relative-to cycle
    pub fn validate(config: &Config) -> Result<()> {
        let Some(paths) = config.paths.as_deref() else {
            return Ok(());
        };

        let system_paths = config.system_paths.unwrap_or(false);
        let mut seen = HashSet::new();
        for (index, definition) in paths.iter().enumerate() {
            definition.validate()?;
            if system_paths && system::is_system_path(&definition.name) {
                return Err(Error::Validation {
                    field: format!("paths[{index}].name"),
                    message: format!(
                        "'{}' is a system path and cannot be redefined while system_paths is on",
                        definition.name
                    ),
                });
            }
            if !seen.insert(definition.name.as_str()) {
                return Err(Error::Validation {
                    field: format!("paths[{index}].name"),
                    message: format!("duplicate path name '{}'", definition.name),
                });
            }
        }

        for (index, definition) in paths.iter().enumerate() {
            let Some(target) = definition.relative_to.as_deref() else {
                continue;
            };
            let defined = seen.contains(target) || (system_paths && system::is_system_path(target));
            if !defined {
                return Err(Error::Validation {
                    field: format!("paths[{index}].relative_to"),
                    message: format!(
                        "'{}' is relative to undefined path '{target}'",
                        definition.name
                    ),
                });
            }
        }

        Self::validate_acyclic(paths)
    }

    fn validate_acyclic(paths: &[PathDefinition]) -> Result<()> {
        let targets: HashMap<&str, &str> = paths
            .iter()
            .filter_map(|d| Some((d.name.as_str(), d.relative_to.as_deref()?)))
            .collect();

        let mut acyclic: HashSet<&str> = HashSet::new();
        for definition in paths {
            let mut chain = vec![definition.name.as_str()];
            let mut current = definition.name.as_str();
            while let Some(&next) = targets.get(current) {
                if acyclic.contains(next) {
                    break;
                }
                if let Some(start) = chain.iter().position(|name| *name == next) {
                    let mut cycle: Vec<String> =
                        chain[start..].iter().map(|s| (*s).to_string()).collect();
                    cycle.push(next.to_string());
                    return Err(Error::CircularDependency {
                        name: next.to_string(),
                        chain: cycle,
                    });
                }
                chain.push(next);
                current = next;
            }
            acyclic.extend(chain);
        }

        Ok(())
    }
}
