//! Configuration schema definitions.
//!
//! This module defines the configuration structure for pathreg: registry
//! options plus the path definitions to register at startup.

use serde::{Deserialize, Serialize};

use crate::entry::PathDefinition;

/// Complete configuration structure.
///
/// Every field is optional so that configuration can be merged from
/// multiple sources.
///
/// # Examples
///
/// ```
/// use pathreg::config::Config;
///
/// let config: Config = serde_yaml::from_str(r#"
/// cache_resolved: false
/// paths:
///   - name: data
///     path: /srv/app
///   - name: logs
///     path: log
///     relative_to: data
/// "#).unwrap();
///
/// assert_eq!(config.cache_resolved, Some(false));
/// assert_eq!(config.paths.unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cache resolved values per entry (default: true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_resolved: Option<bool>,

    /// Seed the read-only system paths (default: false).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_paths: Option<bool>,

    /// Path definitions, added in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathDefinition>>,
}

impl Config {
    /// Look up a configured definition by name.
    #[must_use]
    pub fn path(&self, name: &str) -> Option<&PathDefinition> {
        self.paths.iter().flatten().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("cache: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_only_definition() {
        let config: Config = serde_yaml::from_str(
            "paths:\n  - name: app.home\n    path: /opt/app\n    read_only: true\n",
        )
        .unwrap();
        let home = config.path("app.home").unwrap();
        assert!(home.read_only);
        assert!(config.path("missing").is_none());
    }

    #[test]
    fn test_serialize_skips_unset() {
        let config = Config {
            system_paths: Some(true),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(yaml.trim(), "system_paths: true");
    }
}
