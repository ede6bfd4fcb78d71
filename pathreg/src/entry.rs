//! Path entry data model.
//!
//! A [`PathEntry`] is one named logical path. Its name and read-only flag
//! are fixed at creation; its stored path and relative-to target can be
//! changed through the registry. Values handed out by the registry are
//! snapshots: mutating them never affects registry state.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::{syntax, Resolution};

/// The definition of a path entry as supplied to
/// [`PathRegistry::add`](crate::PathRegistry::add).
///
/// This is also the on-disk shape of an entry in configuration files.
///
/// # Examples
///
/// ```
/// use pathreg::PathDefinition;
///
/// let data = PathDefinition::absolute("data", "/srv/app");
/// let logs = PathDefinition::relative("logs", "log", "data");
/// let home = PathDefinition::absolute("app.home", "/opt/app").read_only();
///
/// assert_eq!(logs.relative_to.as_deref(), Some("data"));
/// assert!(home.read_only);
/// assert!(!data.read_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PathDefinition {
    /// Unique name of the entry.
    pub name: String,

    /// Full path, or fragment when `relative_to` is set.
    pub path: String,

    /// Name of the entry this one is relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_to: Option<String>,

    /// Reject later changes and removal.
    #[serde(default)]
    pub read_only: bool,
}

impl PathDefinition {
    /// Define an absolute entry.
    #[must_use]
    pub fn absolute(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            relative_to: None,
            read_only: false,
        }
    }

    /// Define an entry relative to another named entry.
    #[must_use]
    pub fn relative(
        name: impl Into<String>,
        path: impl Into<String>,
        relative_to: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            relative_to: Some(relative_to.into()),
            read_only: false,
        }
    }

    /// Mark the definition read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Validate the name and the path syntax for the selected strategy.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name (or relative-to name) and
    /// [`Error::InvalidPathSyntax`](crate::Error::InvalidPathSyntax) for a
    /// malformed path.
    pub fn validate(&self) -> Result<()> {
        syntax::validate_name(&self.name)?;
        if let Some(target) = &self.relative_to {
            syntax::validate_name(target)?;
        }
        Resolution::for_relative_to(self.relative_to.as_deref()).check_syntax(&self.path)
    }
}

/// A registered path entry.
///
/// # Examples
///
/// ```
/// use pathreg::{PathDefinition, PathEntry};
///
/// let entry = PathEntry::from(PathDefinition::relative("logs", "log", "data"));
/// assert_eq!(entry.name(), "logs");
/// assert_eq!(entry.relative_to(), Some("data"));
/// assert!(!entry.resolution().is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    name: String,
    path: String,
    resolution: Resolution,
    read_only: bool,
}

impl PathEntry {
    /// The entry's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored path or fragment.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The relative-to target, if the entry is relative.
    #[must_use]
    pub fn relative_to(&self) -> Option<&str> {
        self.resolution.target()
    }

    /// The resolution strategy derived from the relative-to target.
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Whether the entry rejects changes and removal.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Convert back into a definition.
    #[must_use]
    pub fn to_definition(&self) -> PathDefinition {
        PathDefinition {
            name: self.name.clone(),
            path: self.path.clone(),
            relative_to: self.relative_to().map(str::to_string),
            read_only: self.read_only,
        }
    }

    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    /// Swaps the strategy along with the target.
    pub(crate) fn set_relative_to(&mut self, relative_to: Option<&str>) {
        self.resolution = Resolution::for_relative_to(relative_to);
    }
}

impl From<PathDefinition> for PathEntry {
    fn from(definition: PathDefinition) -> Self {
        let resolution = Resolution::for_relative_to(definition.relative_to.as_deref());
        Self {
            name: definition.name,
            path: definition.path,
            resolution,
            read_only: definition.read_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_validate() {
        assert!(PathDefinition::absolute("data", "/srv").validate().is_ok());
        assert!(PathDefinition::absolute("", "/srv").validate().is_err());
        assert!(PathDefinition::absolute("data", "").validate().is_err());
        assert!(PathDefinition::relative("logs", "/", "data")
            .validate()
            .is_err());
        assert!(PathDefinition::relative("logs", "log", " ")
            .validate()
            .is_err());
    }

    #[test]
    fn test_set_relative_to_swaps_strategy() {
        let mut entry = PathEntry::from(PathDefinition::absolute("logs", "log"));
        assert!(entry.resolution().is_absolute());

        entry.set_relative_to(Some("data"));
        assert_eq!(entry.resolution(), &Resolution::RelativeTo("data".into()));

        entry.set_relative_to(None);
        assert!(entry.resolution().is_absolute());
        assert_eq!(entry.relative_to(), None);
    }

    #[test]
    fn test_definition_round_trip_through_entry() {
        let definition = PathDefinition::relative("logs", "log", "data").read_only();
        let entry = PathEntry::from(definition.clone());
        assert_eq!(entry.to_definition(), definition);
    }

    #[test]
    fn test_definition_yaml_defaults() {
        let definition: PathDefinition =
            serde_yaml::from_str("name: data\npath: /srv/app\n").unwrap();
        assert_eq!(definition, PathDefinition::absolute("data", "/srv/app"));

        let bad: std::result::Result<PathDefinition, _> =
            serde_yaml::from_str("name: data\npath: /srv\nrelative: x\n");
        assert!(bad.is_err());
    }
}
