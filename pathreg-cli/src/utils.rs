//! Helpers shared by the subcommands: configuration, registry setup and
//! the JSON shape of an entry.

use crate::error::CliError;
use clap::ValueEnum;
use pathreg::{Config, ConfigBuilder, PathEntry, PathRegistry};
use std::path::{Path, PathBuf};

/// Flags that apply to every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--verbose` was given.
    pub verbose: bool,

    /// `--quiet` was given.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Override the user config directory.
    pub data_dir: Option<PathBuf>,
}

/// Output format shared by the query commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
}

/// Fails with an argument error unless `path` names an existing file.
pub fn require_file(path: &Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::InvalidArguments(format!(
            "no such file: {}",
            path.display()
        )))
    }
}

/// The effective configuration for this invocation.
///
/// `--config` replaces file discovery with a single file; environment
/// overrides are applied either way.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(file) = global.config.as_deref() {
        require_file(file)?;
        builder = builder.with_config_file(file);
    }
    if let Some(dir) = global.data_dir.as_deref() {
        builder = builder.with_data_dir(dir);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Build a registry from the effective configuration.
pub fn open_registry(global: &GlobalOptions) -> Result<PathRegistry, CliError> {
    let config = load_configuration(global)?;
    PathRegistry::from_config(&config).map_err(|e| CliError::Config(e.to_string()))
}

/// JSON view of an entry, with its resolved value or resolution error.
pub fn entry_json(registry: &PathRegistry, entry: &PathEntry) -> serde_json::Value {
    let (resolved, error) = match registry.resolve(entry.name()) {
        Ok(path) => (Some(path), None),
        Err(e) => (None, Some(e.to_string())),
    };
    serde_json::json!({
        "name": entry.name(),
        "path": entry.path(),
        "relative_to": entry.relative_to(),
        "read_only": entry.is_read_only(),
        "resolved": resolved,
        "error": error,
    })
}
