//! Command to resolve a registered path or an ad hoc path.

use crate::error::CliError;
use crate::utils::{open_registry, GlobalOptions};
use clap::Args;

/// Resolve a registered path to a concrete filesystem path.
///
/// With `--path`, resolves an unregistered path instead: absolute, or a
/// fragment appended to `--relative-to`.
#[derive(Args)]
pub struct ResolveCommand {
    /// Name of the registered path
    #[arg(value_name = "NAME", conflicts_with = "path", required_unless_present = "path")]
    pub name: Option<String>,

    /// Ad hoc path to resolve
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Resolve --path relative to this registered path
    #[arg(long, value_name = "NAME", requires = "path", conflicts_with = "name")]
    pub relative_to: Option<String>,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = open_registry(global)?;

        let resolved = match (self.name, self.path) {
            (Some(_), _) if self.relative_to.is_some() => {
                return Err(CliError::InvalidArguments(
                    "--relative-to only applies to --path".to_string(),
                ))
            }
            (Some(name), _) => registry.resolve(&name)?,
            (None, Some(path)) => registry.resolve_path(&path, self.relative_to.as_deref())?,
            (None, None) => {
                return Err(CliError::InvalidArguments(
                    "either NAME or --path is required".to_string(),
                ))
            }
        };

        println!("{resolved}");
        Ok(())
    }
}
