//! Command to list the entries relative to a path.

use crate::error::CliError;
use crate::utils::{open_registry, GlobalOptions};
use clap::Args;

/// List the entries declaring a path as their relative-to target.
#[derive(Args)]
pub struct DependentsCommand {
    /// Name of the registered path
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Include entries that depend on it through other entries
    #[arg(long)]
    pub transitive: bool,
}

impl DependentsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = open_registry(global)?;

        let mut dependents = if self.transitive {
            registry.transitive_dependents(&self.name)?
        } else {
            registry.dependents(&self.name)?
        };
        dependents.sort();

        if dependents.is_empty() && global.verbose {
            eprintln!("No entries are relative to '{}'", self.name);
        }
        for name in dependents {
            println!("{name}");
        }
        Ok(())
    }
}
