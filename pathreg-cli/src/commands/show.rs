//! Command to show a single path entry.

use crate::error::CliError;
use crate::utils::{entry_json, open_registry, GlobalOptions, OutputFormat};
use clap::Args;

/// Show a path entry: its stored value, relative-to target, flags, and
/// resolved path.
#[derive(Args)]
pub struct ShowCommand {
    /// Name of the registered path
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = open_registry(global)?;
        let entry = registry.get_entry(&self.name)?;

        match self.format {
            OutputFormat::Json => {
                let json = entry_json(&registry, &entry);
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Text => {
                println!("name: {}", entry.name());
                println!("path: {}", entry.path());
                println!("relative_to: {}", entry.relative_to().unwrap_or("-"));
                println!("read_only: {}", entry.is_read_only());
                match registry.resolve(entry.name()) {
                    Ok(resolved) => println!("resolved: {resolved}"),
                    Err(e) => {
                        println!("resolved: -");
                        if !global.quiet {
                            eprintln!("Warning: {e}");
                        }
                    }
                }
                let dependents = registry.dependents(entry.name())?;
                if global.verbose && !dependents.is_empty() {
                    println!("dependents: {}", dependents.join(", "));
                }
            }
        }

        Ok(())
    }
}
