//! `pathreg list`: every registered entry with its resolved value.

use crate::error::CliError;
use crate::utils::{entry_json, open_registry, GlobalOptions, OutputFormat};
use clap::Args;
use pathreg::{PathEntry, PathRegistry};
use std::io::Write;

/// Column headers for text output.
const COLUMN_HEADERS: [&str; 5] = ["name", "path", "relative_to", "read_only", "resolved"];

/// List every registered path entry.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "PATHREG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Only list entries relative to this path
    #[arg(long, value_name = "NAME")]
    pub filter_relative_to: Option<String>,
}

impl ListCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = open_registry(global)?;

        let mut entries = registry.entries();
        if let Some(target) = self.filter_relative_to.as_deref() {
            entries.retain(|e| e.relative_to() == Some(target));
        }

        match self.format {
            OutputFormat::Text => format_as_table(&registry, &entries),
            OutputFormat::Json => format_as_json(&registry, &entries),
        }
    }
}

fn format_as_table(registry: &PathRegistry, entries: &[PathEntry]) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", COLUMN_HEADERS.join("\t").to_uppercase())?;

    for entry in entries {
        let resolved = registry.resolve(entry.name());
        let row = [
            entry.name(),
            entry.path(),
            entry.relative_to().unwrap_or("-"),
            if entry.is_read_only() { "true" } else { "false" },
            resolved.as_deref().unwrap_or("-"),
        ];
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

fn format_as_json(registry: &PathRegistry, entries: &[PathEntry]) -> Result<(), CliError> {
    let rows: Vec<serde_json::Value> = entries.iter().map(|e| entry_json(registry, e)).collect();
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &rows)?;
    writeln!(out)?;
    Ok(())
}
