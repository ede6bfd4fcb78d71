//! Argument grammar of the `pathreg` binary.

use crate::commands::{
    DependentsCommand, ListCommand, ResolveCommand, ShowCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting and resolving logical path registries.
#[derive(Parser)]
#[command(name = "pathreg")]
#[command(version, about = "Inspect and resolve logical path registries", long_about = None)]
pub struct Cli {
    /// Print registry debug records to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print nothing beyond the requested data
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Load path definitions from this file only
    #[arg(long, value_name = "PATH", global = true, env = "PATHREG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the directory holding the user config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "PATHREG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve a registered path, or an ad hoc path
    Resolve(ResolveCommand),

    /// Show a single path entry
    Show(ShowCommand),

    /// List every registered path entry
    List(ListCommand),

    /// List the entries relative to a path
    Dependents(DependentsCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),
}
