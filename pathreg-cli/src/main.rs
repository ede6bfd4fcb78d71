//! Main entry point for the pathreg CLI.
//!
//! It loads path definitions from configuration into a registry and
//! answers queries about them:
//! - `resolve`: Resolve a registered or ad hoc path
//! - `show`: Show a single path entry
//! - `list`: List every registered path entry
//! - `dependents`: List the entries relative to a path
//! - `validate`: Validate a configuration file

use clap::Parser;
use pathreg_cli::cli::{Cli, Command};
use pathreg_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route registry log records to stderr at the requested verbosity
    let logger = pathreg::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Command::Resolve(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Dependents(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
