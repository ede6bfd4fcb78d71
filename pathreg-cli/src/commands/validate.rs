//! `pathreg validate`: check a configuration file without loading it.

use crate::error::CliError;
use crate::utils::{require_file, GlobalOptions};
use clap::Args;
use pathreg::config::{Config, ConfigValidator};
use std::fs;
use std::path::PathBuf;

/// Check that a configuration file parses and describes a consistent set
/// of paths.
#[derive(Args)]
pub struct ValidateCommand {
    /// File to check
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_file(&self.config_path)?;

        let text = fs::read_to_string(&self.config_path)?;
        let config: Config = serde_yaml::from_str(&text).map_err(|e| {
            eprintln!("Parse error: {e}");
            CliError::SemanticFailure(format!("{} is not valid YAML", self.config_path.display()))
        })?;

        if let Err(e) = ConfigValidator::validate(&config) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(format!(
                "{} failed validation",
                self.config_path.display()
            )));
        }

        if !global.quiet {
            let defined = config.paths.as_deref().map_or(0, <[_]>::len);
            println!("Configuration is valid ({defined} paths)");
        }
        Ok(())
    }
}
