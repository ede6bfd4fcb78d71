//! `PATHREG_*` variables layered over the merged configuration files.
//!
//! Only the boolean switches can be set this way. Path definitions always
//! come from files or programmatic overrides.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Overrides [`Config::cache_resolved`].
pub const CACHE_RESOLVED_ENV: &str = "PATHREG_CACHE_RESOLVED";
/// Overrides [`Config::system_paths`].
pub const SYSTEM_PATHS_ENV: &str = "PATHREG_SYSTEM_PATHS";

type Switch = fn(&mut Config) -> &mut Option<bool>;

fn cache_resolved(config: &mut Config) -> &mut Option<bool> {
    &mut config.cache_resolved
}

fn system_paths(config: &mut Config) -> &mut Option<bool> {
    &mut config.system_paths
}

const SWITCHES: [(&str, Switch); 2] = [
    (CACHE_RESOLVED_ENV, cache_resolved),
    (SYSTEM_PATHS_ENV, system_paths),
];

/// Reads configuration switches from the process environment.
///
/// ```no_run
/// use pathreg::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config)?;
/// # Ok::<(), pathreg::Error>(())
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Replaces each switch whose variable is set. Unset variables leave
    /// the configured value alone.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] naming the variable when its value is not a
    /// recognized boolean.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        for (var, field) in SWITCHES {
            if let Ok(raw) = env::var(var) {
                *field(config) = Some(Self::parse_bool(var, &raw)?);
            }
        }
        Ok(())
    }

    fn parse_bool(var: &str, raw: &str) -> Result<bool> {
        const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];
        const FALSY: [&str; 4] = ["false", "0", "no", "off"];

        let value = raw.trim();
        if TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value)) {
            Ok(true)
        } else if FALSY.iter().any(|f| f.eq_ignore_ascii_case(value)) {
            Ok(false)
        } else {
            Err(Error::Validation {
                field: var.into(),
                message: format!("'{raw}' is not a boolean (use true/false, 1/0, yes/no or on/off)"),
            })
        }
    }
}
