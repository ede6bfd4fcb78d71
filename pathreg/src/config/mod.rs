//! Registry settings and startup path definitions, read from YAML.
//!
//! [`ConfigBuilder`] stacks the layers below, strongest first, and checks
//! the result with [`ConfigValidator`] before anything is registered:
//!
//! | layer                                  | set by                        |
//! |----------------------------------------|-------------------------------|
//! | programmatic                           | [`ConfigBuilder::with_config`] |
//! | environment                            | `PATHREG_*` variables          |
//! | private project file                   | `pathreg.local.yaml`           |
//! | project file                           | `pathreg.yaml`                 |
//! | user file                              | `~/.pathreg/config.yaml`       |
//!
//! Anything left unset falls back to the registry defaults.
//!
//! # Examples
//!
//! Discover files from a project directory and open a registry:
//!
//! ```no_run
//! use pathreg::config::ConfigBuilder;
//! use pathreg::PathRegistry;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir("/path/to/project")
//!     .build()
//!     .unwrap();
//!
//! let registry = PathRegistry::from_config(&config).unwrap();
//! println!("{} paths", registry.len());
//! ```
//!
//! Definitions supplied in code, with files and environment ignored:
//!
//! ```
//! use pathreg::config::{Config, ConfigBuilder};
//! use pathreg::PathDefinition;
//!
//! let custom = Config {
//!     paths: Some(vec![
//!         PathDefinition::absolute("data", "/srv/app"),
//!         PathDefinition::relative("logs", "log", "data"),
//!     ]),
//!     ..Config::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.paths.unwrap().len(), 2);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::Config;
pub use validator::ConfigValidator;
