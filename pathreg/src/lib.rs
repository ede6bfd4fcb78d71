#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathreg
//!
//! A registry of named logical filesystem paths.
//!
//! Entries are either absolute or relative to another named entry, and
//! resolving an entry walks its relative-to chain. Changes to an entry run a
//! two-phase protocol: interested parties can veto an update in a
//! pre-commit phase by requiring a reload or restart, and are notified once
//! the change has been committed.
//!
//! ## Core Types
//!
//! - [`PathRegistry`]: the registry service
//! - [`PathDefinition`] and [`PathEntry`]: what gets registered
//! - [`PathCallback`], [`ChangeContext`], and [`TransactionContext`]: the
//!   change protocol
//! - [`Config`] and [`ConfigBuilder`]: loading definitions from YAML
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathreg::{OperationContext, PathDefinition, PathRegistry};
//!
//! let registry = PathRegistry::new();
//! registry.add(PathDefinition::absolute("data", "/srv/app")).unwrap();
//! registry.add(PathDefinition::relative("logs", "log", "data")).unwrap();
//!
//! let mut context = OperationContext::new();
//! registry.change_path("logs", "logs/current", &mut context).unwrap();
//! assert_eq!(registry.get_entry("logs").unwrap().path(), "logs/current");
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod path;
pub mod registry;
pub mod system;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use entry::{PathDefinition, PathEntry};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::Resolution;
pub use registry::{
    CallbackHandle, ChangeContext, ChangeOutcome, OperationContext, PathCallback, PathEvent,
    PathRegistry, RegistryOptions, Requirement, TransactionContext,
};
