//! Errors surfaced by the `pathreg` binary and the exit status for each.

use pathreg::Error as LibError;
use thiserror::Error;

/// Failure of a CLI command.
///
/// | status | meaning                                               |
/// |--------|-------------------------------------------------------|
/// | 1      | check failed (validation, cycle, read-only, in use)   |
/// | 3      | no such path entry                                    |
/// | 4      | bad command-line arguments                            |
/// | 5      | I/O                                                   |
/// | 6      | any other registry error                              |
/// | 7      | configuration could not be loaded                     |
#[derive(Debug, Error)]
pub enum CliError {
    /// Error reported by the registry library.
    #[error(transparent)]
    Library(#[from] LibError),

    /// Arguments that parse but make no sense together.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration layers could not be combined into a registry.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A check ran to completion and reported a problem.
    #[error("{0}")]
    SemanticFailure(String),
}

impl CliError {
    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Library(LibError::NotFound { .. }) => 3,
            Self::SemanticFailure(_)
            | Self::Library(
                LibError::CircularDependency { .. }
                | LibError::ReadOnly { .. }
                | LibError::HasDependents { .. },
            ) => 1,
            Self::InvalidArguments(_) => 4,
            Self::Io(_) | Self::Library(LibError::Io(_)) => 5,
            Self::Library(_) => 6,
            Self::Config(_) => 7,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Io(e.into())
    }
}
