//! Library exports for pathreg-cli.
//!
//! The binary in `main.rs` drives these modules; tests use them to check
//! the command definitions.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
