//! One module per subcommand. Each exposes a clap `Args` struct with an
//! `execute` method taking the global options.

pub mod dependents;
pub mod list;
pub mod resolve;
pub mod show;
pub mod validate;

pub use dependents::DependentsCommand;
pub use list::ListCommand;
pub use resolve::ResolveCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
