//! Stderr backend for the `log` facade.
//!
//! The registry never prints on its own; it emits records through the `log`
//! macros, mostly at debug level. Front ends pick a verbosity with
//! [`init_logger`] and call [`Logger::install`] once at startup.

use std::env;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Environment variable consulted by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "PATHREG_LOG_MODE";

/// How much the installed logger lets through.
///
/// ```
/// use pathreg::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert_eq!("Verbose".parse::<LogLevel>(), Ok(LogLevel::Verbose));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Nothing is printed.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything down to debug records.
    Verbose,
}

impl LogLevel {
    /// Lowercase name, as accepted by [`LOG_MODE_ENV`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }

    /// The `log` crate filter equivalent to this level.
    #[must_use]
    pub const fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Quiet, Self::Normal, Self::Verbose]
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log mode '{s}' (expected quiet, normal or verbose)"))
    }
}

/// Writes `log` records to stderr as `LEVEL [target] message`.
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// A logger that lets through records permitted by `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured verbosity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Makes this the process-wide `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if another backend was installed earlier.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn render(record: &log::Record<'_>) -> String {
        format!("{:<5} [{}] {}", record.level(), record.target(), record.args())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            let line = Self::render(record);
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Picks a logger from command-line flags, falling back to [`LOG_MODE_ENV`].
///
/// `verbose` wins over `quiet`. An unset or unparsable environment value
/// yields [`LogLevel::Normal`].
///
/// ```
/// use pathreg::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = match (verbose, quiet) {
        (true, _) => LogLevel::Verbose,
        (false, true) => LogLevel::Quiet,
        (false, false) => env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default(),
    };
    Logger::new(level)
}
