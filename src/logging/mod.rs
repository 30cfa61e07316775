//! Process logging configured from the command line.
use anyhow::Result;
use clap::Args;
use clap::ValueEnum;
use slog::Logger;

mod logger;

pub use self::logger::null;

/// Verbosity of the logs mongors emits while it waits for instances and manages the set.
///
/// Logs go to standard error unless `--log-file` is given, so they never mix with
/// the JSON status printed on standard output.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only unrecoverable failures.
    Critical,
    /// Errors only.
    Error,
    /// Timeouts and invalid replica set configurations.
    Warning,
    /// Reachable instances and replica set initiation.
    Info,
    /// Every connection attempt and client opened.
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}

impl From<LogLevel> for slog::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical => slog::Level::Critical,
            LogLevel::Error => slog::Level::Error,
            LogLevel::Warning => slog::Level::Warning,
            LogLevel::Info => slog::Level::Info,
            LogLevel::Debug => slog::Level::Debug,
        }
    }
}

/// Logging-related options.
#[derive(Args, Debug)]
pub struct LogOpt {
    /// Emit JSON logs to this file instead of standard error.
    #[arg(long = "log-file", name = "log-file", global = true)]
    file: Option<String>,

    /// Verbosity level for logs.
    #[arg(
        long = "log-level", global = true,
        env = "MONGORS_LOG_LEVEL",
        default_value_t = LogLevel::Warning,
    )]
    level: LogLevel,
}

/// Initialise a logger based on the given CLI arguments.
pub fn configure(opt: &LogOpt) -> Result<Logger> {
    let level = opt.level.clone().into();
    match &opt.file {
        Some(file) => self::logger::file(resolve_home(file)?, level),
        None => Ok(self::logger::terminal(level)),
    }
}

/// Resolve an optional leading `~/` to the current user's HOME path.
fn resolve_home(path: &str) -> Result<String> {
    if !path.starts_with("~/") {
        return Ok(path.to_string());
    }
    let home = match std::env::var("HOME") {
        Err(std::env::VarError::NotPresent) => anyhow::bail!("unable to lookup the $HOME path"),
        Err(std::env::VarError::NotUnicode(_)) => anyhow::bail!("unable to UTF-8 decode $HOME"),
        Ok(home) => home,
    };
    Ok(path.replacen('~', &home, 1))
}
