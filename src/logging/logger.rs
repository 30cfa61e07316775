use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use anyhow::Result;
use slog::o;
use slog::Discard;
use slog::Drain;
use slog::FnValue;
use slog::Level;
use slog::Logger;
use slog::Record;

/// A logger to discard all messages.
pub fn null() -> Logger {
    Logger::root(Discard, o!())
}

/// A logger appending JSON encoded events to a file, one per line.
pub fn file(path: String, level: Level) -> Result<Logger> {
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Unable to open log file at {}", path))?;
    let drain = slog_json::Json::new(writer)
        .set_newlines(true)
        .set_flush(true)
        .set_pretty(false)
        .add_default_keys()
        .build();
    let drain = Mutex::new(drain).filter_level(level).ignore_res();
    Ok(Logger::root(
        drain,
        o!(
            "module" => FnValue(|rinfo : &Record| rinfo.module()),
        ),
    ))
}

/// A logger writing human readable events to standard error.
///
/// Standard output is reserved for command results.
pub fn terminal(level: Level) -> Logger {
    let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build();
    let drain = Mutex::new(drain).filter_level(level).ignore_res();
    Logger::root(drain, o!())
}
