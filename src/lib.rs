//! Wait for MongoDB instances to accept connections and ensure they form a replica set.
//!
//! `mongors` is built from two independent pieces composed by the CLI:
//!
//! - The [`probe`] module waits, concurrently and within a global timeout,
//!   for instances to accept TCP connections.
//! - The [`replica_set`] module initiates a replica set, inspects its status and
//!   optionally replaces an invalid configuration.
use anyhow::Result;
use clap::Parser;
use slog::info;

mod cmd;
mod globals;

pub mod admin;
pub mod endpoint;
pub mod errors;
pub mod logging;
pub mod output;
pub mod probe;
pub mod replica_set;

#[cfg(test)]
mod tests;

pub use self::cmd::Cli;
pub use self::errors::InvalidReplicaSet;

use self::globals::Globals;

/// Initialise the mongors process and invoke a command implementation.
///
/// Returns the exit code for the process.
pub async fn run() -> Result<i32> {
    run_with(Cli::parse()).await
}

/// Wait for the instances and run the command selected by already parsed arguments.
pub async fn run_with(cli: Cli) -> Result<i32> {
    let globals = Globals::initialise(cli)?;

    let timeout = globals.cli.timeout;
    let result = self::probe::probe_all(&globals.instances, timeout, &globals.logger).await;
    if !result.all_reachable() {
        let unreachable = result
            .unreachable
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!("Some instances are not up and running: {}", unreachable);
        return Ok(1);
    }
    info!(globals.logger, "All instances are reachable"; "count" => result.reachable.len());
    eprintln!("Instances are ready for replica set.");

    match &globals.cli.command {
        cmd::Command::Ensure(cmd) => cmd::ensure::run(&globals, cmd).await,
        cmd::Command::Health(cmd) => cmd::health::run(&globals, cmd).await,
    }
}
