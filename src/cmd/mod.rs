//! CLI interface for the mongors binary.
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;

pub mod ensure;
pub mod health;

use crate::endpoint::Endpoint;
use crate::logging::LogOpt;
use crate::replica_set::ReadPreference;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " [",
    env!("GIT_BUILD_HASH"),
    "; ",
    env!("GIT_BUILD_TAINT"),
    "]",
);

/// Wait for MongoDB instances to be up and ensure they form a replica set.
#[derive(Debug, Parser)]
#[command(about)]
#[command(propagate_version = true)]
#[command(version = VERSION)]
pub struct Cli {
    /// Replica set instances, as host[:port] (port defaults to 27017).
    #[arg(
        short = 'i',
        long = "instance",
        env = "MONGORS_INSTANCES",
        required = true,
        value_delimiter = ','
    )]
    pub instances: Vec<Endpoint>,

    /// Seconds to wait for all instances to accept connections.
    #[arg(
        short = 't',
        long = "timeout",
        env = "MONGORS_TIMEOUT",
        default_value = "10.0",
        value_parser = parse_timeout
    )]
    pub timeout: Duration,

    /// Configure process logging.
    #[command(flatten)]
    pub log: LogOpt,

    /// Select the command to run once all instances are reachable.
    #[command(subcommand)]
    pub command: Command,
}

/// Select the command to run once all instances are reachable.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initiate and return a json status of the replica set.
    Ensure(ensure::EnsureCli),

    /// Check that the replica set has elected a primary.
    Health(health::HealthCli),
}

/// Options shared by commands operating on a replica set.
#[derive(clap::Args, Debug)]
pub struct ReplicaSetOpt {
    /// Name of the replica set.
    pub name: String,

    /// Read preference for the replica set client.
    #[arg(long = "read-preference", default_value_t, value_enum)]
    pub read_preference: ReadPreference,
}

/// Parse a timeout in (fractional) seconds.
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("'{}' is not a valid timeout", value))
}
