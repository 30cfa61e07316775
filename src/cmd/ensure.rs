//! Initiate the replica set, or check an initiated one, and print its status.
use anyhow::Context;
use anyhow::Result;
use clap::Args;

use super::ReplicaSetOpt;
use crate::admin::MongoConnector;
use crate::globals::Globals;
use crate::replica_set::ReplicaSet;

/// Initiate and return a json status of the replica set.
#[derive(Args, Debug)]
pub struct EnsureCli {
    #[command(flatten)]
    pub replica_set: ReplicaSetOpt,

    /// Reconfigure the replica set if its configuration is invalid.
    #[arg(short = 'r', long = "reconfig")]
    pub reconfig: bool,
}

/// Execute the `ensure` command.
pub async fn run(globals: &Globals, cmd: &EnsureCli) -> Result<i32> {
    let replica_set = ReplicaSet::new(
        &cmd.replica_set.name,
        globals.instances.clone(),
        MongoConnector,
        globals.logger.clone(),
    )?
    .with_read_preference(cmd.replica_set.read_preference);

    let status = replica_set.ensure(cmd.reconfig).await?;
    let status = serde_json::to_string(&status.to_json())
        .context("unable to encode replica set status as JSON")?;
    println!("{}", status);
    eprintln!("Replica set up and running");
    Ok(0)
}
