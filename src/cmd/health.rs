//! Report if the replica set has an elected primary.
use anyhow::Result;
use clap::Args;

use super::ReplicaSetOpt;
use crate::admin::MongoConnector;
use crate::globals::Globals;
use crate::replica_set::ReplicaSet;

/// Check that the replica set has elected a primary.
#[derive(Args, Debug)]
pub struct HealthCli {
    #[command(flatten)]
    pub replica_set: ReplicaSetOpt,
}

/// Execute the `health` command.
pub async fn run(globals: &Globals, cmd: &HealthCli) -> Result<i32> {
    let replica_set = ReplicaSet::new(
        &cmd.replica_set.name,
        globals.instances.clone(),
        MongoConnector,
        globals.logger.clone(),
    )?
    .with_read_preference(cmd.replica_set.read_preference);

    if replica_set.is_healthy().await? {
        eprintln!("Replica set has a primary");
        return Ok(0);
    }
    eprintln!("Replica set has no primary");
    Ok(1)
}
