//! Initiate, inspect and reconfigure a MongoDB replica set.
//!
//! A [`ReplicaSet`] moves through a small set of states:
//!
//! - Members are started without a configuration (uninitiated).
//! - `replSetInitiate` submits the configuration (initiated).
//! - `replSetGetStatus` then reports the set as healthy or the configuration as invalid.
//! - An invalid configuration can be replaced with `replSetReconfig`, when requested.
//!
//! [`ReplicaSet::ensure`] drives a set through these steps.
use std::sync::Arc;

use anyhow::Result;
use mongodb::bson::doc;
use mongodb::bson::Document;
use slog::debug;
use slog::info;
use slog::warn;
use slog::Logger;
use tokio::sync::OnceCell;

use crate::admin::ArcedConnection;
use crate::admin::Connector;
use crate::endpoint::Endpoint;
use crate::errors::AlreadyInitialized;
use crate::errors::CommandFailed;
use crate::errors::ErrorCode;
use crate::errors::InvalidReplicaSet;
use crate::errors::NoMembers;

mod config;
mod status;
mod uri;


pub use self::config::ReplicaSetConfig;
pub use self::status::ReplicaSetStatus;
pub use self::uri::ReadPreference;

/// A MongoDB replica set and the clients used to manage it.
///
/// Clients are opened on first use and reused for the lifetime of the instance.
pub struct ReplicaSet {
    name: String,
    members: Vec<Endpoint>,
    read_preference: ReadPreference,
    connector: Arc<dyn Connector>,
    logger: Logger,
    client: OnceCell<ArcedConnection>,
    admin_client: OnceCell<ArcedConnection>,
}

impl ReplicaSet {
    /// Manage the replica set `name` made of the given members.
    ///
    /// Administrative commands are sent to the first member.
    pub fn new<S, C>(
        name: S,
        members: Vec<Endpoint>,
        connector: C,
        logger: Logger,
    ) -> Result<Self>
    where
        S: Into<String>,
        C: Connector + 'static,
    {
        let name = name.into();
        if members.is_empty() {
            anyhow::bail!(NoMembers { replica_set: name });
        }
        let logger = logger.new(slog::o!("replica_set" => name.clone()));
        Ok(ReplicaSet {
            name,
            members,
            read_preference: ReadPreference::default(),
            connector: Arc::new(connector),
            logger,
            client: OnceCell::new(),
            admin_client: OnceCell::new(),
        })
    }

    /// Route reads from the replica set client according to `read_preference`.
    pub fn with_read_preference(mut self, read_preference: ReadPreference) -> Self {
        self.read_preference = read_preference;
        self
    }

    /// Client connected to the whole replica set.
    pub async fn client(&self) -> Result<ArcedConnection> {
        let client = self
            .client
            .get_or_try_init(|| async {
                let uri = self::uri::replica_set_uri(
                    &self.name,
                    &self.members,
                    self.read_preference,
                );
                debug!(self.logger, "Opening replica set client"; "uri" => &uri);
                self.connector.connect(&uri).await
            })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Client connected directly to the first member of the replica set.
    pub async fn admin_client(&self) -> Result<ArcedConnection> {
        let client = self
            .admin_client
            .get_or_try_init(|| async {
                let uri = self::uri::admin_uri(&self.members[0]);
                debug!(self.logger, "Opening admin client"; "uri" => &uri);
                self.connector.connect(&uri).await
            })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Configuration to submit for this replica set.
    ///
    /// Members are assigned ids in order, starting at 0.
    pub fn config(&self) -> ReplicaSetConfig {
        ReplicaSetConfig::new(&self.name, &self.members)
    }

    /// Submit the replica set configuration with `replSetInitiate`.
    ///
    /// Fails with [`AlreadyInitialized`] if the member already has a configuration.
    pub async fn initiate(&self) -> Result<()> {
        let config = self.config().to_document()?;
        let admin = self.admin_client().await?;
        info!(self.logger, "Initiating replica set"; "members" => self.members.len());
        let result = admin.admin_command(doc! {"replSetInitiate": config}).await;
        match result {
            Ok(_) => Ok(()),
            Err(error) => match error_code(&error) {
                Some(ErrorCode::AlreadyInitialized) => {
                    anyhow::bail!(AlreadyInitialized::new(&self.name))
                }
                _ => Err(error),
            },
        }
    }

    /// Fetch the replica set status with `replSetGetStatus`.
    ///
    /// Fails with [`InvalidReplicaSet`] if the configuration is not valid.
    pub async fn status(&self) -> Result<ReplicaSetStatus> {
        let admin = self.admin_client().await?;
        let result = admin.admin_command(doc! {"replSetGetStatus": 1}).await;
        match result {
            Ok(status) => Ok(ReplicaSetStatus::from(status)),
            Err(error) => match error_code(&error) {
                Some(ErrorCode::InvalidReplicaSetConfig) => {
                    anyhow::bail!(InvalidReplicaSet::new(&self.name))
                }
                _ => Err(error),
            },
        }
    }

    /// Replace the replica set configuration with `replSetReconfig`.
    ///
    /// Forced reconfigurations submit the initial version and let the server pick a
    /// new one. Otherwise the current version is looked up and incremented, as the
    /// server only accepts increasing versions. A set whose configuration is invalid
    /// reports no version so the initial one is submitted.
    pub async fn reconfig(&self, force: bool) -> Result<Document> {
        let mut config = self.config();
        if !force {
            let current = match self.status().await {
                Ok(status) => status.config_version(),
                Err(error) if error.is::<InvalidReplicaSet>() => None,
                Err(error) => return Err(error),
            };
            if let Some(current) = current {
                config = config.with_version(next_version(current)?);
            }
        }
        let admin = self.admin_client().await?;
        warn!(
            self.logger,
            "Reconfiguring replica set";
            "force" => force,
            "version" => config.version,
        );
        let config = config.to_document()?;
        admin
            .admin_command(doc! {"replSetReconfig": config, "force": force})
            .await
    }

    /// Make sure the replica set is initiated and return its status.
    ///
    /// Initiation is always attempted first because querying the status of a set
    /// that was never initiated blocks until the client gives up looking for a primary.
    /// If the configuration is invalid it is forcefully replaced when `reconfig` is set,
    /// otherwise [`InvalidReplicaSet`] is returned.
    pub async fn ensure(&self, reconfig: bool) -> Result<ReplicaSetStatus> {
        match self.initiate().await {
            Ok(()) => {
                info!(self.logger, "Replica set initiated");
                return self.status().await;
            }
            Err(error) if error.is::<AlreadyInitialized>() => {
                debug!(self.logger, "Replica set already initiated, checking status");
            }
            Err(error) => return Err(error),
        }

        let error = match self.status().await {
            Ok(status) => return Ok(status),
            Err(error) => error,
        };
        if !reconfig || !error.is::<InvalidReplicaSet>() {
            return Err(error);
        }

        warn!(self.logger, "Replica set configuration is invalid");
        self.reconfig(true).await?;
        self.status().await
    }

    /// Check if the replica set has elected a primary.
    ///
    /// Unlike other operations this uses the replica set client.
    pub async fn is_healthy(&self) -> Result<bool> {
        let client = self.client().await?;
        let status = client
            .admin_command(doc! {"replSetGetStatus": 1})
            .await
            .map(ReplicaSetStatus::from)?;
        Ok(status.has_primary())
    }
}

/// Version to submit after the current `configVersion`.
fn next_version(current: i64) -> Result<i32> {
    i32::try_from(current)
        .ok()
        .and_then(|version| version.checked_add(1))
        .ok_or_else(|| {
            anyhow::anyhow!("replica set config version {} can't be incremented", current)
        })
}

/// Classify errors reported by the server, if the error came from the server.
fn error_code(error: &anyhow::Error) -> Option<ErrorCode> {
    error.downcast_ref::<CommandFailed>().map(CommandFailed::error_code)
}
