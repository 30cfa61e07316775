//! Replica set configuration document submitted to MongoDB.
use anyhow::Context;
use anyhow::Result;
use mongodb::bson::Document;
use serde::Serialize;

use crate::endpoint::Endpoint;

/// Version of freshly generated configurations.
pub const INITIAL_VERSION: i32 = 1;

/// Configuration of a replica set, as expected by `replSetInitiate` and `replSetReconfig`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReplicaSetConfig {
    #[serde(rename = "_id")]
    pub id: String,
    pub members: Vec<MemberConfig>,
    pub version: i32,
}

/// A single replica set member in a [`ReplicaSetConfig`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MemberConfig {
    #[serde(rename = "_id")]
    pub id: i32,
    pub host: String,
}

impl ReplicaSetConfig {
    /// Configuration listing members in the given order with ids starting at 0.
    pub fn new(name: &str, members: &[Endpoint]) -> ReplicaSetConfig {
        let members = members
            .iter()
            .enumerate()
            .map(|(index, member)| MemberConfig {
                id: index as i32,
                host: member.to_string(),
            })
            .collect();
        ReplicaSetConfig {
            id: name.to_string(),
            members,
            version: INITIAL_VERSION,
        }
    }

    /// Same configuration with a different version.
    pub fn with_version(mut self, version: i32) -> ReplicaSetConfig {
        self.version = version;
        self
    }

    /// Encode the configuration as a BSON document.
    pub fn to_document(&self) -> Result<Document> {
        mongodb::bson::to_document(self)
            .with_context(|| format!("unable to encode configuration of replica set '{}'", self.id))
    }
}
