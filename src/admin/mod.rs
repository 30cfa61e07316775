//! Interface to run administrative commands against MongoDB.
//!
//! The replica set logic only needs to run commands against the `admin` database.
//! Opening clients is abstracted behind a [`Connector`] so clients can be created
//! on demand and replaced with in-memory implementations in tests.
use std::sync::Arc;

use anyhow::Result;
use mongodb::bson::Document;

mod mongo;

#[cfg(test)]
pub mod fixture;

pub use self::mongo::MongoConnector;

/// Convenience type for heap allocated [`Connection`]s.
pub type ArcedConnection = Arc<dyn Connection>;

/// Client able to run administrative commands.
#[async_trait::async_trait]
pub trait Connection: Send + Sync {
    /// Run a command against the `admin` database and return the server response.
    ///
    /// Commands rejected by the server fail with a [`CommandFailed`] error
    /// so callers can inspect the error code.
    ///
    /// [`CommandFailed`]: crate::errors::CommandFailed
    async fn admin_command(&self, command: Document) -> Result<Document>;
}

/// Open [`Connection`]s to MongoDB given a connection string.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Initialise a new client for the given `mongodb://` URI.
    async fn connect(&self, uri: &str) -> Result<ArcedConnection>;
}

/// Name of the command in a command document, used for reporting.
pub fn command_name(command: &Document) -> String {
    command
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| String::from("<empty>"))
}
