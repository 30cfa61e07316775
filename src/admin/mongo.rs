//! [`Connector`] implementation on top of the official MongoDB driver.
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use mongodb::bson::Document;
use mongodb::error::ErrorKind;
use mongodb::Client;

use super::command_name;
use super::ArcedConnection;
use super::Connection;
use super::Connector;
use crate::errors::CommandFailed;

/// Open clients with the MongoDB driver.
#[derive(Clone, Debug, Default)]
pub struct MongoConnector;

#[async_trait::async_trait]
impl Connector for MongoConnector {
    async fn connect(&self, uri: &str) -> Result<ArcedConnection> {
        let client = Client::with_uri_str(uri)
            .await
            .with_context(|| format!("unable to create MongoDB client for {}", uri))?;
        Ok(Arc::new(MongoConnection { client }))
    }
}

/// Run commands with a MongoDB driver client.
pub struct MongoConnection {
    client: Client,
}

#[async_trait::async_trait]
impl Connection for MongoConnection {
    async fn admin_command(&self, command: Document) -> Result<Document> {
        let name = command_name(&command);
        let admin = self.client.database("admin");
        let selection = admin.selection_criteria().cloned();
        let error = match admin.run_command(command, selection).await {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };
        if let ErrorKind::Command(failure) = error.kind.as_ref() {
            let error = CommandFailed {
                command: name,
                code: failure.code,
                code_name: failure.code_name.clone(),
                message: failure.message.clone(),
            };
            anyhow::bail!(error);
        }
        let error = anyhow::Error::new(error).context(format!("MongoDB command '{}' failed", name));
        Err(error)
    }
}
