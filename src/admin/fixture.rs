//! In-memory [`Connector`] scripting MongoDB responses for unit tests.
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;
use mongodb::bson::Document;

use super::command_name;
use super::ArcedConnection;
use super::Connection;
use super::Connector;
use crate::errors::CommandFailed;

/// Scripted outcome of a command.
pub enum Reply {
    Ok(Document),
    Code(i32),
    Fail(&'static str),
}

#[derive(Default)]
struct State {
    commands: Vec<Document>,
    replies: VecDeque<(String, Reply)>,
    uris: Vec<String>,
}

/// Connector returning connections that share one script of replies.
#[derive(Clone, Default)]
pub struct FixtureConnector {
    state: Arc<Mutex<State>>,
}

impl FixtureConnector {
    /// Queue the reply for the next command named `command`.
    pub fn reply(&self, command: &str, reply: Reply) -> &Self {
        let mut state = self.state.lock().unwrap();
        state.replies.push_back((command.to_string(), reply));
        self
    }

    /// Commands issued so far, in order.
    pub fn commands(&self) -> Vec<Document> {
        self.state.lock().unwrap().commands.clone()
    }

    /// Names of the commands issued so far, in order.
    pub fn command_names(&self) -> Vec<String> {
        self.commands().iter().map(command_name).collect()
    }

    /// URIs clients were opened for, in order.
    pub fn uris(&self) -> Vec<String> {
        self.state.lock().unwrap().uris.clone()
    }
}

#[async_trait::async_trait]
impl Connector for FixtureConnector {
    async fn connect(&self, uri: &str) -> Result<ArcedConnection> {
        self.state.lock().unwrap().uris.push(uri.to_string());
        let connection = FixtureConnection {
            state: Arc::clone(&self.state),
        };
        Ok(Arc::new(connection))
    }
}

struct FixtureConnection {
    state: Arc<Mutex<State>>,
}

#[async_trait::async_trait]
impl Connection for FixtureConnection {
    async fn admin_command(&self, command: Document) -> Result<Document> {
        let name = command_name(&command);
        let mut state = self.state.lock().unwrap();
        state.commands.push(command);
        let (expected, reply) = match state.replies.pop_front() {
            Some(next) => next,
            None => panic!("unexpected command '{}'", name),
        };
        assert_eq!(expected, name, "commands issued out of order");
        match reply {
            Reply::Ok(document) => Ok(document),
            Reply::Code(code) => Err(CommandFailed {
                command: name,
                code,
                code_name: String::from("Fixture"),
                message: String::from("scripted failure"),
            }
            .into()),
            Reply::Fail(message) => Err(anyhow::anyhow!(message)),
        }
    }
}
