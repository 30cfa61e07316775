//! Errors returned by `mongors` operations.
//!
//! Functions return [`anyhow::Result`] and callers that need to react to specific
//! failures look for these types with [`anyhow::Error::downcast_ref`].

/// MongoDB error code returned when `replSetInitiate` runs on an initiated node.
pub const CODE_ALREADY_INITIALIZED: i32 = 23;

/// MongoDB error code returned when the replica set configuration is not valid.
pub const CODE_INVALID_REPLICA_SET_CONFIG: i32 = 93;

/// Known MongoDB error codes the replica set logic reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// The node already has a replica set configuration.
    AlreadyInitialized,

    /// The replica set configuration is not valid for the node.
    InvalidReplicaSetConfig,

    /// Any other error code.
    Other(i32),
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            CODE_ALREADY_INITIALIZED => ErrorCode::AlreadyInitialized,
            CODE_INVALID_REPLICA_SET_CONFIG => ErrorCode::InvalidReplicaSetConfig,
            code => ErrorCode::Other(code),
        }
    }
}

/// The replica set was already initiated.
#[derive(Debug, thiserror::Error)]
#[error("replica set '{replica_set}' is already initialized")]
pub struct AlreadyInitialized {
    pub replica_set: String,
}

impl AlreadyInitialized {
    /// The replica set was already initiated.
    pub fn new<S: Into<String>>(replica_set: S) -> Self {
        Self {
            replica_set: replica_set.into(),
        }
    }
}

/// An administrative command was rejected by the MongoDB server.
#[derive(Debug, thiserror::Error)]
#[error("MongoDB command '{command}' failed with code {code} ({code_name}): {message}")]
pub struct CommandFailed {
    pub command: String,
    pub code: i32,
    pub code_name: String,
    pub message: String,
}

impl CommandFailed {
    /// Classify the numeric error code returned by the server.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }
}

/// An instance address could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid instance address '{input}': {reason}")]
pub struct InvalidEndpoint {
    pub input: String,
    pub reason: &'static str,
}

/// The replica set configuration is not valid.
#[derive(Debug, thiserror::Error)]
#[error("replica set '{replica_set}' has an invalid configuration")]
pub struct InvalidReplicaSet {
    pub replica_set: String,
}

impl InvalidReplicaSet {
    /// The replica set configuration is not valid.
    pub fn new<S: Into<String>>(replica_set: S) -> Self {
        Self {
            replica_set: replica_set.into(),
        }
    }
}

/// A replica set needs at least one member.
#[derive(Debug, thiserror::Error)]
#[error("replica set '{replica_set}' has no members")]
pub struct NoMembers {
    pub replica_set: String,
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn classify_known_codes() {
        assert_eq!(ErrorCode::from(23), ErrorCode::AlreadyInitialized);
        assert_eq!(ErrorCode::from(93), ErrorCode::InvalidReplicaSetConfig);
        assert_eq!(ErrorCode::from(13), ErrorCode::Other(13));
    }
}
