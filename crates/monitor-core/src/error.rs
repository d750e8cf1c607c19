//! Error types for store access and scope maintenance.

use thiserror::Error;

/// Failures reported by a [`MonitorStore`](crate::store::MonitorStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No sentinel could name (or hand out a connection to) the primary.
    #[error("failed to resolve primary '{master}' via sentinels [{endpoints}]")]
    Discovery {
        master: String,
        endpoints: String,
        #[source]
        source: redis::RedisError,
    },

    /// A command against the primary failed.
    #[error("{command} {key} failed")]
    Command {
        command: &'static str,
        key: String,
        #[source]
        source: redis::RedisError,
    },

    /// A set command hit a key holding another type.
    #[error("{command} {key}: WRONGTYPE operation against a key holding the wrong kind of value")]
    WrongType { command: &'static str, key: String },

    /// The store refused the command (connection lost, injected failure).
    #[error("{command} {key}: store unavailable")]
    Unavailable { command: &'static str, key: String },
}

/// Failures of the purge and plan commands.
#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("invalid scope '{0}': expected 1-16 characters of [A-Za-z0-9._-]")]
    InvalidScope(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write progress")]
    Progress(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_names_command_and_key() {
        let err = StoreError::Unavailable {
            command: "DEL",
            key: "m:S:keys".to_string(),
        };
        assert_eq!(err.to_string(), "DEL m:S:keys: store unavailable");
    }

    #[test]
    fn purge_error_is_transparent_over_store_errors() {
        let err = PurgeError::from(StoreError::WrongType {
            command: "SMEMBERS",
            key: "m:S:keys".to_string(),
        });
        assert!(err.to_string().starts_with("SMEMBERS m:S:keys: WRONGTYPE"));
    }
}
