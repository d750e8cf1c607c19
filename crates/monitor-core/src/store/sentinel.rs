//! Redis primary resolved through Sentinel.

use redis::sentinel::{Sentinel, SentinelNodeConnectionInfo};
use redis::{Commands, Connection, RedisConnectionInfo, RedisError};

use crate::config::{Endpoint, SentinelConfig};
use crate::error::StoreError;

use super::MonitorStore;

/// Blocking connection to the current primary of a Sentinel-managed
/// deployment.
///
/// The primary is resolved once in [`SentinelStore::connect`]. A failover
/// during the run surfaces as a command error; no reconnect is attempted.
pub struct SentinelStore {
    master: String,
    conn: Connection,
}

impl SentinelStore {
    /// Ask the configured sentinels for `config.master` and connect to it.
    pub fn connect(config: &SentinelConfig) -> Result<Self, StoreError> {
        let urls: Vec<String> = config.endpoints.iter().map(Endpoint::url).collect();
        tracing::info!(
            master = %config.master,
            sentinels = %config.endpoint_list(),
            "Resolving primary"
        );

        let mut sentinel = Sentinel::build(urls).map_err(|e| discovery_error(config, e))?;
        let node = SentinelNodeConnectionInfo {
            redis_connection_info: Some(RedisConnectionInfo {
                db: config.db.unwrap_or(0),
                password: config.password.clone(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let client = sentinel
            .master_for(&config.master, Some(&node))
            .map_err(|e| discovery_error(config, e))?;
        let conn = client
            .get_connection()
            .map_err(|e| discovery_error(config, e))?;

        tracing::debug!(master = %config.master, "Connected to primary");
        Ok(Self {
            master: config.master.clone(),
            conn,
        })
    }

    /// Name of the monitored master this store is connected to.
    pub fn master(&self) -> &str {
        &self.master
    }
}

fn discovery_error(config: &SentinelConfig, source: RedisError) -> StoreError {
    StoreError::Discovery {
        master: config.master.clone(),
        endpoints: config.endpoint_list(),
        source,
    }
}

fn command_error(command: &'static str, key: &str) -> impl FnOnce(RedisError) -> StoreError {
    let key = key.to_string();
    move |source| StoreError::Command {
        command,
        key,
        source,
    }
}

impl MonitorStore for SentinelStore {
    fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        let members: Vec<String> = self
            .conn
            .smembers(key)
            .map_err(command_error("SMEMBERS", key))?;
        Ok(members)
    }

    fn sismember(&mut self, key: &str, member: &str) -> Result<bool, StoreError> {
        let found: bool = self
            .conn
            .sismember(key, member)
            .map_err(command_error("SISMEMBER", key))?;
        Ok(found)
    }

    fn delete(&mut self, key: &str) -> Result<u64, StoreError> {
        let removed: u64 = self.conn.del(key).map_err(command_error("DEL", key))?;
        Ok(removed)
    }

    fn srem(&mut self, key: &str, member: &str) -> Result<u64, StoreError> {
        let removed: u64 = self
            .conn
            .srem(key, member)
            .map_err(command_error("SREM", key))?;
        Ok(removed)
    }
}
