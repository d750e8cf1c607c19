//! Purge command implementation.
//!
//! Removes every record of a scope and deregisters it. The walk is strictly
//! sequential: the scope's key registry is read once, then each key's hosts
//! are read and their records deleted, then the key's own records and host
//! registry, and finally the key registry and the `m:scopes` membership.
//!
//! Nothing is transactional. A failed command aborts the walk and leaves
//! whatever was already deleted deleted; running the purge again finishes
//! the job, because deleting an absent key is a no-op.

use std::io::Write;

use serde::Serialize;

use crate::error::{PurgeError, StoreError};
use crate::keys::{self, Record, SCOPES_KEY};
use crate::scope::ScopeName;
use crate::store::MonitorStore;

/// Report from a purge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    /// Scope that was purged
    pub scope: String,
    /// Keys found in the scope's key registry
    pub keys: usize,
    /// Host entries found across all keys
    pub hosts: usize,
    /// Keys the store reported as actually removed
    pub deleted: u64,
    /// Whether the scope was removed from `m:scopes`
    pub deregistered: bool,
}

/// Purge command orchestrator
#[derive(Debug)]
pub struct PurgeCommand<S> {
    store: S,
}

impl<S: MonitorStore> PurgeCommand<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Purge `scope`, writing each key id to `progress` before its records
    /// are deleted.
    pub fn execute<W: Write>(
        &mut self,
        scope: &ScopeName,
        progress: &mut W,
    ) -> Result<PurgeReport, PurgeError> {
        let scope_id = scope.as_str();
        tracing::info!(scope = %scope, "Purging scope");

        let mut report = PurgeReport {
            scope: scope_id.to_string(),
            ..PurgeReport::default()
        };

        let registry = keys::scope_keys(scope_id);
        let scope_keys = self.store.smembers(&registry)?;
        tracing::debug!(scope = %scope, keys = scope_keys.len(), "Read key registry");

        for key in &scope_keys {
            writeln!(progress, "{key}")?;
            progress.flush()?;
            self.purge_key(scope_id, key, &mut report)?;
        }

        report.deleted += self.delete(&registry)?;
        report.deregistered = self.store.srem(SCOPES_KEY, scope_id)? > 0;
        if !report.deregistered {
            tracing::warn!(scope = %scope, "Scope was not registered in {}", SCOPES_KEY);
        }

        tracing::info!(
            scope = %scope,
            keys = report.keys,
            hosts = report.hosts,
            deleted = report.deleted,
            "Scope purged"
        );
        Ok(report)
    }

    fn purge_key(
        &mut self,
        scope: &str,
        key: &str,
        report: &mut PurgeReport,
    ) -> Result<(), PurgeError> {
        let hosts = self.store.smembers(&keys::key_hosts(scope, key))?;

        for host in &hosts {
            for record in Record::ALL {
                report.deleted += self.delete(&keys::host_record(scope, key, host, record))?;
            }
        }

        for name in keys::key_cleanup(scope, key) {
            report.deleted += self.delete(&name)?;
        }

        report.keys += 1;
        report.hosts += hosts.len();
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<u64, StoreError> {
        let removed = self.store.delete(name)?;
        tracing::debug!(key = name, removed, "DEL");
        Ok(removed)
    }
}
