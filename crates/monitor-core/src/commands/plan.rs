//! Read-only preview of a purge.

use serde::Serialize;

use crate::error::PurgeError;
use crate::keys::{self, Record, SCOPES_KEY};
use crate::scope::ScopeName;
use crate::store::MonitorStore;

/// A key registered under a scope and its hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPlan {
    pub key: String,
    pub hosts: Vec<String>,
}

/// What a purge of one scope would remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopePlan {
    pub scope: String,
    /// Whether the scope is a member of `m:scopes`
    pub registered: bool,
    pub keys: Vec<KeyPlan>,
}

impl KeyPlan {
    /// Names a purge deletes for this key, in deletion order.
    pub fn record_names(&self, scope: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .hosts
            .iter()
            .flat_map(|host| {
                Record::ALL
                    .iter()
                    .map(move |record| keys::host_record(scope, &self.key, host, *record))
            })
            .collect();
        names.extend(keys::key_cleanup(scope, &self.key));
        names
    }
}

impl ScopePlan {
    pub fn host_count(&self) -> usize {
        self.keys.iter().map(|key| key.hosts.len()).sum()
    }

    /// Every name a purge would delete, ending with the key registry.
    pub fn record_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .keys
            .iter()
            .flat_map(|key| key.record_names(&self.scope))
            .collect();
        names.push(keys::scope_keys(&self.scope));
        names
    }
}

/// Walks a scope the way a purge would, reading only.
#[derive(Debug)]
pub struct PlanCommand<S> {
    store: S,
}

impl<S: MonitorStore> PlanCommand<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Collect the keys and hosts of `scope`. Keys and hosts are sorted
    /// for display; the store itself returns them in no particular order.
    pub fn execute(&mut self, scope: &ScopeName) -> Result<ScopePlan, PurgeError> {
        let scope_id = scope.as_str();
        let registered = self.store.sismember(SCOPES_KEY, scope_id)?;

        let mut scope_keys = self.store.smembers(&keys::scope_keys(scope_id))?;
        scope_keys.sort();

        let mut plans = Vec::with_capacity(scope_keys.len());
        for key in scope_keys {
            let mut hosts = self.store.smembers(&keys::key_hosts(scope_id, &key))?;
            hosts.sort();
            plans.push(KeyPlan { key, hosts });
        }

        tracing::debug!(scope = %scope, keys = plans.len(), registered, "Planned purge");
        Ok(ScopePlan {
            scope: scope_id.to_string(),
            registered,
            keys: plans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Operation};

    #[test]
    fn plans_sorted_keys_and_hosts() {
        let mut store = MemoryStore::new();
        store
            .register("S", "k2", "h2")
            .register("S", "k2", "h1")
            .register("S", "k1", "h9");

        let plan = PlanCommand::new(&mut store)
            .execute(&ScopeName::parse("S").unwrap())
            .unwrap();

        assert!(plan.registered);
        assert_eq!(
            store.operations()[0],
            Operation {
                command: "SISMEMBER",
                key: "m:scopes".to_string(),
            }
        );
        assert!(
            !store
                .operations()
                .iter()
                .any(|op| op.command == "SMEMBERS" && op.key == "m:scopes")
        );
        assert_eq!(
            plan.keys,
            vec![
                KeyPlan {
                    key: "k1".to_string(),
                    hosts: vec!["h9".to_string()],
                },
                KeyPlan {
                    key: "k2".to_string(),
                    hosts: vec!["h1".to_string(), "h2".to_string()],
                },
            ]
        );
        assert_eq!(plan.host_count(), 3);
    }

    #[test]
    fn record_names_match_purge_order() {
        let plan = KeyPlan {
            key: "k1".to_string(),
            hosts: vec!["h1".to_string()],
        };

        assert_eq!(
            plan.record_names("S"),
            vec![
                "m:S:k1:h1:m",
                "m:S:k1:h1:d",
                "m:S:k1:m",
                "m:S:k1:d",
                "m:S:k1::m",
                "m:S:k1::d",
                "m:S:k1:hosts",
            ]
        );
    }

    #[test]
    fn unregistered_scope_plans_only_registry() {
        let mut store = MemoryStore::new();
        let plan = PlanCommand::new(&mut store)
            .execute(&ScopeName::parse("ghost").unwrap())
            .unwrap();

        assert!(!plan.registered);
        assert!(plan.keys.is_empty());
        assert_eq!(plan.record_names(), vec!["m:ghost:keys".to_string()]);
    }
}
