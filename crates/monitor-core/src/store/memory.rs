//! In-process store with Redis-like set semantics.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::StoreError;
use crate::keys::{self, Record, SCOPES_KEY};

use super::MonitorStore;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Set(BTreeSet<String>),
    Hash(BTreeMap<String, String>),
    Bytes(Vec<u8>),
}

/// A command issued against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub command: &'static str,
    pub key: String,
}

/// Keyspace held in a `BTreeMap`.
///
/// Mirrors the Redis behavior the commands rely on: reading a missing set
/// yields no members, deleting a missing key counts zero, a set whose last
/// member is removed disappears, and set commands against other types fail
/// with `WRONGTYPE`. Every command through [`MonitorStore`] is recorded and
/// can be made to fail with [`MemoryStore::fail_on`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
    operations: Vec<Operation>,
    failures: Vec<Operation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `member` to the set at `key`.
    pub fn sadd(&mut self, key: impl Into<String>, member: impl Into<String>) -> &mut Self {
        let entry = self
            .entries
            .entry(key.into())
            .or_insert_with(|| Value::Set(BTreeSet::new()));
        match entry {
            Value::Set(members) => {
                members.insert(member.into());
            }
            other => *other = Value::Set(BTreeSet::from([member.into()])),
        }
        self
    }

    /// Set a field of the hash at `key`.
    pub fn hset(
        &mut self,
        key: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let entry = self
            .entries
            .entry(key.into())
            .or_insert_with(|| Value::Hash(BTreeMap::new()));
        match entry {
            Value::Hash(fields) => {
                fields.insert(field.into(), value.into());
            }
            other => *other = Value::Hash(BTreeMap::from([(field.into(), value.into())])),
        }
        self
    }

    /// Store a plain string value at `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.insert(key.into(), Value::Bytes(value.into()));
        self
    }

    /// Register `host` under `scope`/`key` and give it one metric sample,
    /// the same writes the monitor center makes when it first sees a host.
    pub fn register(&mut self, scope: &str, key: &str, host: &str) -> &mut Self {
        self.sadd(SCOPES_KEY, scope)
            .sadd(keys::scope_keys(scope), key)
            .sadd(keys::key_hosts(scope, key), host)
            .hset(keys::host_record(scope, key, host, Record::Metric), "0", "1")
    }

    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Plain string value at `key`, if it holds one.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        match self.entries.get(key) {
            Some(Value::Bytes(value)) => Some(value),
            _ => None,
        }
    }

    /// Members of the set at `key`, without recording an operation.
    pub fn members(&self, key: &str) -> Vec<String> {
        match self.entries.get(key) {
            Some(Value::Set(members)) => members.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// All keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commands issued so far, in order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Fail every later `command` against `key` with [`StoreError::Unavailable`].
    pub fn fail_on(&mut self, command: &'static str, key: impl Into<String>) -> &mut Self {
        self.failures.push(Operation {
            command,
            key: key.into(),
        });
        self
    }

    /// Drop every failure registered with [`MemoryStore::fail_on`].
    pub fn clear_failures(&mut self) -> &mut Self {
        self.failures.clear();
        self
    }

    fn record(&mut self, command: &'static str, key: &str) -> Result<(), StoreError> {
        let operation = Operation {
            command,
            key: key.to_string(),
        };
        let fails = self.failures.contains(&operation);
        self.operations.push(operation);
        if fails {
            return Err(StoreError::Unavailable {
                command,
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

impl MonitorStore for MemoryStore {
    fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        self.record("SMEMBERS", key)?;
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(StoreError::WrongType {
                command: "SMEMBERS",
                key: key.to_string(),
            }),
        }
    }

    fn sismember(&mut self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.record("SISMEMBER", key)?;
        match self.entries.get(key) {
            None => Ok(false),
            Some(Value::Set(members)) => Ok(members.contains(member)),
            Some(_) => Err(StoreError::WrongType {
                command: "SISMEMBER",
                key: key.to_string(),
            }),
        }
    }

    fn delete(&mut self, key: &str) -> Result<u64, StoreError> {
        self.record("DEL", key)?;
        Ok(u64::from(self.entries.remove(key).is_some()))
    }

    fn srem(&mut self, key: &str, member: &str) -> Result<u64, StoreError> {
        self.record("SREM", key)?;
        let removed = match self.entries.get_mut(key) {
            None => return Ok(0),
            Some(Value::Set(members)) => members.remove(member),
            Some(_) => {
                return Err(StoreError::WrongType {
                    command: "SREM",
                    key: key.to_string(),
                });
            }
        };
        if matches!(self.entries.get(key), Some(Value::Set(members)) if members.is_empty()) {
            self.entries.remove(key);
        }
        Ok(u64::from(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smembers_of_missing_key_is_empty() {
        let mut store = MemoryStore::new();
        assert!(store.smembers("m:S:keys").unwrap().is_empty());
    }

    #[test]
    fn smembers_against_string_is_wrongtype() {
        let mut store = MemoryStore::new();
        store.set("m:S:keys", "oops");
        let err = store.smembers("m:S:keys").unwrap_err();
        assert!(matches!(err, StoreError::WrongType { command: "SMEMBERS", .. }));
    }

    #[test]
    fn sismember_checks_one_member() {
        let mut store = MemoryStore::new();
        store.sadd("m:scopes", "S");
        assert!(store.sismember("m:scopes", "S").unwrap());
        assert!(!store.sismember("m:scopes", "T").unwrap());
        assert!(!store.sismember("m:missing", "S").unwrap());

        store.set("m:S:keys", "oops");
        let err = store.sismember("m:S:keys", "k1").unwrap_err();
        assert!(matches!(err, StoreError::WrongType { command: "SISMEMBER", .. }));
    }

    #[test]
    fn delete_counts_removed_keys() {
        let mut store = MemoryStore::new();
        store.set("a", "1");
        assert_eq!(store.delete("a").unwrap(), 1);
        assert_eq!(store.delete("a").unwrap(), 0);
    }

    #[test]
    fn srem_drops_empty_set() {
        let mut store = MemoryStore::new();
        store.sadd("m:scopes", "S");
        assert_eq!(store.srem("m:scopes", "S").unwrap(), 1);
        assert!(!store.exists("m:scopes"));
        assert_eq!(store.srem("m:scopes", "S").unwrap(), 0);
    }

    #[test]
    fn srem_keeps_other_members() {
        let mut store = MemoryStore::new();
        store.sadd("m:scopes", "S").sadd("m:scopes", "T");
        store.srem("m:scopes", "S").unwrap();
        assert_eq!(store.members("m:scopes"), vec!["T".to_string()]);
    }

    #[test]
    fn register_writes_three_registries_and_a_sample() {
        let mut store = MemoryStore::new();
        store.register("S", "k1", "h1");

        assert_eq!(store.members("m:scopes"), vec!["S".to_string()]);
        assert_eq!(store.members("m:S:keys"), vec!["k1".to_string()]);
        assert_eq!(store.members("m:S:k1:hosts"), vec!["h1".to_string()]);
        assert!(store.exists("m:S:k1:h1:m"));
    }

    #[test]
    fn injected_failure_is_recorded_and_returned() {
        let mut store = MemoryStore::new();
        store.set("a", "1").fail_on("DEL", "a");

        let err = store.delete("a").unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { command: "DEL", .. }));
        assert!(store.exists("a"));
        assert_eq!(
            store.operations(),
            &[Operation {
                command: "DEL",
                key: "a".to_string()
            }]
        );
    }

    #[test]
    fn seeding_does_not_record_operations() {
        let mut store = MemoryStore::new();
        store.register("S", "k1", "h1").set("x", "y");
        assert!(store.operations().is_empty());
        assert_eq!(store.len(), 5);
    }
}
