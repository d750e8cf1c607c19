//! Store capability used by the maintenance commands.
//!
//! The commands only need a handful of set/key primitives from the store, so
//! they are written against [`MonitorStore`] rather than a Redis
//! connection. [`SentinelStore`] talks to the live primary;
//! [`MemoryStore`] keeps everything in process.

pub mod memory;
pub mod sentinel;

pub use memory::{MemoryStore, Operation};
pub use sentinel::SentinelStore;

use crate::error::StoreError;

/// Blocking access to the monitor keyspace.
pub trait MonitorStore {
    /// Members of the set at `key`; empty when the key does not exist.
    fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Whether `member` belongs to the set at `key`.
    fn sismember(&mut self, key: &str, member: &str) -> Result<bool, StoreError>;

    /// Remove `key`, returning how many keys were removed (0 or 1).
    fn delete(&mut self, key: &str) -> Result<u64, StoreError>;

    /// Remove `member` from the set at `key`, returning how many members
    /// were removed (0 or 1).
    fn srem(&mut self, key: &str, member: &str) -> Result<u64, StoreError>;
}

impl<S: MonitorStore + ?Sized> MonitorStore for &mut S {
    fn smembers(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        (**self).smembers(key)
    }

    fn sismember(&mut self, key: &str, member: &str) -> Result<bool, StoreError> {
        (**self).sismember(key, member)
    }

    fn delete(&mut self, key: &str) -> Result<u64, StoreError> {
        (**self).delete(key)
    }

    fn srem(&mut self, key: &str, member: &str) -> Result<u64, StoreError> {
        (**self).srem(key, member)
    }
}
