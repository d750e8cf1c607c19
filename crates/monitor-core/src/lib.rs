//! Monitor Core Library
//!
//! Maintenance operations for the monitor center's Redis keyspace: the
//! `m:<scope>:...` naming convention, the store capability the commands
//! need, and the purge/plan commands that walk a scope's key tree.

pub mod commands;
pub mod config;
pub mod error;
pub mod keys;
pub mod scope;
pub mod store;

/// Re-exports of commonly used types
pub mod prelude {
    // Commands
    pub use crate::commands::{
        KeyPlan, PlanCommand, PurgeCommand, PurgeReport, ScopePlan,
    };

    // Configuration
    pub use crate::config::{ConfigStore, Endpoint, MonitorConfig, SentinelConfig};

    // Errors
    pub use crate::error::{PurgeError, StoreError};

    // Naming
    pub use crate::keys::{Record, SCOPES_KEY};
    pub use crate::scope::ScopeName;

    // Stores
    pub use crate::store::{MemoryStore, MonitorStore, SentinelStore};
}
