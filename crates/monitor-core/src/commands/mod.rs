//! High-level maintenance commands.
//!
//! Commands borrow or own a [`MonitorStore`](crate::store::MonitorStore)
//! handed in by the caller; they never open connections themselves.

pub mod plan;
pub mod purge;

pub use plan::{KeyPlan, PlanCommand, ScopePlan};
pub use purge::{PurgeCommand, PurgeReport};
