//! Configuration for reaching the monitor store
//!
//! A single `monitor.toml` names the sentinels and the monitored master.
//! When the default file is absent, the built-in deployment defaults apply.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_monitor_toml, parse_monitor_toml_str};
pub use paths::default_config_path;
pub use schema::{Endpoint, MonitorConfig, SentinelConfig};
pub use store::ConfigStore;
