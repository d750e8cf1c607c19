//! Configuration schema for monitor.toml

use std::fmt;

use serde::Deserialize;

/// Root configuration structure for monitor.toml
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Sentinel discovery settings
    #[serde(default)]
    pub sentinel: SentinelConfig,
}

/// How to locate the current primary.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SentinelConfig {
    /// Name the sentinels monitor the primary under
    #[serde(default = "default_master")]
    pub master: String,

    /// Database index on the primary
    #[serde(default)]
    pub db: Option<i64>,

    /// Password for the primary
    #[serde(default)]
    pub password: Option<String>,

    /// Sentinel nodes to query, in order
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<Endpoint>,
}

/// A sentinel address.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

fn default_master() -> String {
    "mymaster".to_string()
}

fn default_endpoints() -> Vec<Endpoint> {
    [26381, 26382, 26383]
        .into_iter()
        .map(|port| Endpoint::new("127.0.0.1", port))
        .collect()
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            master: default_master(),
            endpoints: default_endpoints(),
            db: None,
            password: None,
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the settings discovery depends on.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.sentinel.validate()
    }
}

impl SentinelConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.master.trim().is_empty() {
            anyhow::bail!("sentinel.master must not be empty");
        }
        if self.endpoints.is_empty() {
            anyhow::bail!("sentinel.endpoints must list at least one sentinel");
        }
        for (index, endpoint) in self.endpoints.iter().enumerate() {
            if endpoint.host.trim().is_empty() {
                anyhow::bail!("sentinel.endpoints[{}]: host must not be empty", index);
            }
            if endpoint.port == 0 {
                anyhow::bail!("sentinel.endpoints[{}]: port must not be 0", index);
            }
        }
        if matches!(self.db, Some(db) if db < 0) {
            anyhow::bail!("sentinel.db must not be negative");
        }
        Ok(())
    }

    /// Comma-separated `host:port` list, for messages.
    pub fn endpoint_list(&self) -> String {
        self.endpoints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Connection URL understood by the `redis` client.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
