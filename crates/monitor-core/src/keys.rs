//! Key naming for the monitor keyspace.
//!
//! Every record the monitor center writes lives under a colon-delimited
//! name rooted at `m:`:
//!
//! ```text
//! m:scopes                         set of scope ids
//! m:<scope>:keys                   set of key ids
//! m:<scope>:<key>:hosts            set of host ids
//! m:<scope>:<key>:<host>:m         per-host metric record
//! m:<scope>:<key>:<host>:d         per-host data record
//! m:<scope>:<key>:m                per-key metric record
//! m:<scope>:<key>:d                per-key data record
//! m:<scope>:<key>::m               cross-host aggregate (empty host)
//! m:<scope>:<key>::d               cross-host aggregate (empty host)
//! ```
//!
//! All shapes are produced by [`key_name`]; the helpers below only pick
//! its arguments.

/// Namespace prefix shared by every monitor key.
pub const NAMESPACE: &str = "m";

/// Global registry of scope ids.
pub const SCOPES_KEY: &str = "m:scopes";

/// Trailing segment of a monitor key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    /// `keys` registry set of a scope
    Keys,
    /// `hosts` registry set of a key
    Hosts,
    /// A metric or data record
    Record(Record),
}

/// Record kinds stored per key and per host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    /// Minute-resolution metric values (`m`)
    Metric,
    /// Daily rollups (`d`)
    Data,
}

impl Record {
    /// Both record kinds, in deletion order.
    pub const ALL: [Record; 2] = [Record::Metric, Record::Data];

    pub fn as_str(self) -> &'static str {
        match self {
            Record::Metric => "m",
            Record::Data => "d",
        }
    }
}

impl Suffix {
    fn as_str(self) -> &'static str {
        match self {
            Suffix::Keys => "keys",
            Suffix::Hosts => "hosts",
            Suffix::Record(record) => record.as_str(),
        }
    }
}

/// Build a monitor key from its segments.
///
/// `host` may be the empty string; the monitor center uses that to store
/// cross-host aggregates (`m:<scope>:<key>::m`).
pub fn key_name(scope: &str, key: Option<&str>, host: Option<&str>, suffix: Suffix) -> String {
    let mut name = String::with_capacity(
        NAMESPACE.len()
            + scope.len()
            + key.map_or(0, str::len)
            + host.map_or(0, str::len)
            + 12,
    );
    name.push_str(NAMESPACE);
    name.push(':');
    name.push_str(scope);
    for segment in [key, host].into_iter().flatten() {
        name.push(':');
        name.push_str(segment);
    }
    name.push(':');
    name.push_str(suffix.as_str());
    name
}

/// `m:<scope>:keys`
pub fn scope_keys(scope: &str) -> String {
    key_name(scope, None, None, Suffix::Keys)
}

/// `m:<scope>:<key>:hosts`
pub fn key_hosts(scope: &str, key: &str) -> String {
    key_name(scope, Some(key), None, Suffix::Hosts)
}

/// `m:<scope>:<key>:<record>`
pub fn key_record(scope: &str, key: &str, record: Record) -> String {
    key_name(scope, Some(key), None, Suffix::Record(record))
}

/// `m:<scope>:<key>::<record>`
pub fn aggregate_record(scope: &str, key: &str, record: Record) -> String {
    key_name(scope, Some(key), Some(""), Suffix::Record(record))
}

/// `m:<scope>:<key>:<host>:<record>`
pub fn host_record(scope: &str, key: &str, host: &str, record: Record) -> String {
    key_name(scope, Some(key), Some(host), Suffix::Record(record))
}

/// Every per-key name removed once a key's hosts are gone, in deletion order.
///
/// The `hosts` registry comes last so an interrupted run can still find
/// the key's hosts on the next attempt.
pub fn key_cleanup(scope: &str, key: &str) -> Vec<String> {
    let mut names: Vec<String> = Record::ALL
        .iter()
        .map(|record| key_record(scope, key, *record))
        .collect();
    names.extend(
        Record::ALL
            .iter()
            .map(|record| aggregate_record(scope, key, *record)),
    );
    names.push(key_hosts(scope, key));
    names
}
