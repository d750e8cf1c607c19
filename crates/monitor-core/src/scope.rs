//! Scope identifiers.

use std::fmt;

use crate::error::PurgeError;

/// Longest scope the monitor center will register.
pub const MAX_SCOPE_LENGTH: usize = 16;

/// A validated scope id.
///
/// Accepts the same ids the monitor center accepts when registering a
/// scope: 1 to 16 ASCII alphanumerics, `.`, `-` or `_`. Anything else can
/// never have been written, and a `:` or glob character would address
/// keys outside the scope's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeName(String);

impl ScopeName {
    pub fn parse(value: impl Into<String>) -> Result<Self, PurgeError> {
        let value = value.into();
        if value.is_empty() || value.len() > MAX_SCOPE_LENGTH {
            return Err(PurgeError::InvalidScope(value));
        }
        if !value.chars().all(is_scope_char) {
            return Err(PurgeError::InvalidScope(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_scope_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

impl fmt::Display for ScopeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScopeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
