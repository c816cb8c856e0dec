//! Consistency modes and snapshot tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// How fresh a read must be.
///
/// Chosen per request. The choice is opaque to the transport and has no
/// retry implications.
///
/// Serialized in the backend's wire shape:
///
/// ```rust
/// use spicebridge::Consistency;
///
/// let full = serde_json::to_value(Consistency::FullyConsistent).unwrap();
/// assert_eq!(full, serde_json::json!({"fullyConsistent": true}));
///
/// let fast: Consistency = "minimize_latency".parse().unwrap();
/// assert_eq!(
///     serde_json::to_value(fast).unwrap(),
///     serde_json::json!({"minimizeLatency": true})
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Consistency {
    /// Always observe the latest writes.
    #[default]
    FullyConsistent,
    /// May read a slightly stale snapshot.
    MinimizeLatency,
}

impl Consistency {
    /// Full consistency.
    pub const fn full() -> Self {
        Consistency::FullyConsistent
    }

    /// Minimize latency.
    pub const fn minimize_latency() -> Self {
        Consistency::MinimizeLatency
    }

    fn wire_key(self) -> &'static str {
        match self {
            Consistency::FullyConsistent => "fullyConsistent",
            Consistency::MinimizeLatency => "minimizeLatency",
        }
    }
}

impl Serialize for Consistency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.wire_key(), &true)?;
        map.end()
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consistency::FullyConsistent => f.write_str("full"),
            Consistency::MinimizeLatency => f.write_str("minimize_latency"),
        }
    }
}

impl FromStr for Consistency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" | "fully_consistent" => Ok(Consistency::FullyConsistent),
            "minimize_latency" => Ok(Consistency::MinimizeLatency),
            other => Err(Error::validation(format!(
                "unknown consistency '{}': expected 'full' or 'minimize_latency'",
                other
            ))),
        }
    }
}

/// An opaque snapshot token returned by write operations and checks.
///
/// Also used as the pagination cursor: the backend hands one back alongside
/// each page and expects it verbatim on the next request of the same query.
///
/// ```rust
/// use spicebridge::ZedToken;
///
/// let token: ZedToken = serde_json::from_value(serde_json::json!({"token": "GhUKEzE2"})).unwrap();
/// assert_eq!(token.value(), "GhUKEzE2");
/// assert_eq!(token.to_string(), "GhUKEzE2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZedToken {
    #[serde(rename = "token")]
    value: String,
}

impl ZedToken {
    /// Creates a token from its raw value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the raw token value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the token value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for ZedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
