//! Shared configuration primitives.
//!
//! Configuration contains:
//! - The execution mode (production or relaxed demo)
//! - Duration encoding used by every config file
//!
//! Configuration does NOT contain:
//! - Performance data (that comes from a `PerformanceSource`)
//! - Cached snapshots (those live in a key-value store)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// EXECUTION MODE
// =============================================================================

/// How strictly cached data is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Stale cache entries are never served.
    #[default]
    Production,

    /// Stale cache entries may stand in for failed fetches.
    Demo,
}

impl ExecutionMode {
    /// True when stale data may be served.
    #[must_use]
    pub fn is_relaxed(&self) -> bool {
        matches!(self, ExecutionMode::Demo)
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Production => "production",
            ExecutionMode::Demo => "demo",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(ExecutionMode::Production),
            "demo" => Ok(ExecutionMode::Demo),
            other => Err(format!("unknown execution mode: {other}")),
        }
    }
}

// =============================================================================
// DURATION ENCODING
// =============================================================================

/// Serializes a [`std::time::Duration`] as whole milliseconds.
///
/// ```
/// use std::time::Duration;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Settings {
///     #[serde(with = "goalfolio_traits::config::duration_millis")]
///     delay: Duration,
/// }
///
/// let json = serde_json::to_string(&Settings { delay: Duration::from_millis(500) }).unwrap();
/// assert_eq!(json, r#"{"delay":500}"#);
/// ```
pub mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize as milliseconds.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    /// Deserialize from milliseconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Timed {
        #[serde(with = "duration_millis")]
        timeout: Duration,
    }

    #[test]
    fn test_mode_default_is_production() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Production);
        assert!(!ExecutionMode::Production.is_relaxed());
        assert!(ExecutionMode::Demo.is_relaxed());
    }

    #[test]
    fn test_mode_parse_and_serde() {
        assert_eq!("Demo".parse::<ExecutionMode>(), Ok(ExecutionMode::Demo));
        assert_eq!("prod".parse::<ExecutionMode>(), Ok(ExecutionMode::Production));
        assert!("staging".parse::<ExecutionMode>().is_err());
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Demo).unwrap(),
            "\"demo\""
        );
    }

    #[test]
    fn test_duration_millis_roundtrip() {
        let timed = Timed {
            timeout: Duration::from_secs(10),
        };
        let json = serde_json::to_string(&timed).unwrap();
        assert_eq!(json, r#"{"timeout":10000}"#);
        assert_eq!(serde_json::from_str::<Timed>(&json).unwrap(), timed);
    }
}
