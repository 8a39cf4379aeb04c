//! Identifier types shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Investment goal identifier.
///
/// Ids are trimmed on construction; an id that is blank after trimming is
/// never fetched or cached.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GoalId(pub String);

impl GoalId {
    /// Create a new goal ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the id is blank.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GoalId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for GoalId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for GoalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_id_trims() {
        let id = GoalId::new("  goal-1 ");
        assert_eq!(id.as_str(), "goal-1");
        assert!(!id.is_blank());
        assert!(GoalId::from("   ").is_blank());
    }

    #[test]
    fn test_goal_id_serde_is_transparent_string() {
        let id = GoalId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
