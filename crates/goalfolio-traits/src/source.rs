//! Performance snapshot source trait.
//!
//! A [`PerformanceSource`] returns the raw, untrusted performance payload for
//! one goal. Implementations live elsewhere (HTTP clients in the host
//! application, JSON fixtures in `goalfolio-ext-file`).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SourceError;
use crate::ids::GoalId;

/// Provider of raw per-goal performance payloads.
///
/// The payload shape is not validated here. Callers treat any error, and any
/// reply that is not a JSON object, as "unavailable" for that goal.
#[async_trait]
pub trait PerformanceSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str {
        "performance-source"
    }

    /// Fetch the latest performance payload for a goal.
    async fn fetch_performance(&self, goal_id: &GoalId) -> Result<Value, SourceError>;
}

#[async_trait]
impl<T: PerformanceSource + ?Sized> PerformanceSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_performance(&self, goal_id: &GoalId) -> Result<Value, SourceError> {
        (**self).fetch_performance(goal_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    struct EchoSource;

    #[async_trait]
    impl PerformanceSource for EchoSource {
        async fn fetch_performance(&self, goal_id: &GoalId) -> Result<Value, SourceError> {
            Ok(json!({ "goalId": goal_id.as_str() }))
        }
    }

    #[tokio::test]
    async fn test_arc_source_delegates() {
        let source: Arc<dyn PerformanceSource> = Arc::new(EchoSource);
        let value = source.fetch_performance(&GoalId::from("g1")).await.unwrap();
        assert_eq!(value["goalId"], "g1");
        assert_eq!(source.name(), "performance-source");
    }
}
