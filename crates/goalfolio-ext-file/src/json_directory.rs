//! JSON snapshot directory source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use goalfolio_traits::{GoalId, PerformanceSource, SourceError};

/// Serves `<dir>/<goal_id>.json` as the goal's performance payload.
///
/// Useful for offline fixtures, demos and replaying captured responses. The
/// file is read on every fetch, so edits are picked up without a restart.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    /// Create a source over an existing directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SourceError::NotFound(format!(
                "snapshot directory {}",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a goal's snapshot, or `None` for ids that are not plain file
    /// names.
    pub fn snapshot_path(&self, goal_id: &GoalId) -> Option<PathBuf> {
        let id = goal_id.as_str();
        let plain = !id.is_empty()
            && !id.contains(['/', '\\'])
            && id != "."
            && id != "..";
        plain.then(|| self.dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl PerformanceSource for JsonDirectorySource {
    fn name(&self) -> &str {
        "json-directory"
    }

    async fn fetch_performance(&self, goal_id: &GoalId) -> Result<Value, SourceError> {
        let path = self
            .snapshot_path(goal_id)
            .ok_or_else(|| SourceError::NotFound(format!("invalid goal id '{goal_id}'")))?;
        debug!(goal_id = %goal_id, path = %path.display(), "Reading performance snapshot");

        let content = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reads_goal_snapshot() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("goal-1.json"),
            r#"{"endingBalanceAmount": 1200.5}"#,
        )
        .unwrap();

        let source = JsonDirectorySource::new(dir.path()).unwrap();
        let value = source.fetch_performance(&GoalId::new("goal-1")).await.unwrap();
        assert_eq!(value, json!({ "endingBalanceAmount": 1200.5 }));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let source = JsonDirectorySource::new(dir.path()).unwrap();
        let err = source.fetch_performance(&GoalId::new("nope")).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let source = JsonDirectorySource::new(dir.path()).unwrap();
        let err = source.fetch_performance(&GoalId::new("bad")).await.unwrap_err();
        assert!(matches!(err, SourceError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let dir = tempdir().unwrap();
        let source = JsonDirectorySource::new(dir.path()).unwrap();
        for id in ["../etc/passwd", "a/b", "..", "a\\b"] {
            assert!(source.snapshot_path(&GoalId::new(id)).is_none(), "{id}");
            assert!(source.fetch_performance(&GoalId::new(id)).await.is_err());
        }
    }

    #[test]
    fn test_requires_existing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            JsonDirectorySource::new(&missing),
            Err(SourceError::NotFound(_))
        ));
    }
}
