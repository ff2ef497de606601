use std::path::PathBuf;

use crate::error::{AuditError, Result};
use crate::snapshot::Snapshot;

/// Snapshot JSON file written by the collection script.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl super::SnapshotSource for JsonFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Snapshot> {
        if !self.path.is_file() {
            return Err(AuditError::Snapshot {
                source_name: self.name(),
                message: "file not found".into(),
            });
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot = Snapshot::from_json_str(&content).map_err(|e| AuditError::Snapshot {
            source_name: self.name(),
            message: e.to_string(),
        })?;
        tracing::info!(
            source = %self.name(),
            resources = snapshot.resources.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SnapshotSource;
    use std::io::Write;

    #[test]
    fn loads_collector_output() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"subscription": "Dev", "appServices": [{{"name": "app1", "config": {{}}}}]}}"#
        )
        .unwrap();
        let snapshot = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(snapshot.subscription.as_deref(), Some("Dev"));
        assert_eq!(snapshot.resources[0].display_name(), "app1");
    }

    #[test]
    fn one_malformed_record_does_not_fail_the_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"resources": [{{"name": "good"}}, {{"name": null}}, "oops"]}}"#).unwrap();
        let snapshot = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(snapshot.resources.len(), 3);
        assert_eq!(snapshot.resources[0].display_name(), "good");
        assert_eq!(snapshot.resources[1].display_name(), "Unknown");
        assert!(snapshot.resources[2].unreadable.is_some());
    }

    #[test]
    fn missing_file_is_snapshot_error() {
        let err = JsonFileSource::new("no/such/snapshot.json").load().unwrap_err();
        assert!(matches!(err, AuditError::Snapshot { .. }));
    }

    #[test]
    fn invalid_json_is_snapshot_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = JsonFileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, AuditError::Snapshot { .. }));
    }
}
