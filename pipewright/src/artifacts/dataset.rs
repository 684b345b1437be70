//! Concrete tabular artifact.

use super::{Artifact, ArtifactType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// An in-memory tabular artifact, one JSON value per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetArtifact {
    /// A unique identifier for the artifact.
    pub id: Uuid,

    /// The rows of the dataset.
    pub rows: Vec<serde_json::Value>,

    /// Additional metadata about the dataset.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,

    /// When the artifact was created.
    pub created_at: DateTime<Utc>,
}

impl DatasetArtifact {
    /// Creates a new dataset artifact from rows.
    #[must_use]
    pub fn new(rows: Vec<serde_json::Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rows,
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds metadata to the dataset.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Artifact for DatasetArtifact {
    fn artifact_type(&self) -> ArtifactType {
        ArtifactType::dataset()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        let dataset = DatasetArtifact::new(vec![
            serde_json::json!({"x": 1}),
            serde_json::json!({"x": 2}),
        ]);

        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.artifact_type(), ArtifactType::dataset());
    }

    #[test]
    fn test_dataset_with_metadata() {
        let dataset = DatasetArtifact::new(vec![])
            .with_metadata("source", serde_json::json!("sensor-a"))
            .with_metadata("schema_version", serde_json::json!(2));

        assert!(dataset.is_empty());
        assert_eq!(dataset.metadata.len(), 2);
        assert_eq!(
            dataset.metadata.get("source"),
            Some(&serde_json::json!("sensor-a"))
        );
    }

    #[test]
    fn test_dataset_serialization() {
        let dataset = DatasetArtifact::new(vec![serde_json::json!({"label": "a"})])
            .with_metadata("origin", serde_json::json!("unit-test"));

        let json = serde_json::to_string(&dataset).unwrap();
        let deserialized: DatasetArtifact = serde_json::from_str(&json).unwrap();

        assert_eq!(dataset.id, deserialized.id);
        assert_eq!(dataset.rows, deserialized.rows);
        assert_eq!(dataset.created_at, deserialized.created_at);
    }

    #[test]
    fn test_dataset_downcast() {
        let dataset = DatasetArtifact::new(vec![serde_json::json!({"x": 1})]);
        let artifact: &dyn Artifact = &dataset;

        let concrete = artifact.as_any().downcast_ref::<DatasetArtifact>().unwrap();
        assert_eq!(concrete.len(), 1);
    }
}
