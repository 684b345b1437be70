//! Generic JSON-payload artifact.

use super::{Artifact, ArtifactType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An artifact carrying an arbitrary JSON payload under an explicit tag.
///
/// Covers output kinds that have no dedicated struct, such as metrics maps
/// or rendered reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueArtifact {
    /// The tag this artifact carries.
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,

    /// A unique identifier for the artifact.
    pub id: Uuid,

    /// The payload.
    pub value: serde_json::Value,

    /// When the artifact was created.
    pub created_at: DateTime<Utc>,
}

impl ValueArtifact {
    /// Creates a new artifact from a tag and a payload.
    #[must_use]
    pub fn new(artifact_type: impl Into<ArtifactType>, value: serde_json::Value) -> Self {
        Self {
            artifact_type: artifact_type.into(),
            id: Uuid::new_v4(),
            value,
            created_at: Utc::now(),
        }
    }
}

impl Artifact for ValueArtifact {
    fn artifact_type(&self) -> ArtifactType {
        self.artifact_type.clone()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_artifact_creation() {
        let artifact = ValueArtifact::new("metrics", serde_json::json!({"accuracy": 0.95}));

        assert_eq!(artifact.artifact_type(), ArtifactType::metrics());
        assert_eq!(artifact.value["accuracy"], serde_json::json!(0.95));
    }

    #[test]
    fn test_value_artifact_serialization() {
        let artifact = ValueArtifact::new("report", serde_json::json!({"pages": 3}));

        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["type"], serde_json::json!("report"));

        let deserialized: ValueArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized.artifact_type, ArtifactType::report());
        assert_eq!(deserialized.id, artifact.id);
    }
}
