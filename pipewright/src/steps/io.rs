//! Input and output artifact maps for step invocations.

use crate::artifacts::{Artifact, ArtifactType};
use std::collections::BTreeMap;

/// The named artifacts a step receives.
#[derive(Debug, Default)]
pub struct StepInputs {
    artifacts: BTreeMap<String, Box<dyn Artifact>>,
}

impl StepInputs {
    /// Creates empty inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named artifact.
    #[must_use]
    pub fn with_artifact(
        mut self,
        name: impl Into<String>,
        artifact: impl Artifact + 'static,
    ) -> Self {
        self.insert(name, artifact);
        self
    }

    /// Inserts a named artifact, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, artifact: impl Artifact + 'static) {
        self.artifacts.insert(name.into(), Box::new(artifact));
    }

    /// Returns a named artifact.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Artifact> {
        self.artifacts.get(name).map(|artifact| artifact.as_ref())
    }

    /// Returns a named artifact downcast to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get(name)
            .and_then(|artifact| artifact.as_any().downcast_ref::<T>())
    }

    /// Returns true when an artifact with the name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    /// Returns the artifact names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.artifacts.keys().map(String::as_str).collect()
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true when no artifacts are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// The named artifacts a step's hook returns.
///
/// Outputs move to the caller by value; the producing instance keeps
/// nothing back.
#[derive(Debug, Default)]
pub struct StepOutputs {
    artifacts: BTreeMap<String, Box<dyn Artifact>>,
}

impl StepOutputs {
    /// Creates empty outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named artifact.
    #[must_use]
    pub fn with_artifact(
        mut self,
        name: impl Into<String>,
        artifact: impl Artifact + 'static,
    ) -> Self {
        self.insert(name, artifact);
        self
    }

    /// Inserts a named artifact, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, artifact: impl Artifact + 'static) {
        self.artifacts.insert(name.into(), Box::new(artifact));
    }

    /// Returns a named artifact.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Artifact> {
        self.artifacts.get(name).map(|artifact| artifact.as_ref())
    }

    /// Returns a named artifact downcast to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get(name)
            .and_then(|artifact| artifact.as_any().downcast_ref::<T>())
    }

    /// Removes and returns a named artifact.
    pub fn take(&mut self, name: &str) -> Option<Box<dyn Artifact>> {
        self.artifacts.remove(name)
    }

    /// Returns true when an artifact with the name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    /// Returns the artifact names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.artifacts.keys().map(String::as_str).collect()
    }

    /// Returns the name-to-type map contract checking compares against.
    #[must_use]
    pub fn shape(&self) -> BTreeMap<String, ArtifactType> {
        self.artifacts
            .iter()
            .map(|(name, artifact)| (name.clone(), artifact.artifact_type()))
            .collect()
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true when no artifacts are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{DatasetArtifact, ValueArtifact};

    #[test]
    fn test_inputs_builder_and_lookup() {
        let inputs = StepInputs::new()
            .with_artifact("dataset", DatasetArtifact::new(vec![serde_json::json!(1)]))
            .with_artifact("metrics", ValueArtifact::new("metrics", serde_json::json!({})));

        assert_eq!(inputs.len(), 2);
        assert!(inputs.contains("dataset"));
        assert_eq!(inputs.names(), vec!["dataset", "metrics"]);

        let dataset = inputs.downcast_ref::<DatasetArtifact>("dataset").unwrap();
        assert_eq!(dataset.len(), 1);

        assert!(inputs.downcast_ref::<DatasetArtifact>("metrics").is_none());
        assert!(inputs.get("missing").is_none());
    }

    #[test]
    fn test_outputs_shape() {
        let outputs = StepOutputs::new()
            .with_artifact("train", DatasetArtifact::new(vec![]))
            .with_artifact("report", ValueArtifact::new("report", serde_json::json!("ok")));

        let shape = outputs.shape();
        assert_eq!(shape.len(), 2);
        assert_eq!(shape["train"], ArtifactType::dataset());
        assert_eq!(shape["report"], ArtifactType::report());
    }

    #[test]
    fn test_outputs_insert_replaces() {
        let mut outputs = StepOutputs::new();
        outputs.insert("train", DatasetArtifact::new(vec![serde_json::json!(1)]));
        outputs.insert("train", DatasetArtifact::new(vec![]));

        assert_eq!(outputs.len(), 1);
        let dataset = outputs.downcast_ref::<DatasetArtifact>("train").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_outputs_take() {
        let mut outputs =
            StepOutputs::new().with_artifact("train", DatasetArtifact::new(vec![]));

        let taken = outputs.take("train");
        assert!(taken.is_some());
        assert!(outputs.is_empty());
        assert!(outputs.take("train").is_none());
    }
}
