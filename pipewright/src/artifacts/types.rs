//! Artifact type tags.

use serde::{Deserialize, Serialize};

/// The built-in tag for tabular data artifacts.
pub const DATASET: &str = "dataset";

/// The built-in tag for trained model artifacts.
pub const MODEL: &str = "model";

/// The built-in tag for evaluation metrics artifacts.
pub const METRICS: &str = "metrics";

/// The built-in tag for rendered report artifacts.
pub const REPORT: &str = "report";

/// A comparable tag naming the kind of data an output carries.
///
/// Tags are plain strings and the constructor accepts anything; whether a
/// tag is meaningful is decided by the [`ArtifactCatalog`](super::ArtifactCatalog)
/// at contract declaration time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactType(String);

impl ArtifactType {
    /// Creates a tag from any string-like value.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The built-in `dataset` tag.
    #[must_use]
    pub fn dataset() -> Self {
        Self::new(DATASET)
    }

    /// The built-in `model` tag.
    #[must_use]
    pub fn model() -> Self {
        Self::new(MODEL)
    }

    /// The built-in `metrics` tag.
    #[must_use]
    pub fn metrics() -> Self {
        Self::new(METRICS)
    }

    /// The built-in `report` tag.
    #[must_use]
    pub fn report() -> Self {
        Self::new(REPORT)
    }

    /// Returns the raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for ArtifactType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}
