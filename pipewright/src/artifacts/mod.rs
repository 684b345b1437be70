//! Artifacts: typed units of data flowing between steps.
//!
//! This module contains the artifact half of the contract model:
//! - Artifact type tags and the built-in well-known tags
//! - The process-lifetime catalog of known tags
//! - The `Artifact` trait concrete artifacts implement
//! - Concrete dataset and JSON-payload artifacts

mod catalog;
mod dataset;
mod types;
mod value;

pub use catalog::ArtifactCatalog;
pub use dataset::DatasetArtifact;
pub use types::{ArtifactType, DATASET, METRICS, MODEL, REPORT};
pub use value::ValueArtifact;

use std::any::Any;

/// A unit of data produced or consumed by a step.
///
/// The framework never inspects payloads. Contract checking reads the type
/// tag; consumers that need the concrete value downcast through `as_any`.
pub trait Artifact: Send + Sync + std::fmt::Debug {
    /// Returns the tag describing what kind of data this artifact carries.
    fn artifact_type(&self) -> ArtifactType;

    /// Returns the artifact as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}
