//! Fixtures shared across tests.

use crate::artifacts::{ArtifactCatalog, DatasetArtifact};
use crate::errors::IntegrationError;
use crate::integrations::{ActivationContext, Integration};
use std::sync::Arc;

/// Builds a dataset of `rows` rows of the form `{"index": n}`.
#[must_use]
pub fn sample_dataset(rows: usize) -> DatasetArtifact {
    let rows = (0..rows)
        .map(|index| serde_json::json!({"index": index}))
        .collect();
    DatasetArtifact::new(rows)
}

/// Builds an activation context over a fresh catalog seeded with the
/// built-in tags.
#[must_use]
pub fn activation_context() -> ActivationContext {
    ActivationContext::new(Arc::new(ArtifactCatalog::with_builtins()))
}

/// A lazy resolver that always succeeds with the given component.
pub fn resolver_for(
    integration: Arc<dyn Integration>,
) -> impl Fn() -> Result<Arc<dyn Integration>, IntegrationError> + Send + Sync + Clone + 'static {
    move || Ok(Arc::clone(&integration))
}

/// A lazy resolver that always fails resolution, the way a missing
/// optional dependency would.
pub fn unavailable_resolver(
    locator: impl Into<String>,
    reason: impl Into<String>,
) -> impl Fn() -> Result<Arc<dyn Integration>, IntegrationError> + Send + Sync + Clone + 'static {
    let locator = locator.into();
    let reason = reason.into();
    move || Err(IntegrationError::unavailable(locator.clone(), reason.clone()))
}
