//! Optional integrations and their registry.
//!
//! Integrations are components that may or may not be usable in a given
//! process: an extra that is not installed, a service that is unreachable.
//! Registration stays cheap so every known integration can be registered up
//! front; activation is a separate best-effort pass that never lets one
//! broken entry take down bootstrap.

mod handle;
mod registry;
#[cfg(test)]
mod registry_tests;

pub use handle::{IntegrationHandle, IntegrationResolver};
pub use registry::{ActivationFailure, ActivationReport, IntegrationRegistry, IntegrationStatus};

use crate::artifacts::ArtifactCatalog;
use crate::errors::IntegrationError;
use std::fmt::Debug;
use std::sync::Arc;

/// Trait for optional integrations.
pub trait Integration: Send + Sync + Debug {
    /// Returns the integration name.
    fn name(&self) -> &str;

    /// Performs the integration's side-effectful setup.
    ///
    /// Activation must be idempotent on the component side; the registry
    /// additionally invokes it at most once per registration.
    ///
    /// # Errors
    /// Returns an `IntegrationError` for expected failures (missing
    /// dependencies, unreachable services). Panics are not handled anywhere
    /// on this path and surface to the caller of
    /// [`IntegrationRegistry::activate_all`].
    fn activate(&self, ctx: &ActivationContext) -> Result<(), IntegrationError>;
}

/// What an activation hook is allowed to touch.
///
/// Owned by the bootstrap and shared across the whole activation pass.
#[derive(Debug, Clone)]
pub struct ActivationContext {
    catalog: Arc<ArtifactCatalog>,
}

impl ActivationContext {
    /// Creates a context around a shared artifact catalog.
    #[must_use]
    pub fn new(catalog: Arc<ArtifactCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the catalog integrations register artifact types into.
    #[must_use]
    pub fn catalog(&self) -> &ArtifactCatalog {
        &self.catalog
    }
}
