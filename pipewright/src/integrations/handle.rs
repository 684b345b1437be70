//! Integration handles: constructed components or lazy locators.

use super::Integration;
use crate::errors::IntegrationError;
use std::sync::Arc;

/// The resolver a lazy handle runs to produce its component.
pub type IntegrationResolver =
    Arc<dyn Fn() -> Result<Arc<dyn Integration>, IntegrationError> + Send + Sync>;

/// How a registered integration is held before activation.
///
/// Eager handles carry the component itself. Lazy handles carry a locator
/// and a resolver that is run at most once, during the first activation
/// pass; a resolver error is how a missing optional dependency shows up.
#[derive(Clone)]
pub enum IntegrationHandle {
    /// The component is already constructed.
    Eager(Arc<dyn Integration>),
    /// The component is produced on first activation.
    Lazy {
        /// Where the component comes from, for diagnostics.
        locator: String,
        /// Produces the component or an unavailability error.
        resolver: IntegrationResolver,
    },
}

impl IntegrationHandle {
    /// Creates an eager handle.
    #[must_use]
    pub fn eager(integration: Arc<dyn Integration>) -> Self {
        Self::Eager(integration)
    }

    /// Creates a lazy handle.
    #[must_use]
    pub fn lazy<F>(locator: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Integration>, IntegrationError> + Send + Sync + 'static,
    {
        Self::Lazy {
            locator: locator.into(),
            resolver: Arc::new(resolver),
        }
    }

    /// Returns the component when it has been constructed.
    #[must_use]
    pub fn component(&self) -> Option<Arc<dyn Integration>> {
        match self {
            Self::Eager(integration) => Some(Arc::clone(integration)),
            Self::Lazy { .. } => None,
        }
    }

    /// Returns true for handles whose component is not yet constructed.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy { .. })
    }
}

impl std::fmt::Debug for IntegrationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eager(integration) => f.debug_tuple("Eager").field(integration).finish(),
            Self::Lazy { locator, .. } => f
                .debug_struct("Lazy")
                .field("locator", locator)
                .finish_non_exhaustive(),
        }
    }
}
