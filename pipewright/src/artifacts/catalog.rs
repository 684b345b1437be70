//! Process-lifetime catalog of known artifact type tags.

use super::ArtifactType;
use dashmap::DashSet;

/// The set of artifact type tags contracts may reference.
///
/// The catalog is shared between readers and writers with different
/// lifecycles: contract declaration reads it while integrations append to it
/// during activation. Backed by a concurrent set so neither side blocks.
#[derive(Debug, Default)]
pub struct ArtifactCatalog {
    tags: DashSet<ArtifactType>,
}

impl ArtifactCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the built-in tags.
    #[must_use]
    pub fn with_builtins() -> Self {
        let catalog = Self::new();
        catalog.register(ArtifactType::dataset());
        catalog.register(ArtifactType::model());
        catalog.register(ArtifactType::metrics());
        catalog.register(ArtifactType::report());
        catalog
    }

    /// Registers a tag.
    ///
    /// Returns true when the tag was not known before. Registering an
    /// existing tag again is a no-op.
    pub fn register(&self, tag: ArtifactType) -> bool {
        self.tags.insert(tag)
    }

    /// Returns true when the tag is known.
    #[must_use]
    pub fn contains(&self, tag: &ArtifactType) -> bool {
        self.tags.contains(tag)
    }

    /// Returns a sorted snapshot of the known tags.
    #[must_use]
    pub fn tags(&self) -> Vec<ArtifactType> {
        let mut tags: Vec<ArtifactType> = self.tags.iter().map(|t| t.key().clone()).collect();
        tags.sort();
        tags
    }

    /// Returns the number of known tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true when no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
