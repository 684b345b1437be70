//! The output contract schema object.

use crate::artifacts::{ArtifactCatalog, ArtifactType};
use crate::errors::{
    ContractDiff, ContractError, ContractMismatchError, ContractViolationError, TypeMismatch,
};
use crate::steps::StepOutputs;
use serde::Serialize;
use std::collections::BTreeMap;

/// An immutable schema naming a step's outputs and their artifact types.
///
/// Contracts are values: computed once at declaration time, compared by
/// content, and cached by their holders rather than re-derived. Entry order
/// never matters; two contracts with the same name/type pairs are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputContract {
    entries: BTreeMap<String, ArtifactType>,
}

impl OutputContract {
    /// Creates a contract with no outputs.
    ///
    /// Zero-output steps are legal, if unusual; such a contract accepts only
    /// an empty output map.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Declares a contract from `(name, artifact type)` pairs.
    ///
    /// The pairs are taken as a sequence so repeated names are observable
    /// rather than silently collapsed.
    ///
    /// # Errors
    /// Fails on the first empty or whitespace-only name, the first name
    /// mapped to a tag the catalog does not know, or the first repeated
    /// name.
    pub fn declare<N, T, I>(entries: I, catalog: &ArtifactCatalog) -> Result<Self, ContractError>
    where
        N: Into<String>,
        T: Into<ArtifactType>,
        I: IntoIterator<Item = (N, T)>,
    {
        let mut map = BTreeMap::new();
        for (name, artifact_type) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(ContractError::EmptyName);
            }
            let artifact_type = artifact_type.into();
            if !catalog.contains(&artifact_type) {
                return Err(ContractError::UnknownType {
                    name,
                    artifact_type,
                });
            }
            if map.contains_key(&name) {
                return Err(ContractError::DuplicateName { name });
            }
            map.insert(name, artifact_type);
        }
        Ok(Self { entries: map })
    }

    /// Validates this declared contract against the shape a step variant
    /// advertises.
    ///
    /// Order-insensitive: only the name sets and per-name types are
    /// compared. Runs once at wiring time, not per invocation.
    ///
    /// # Errors
    /// Returns a [`ContractMismatchError`] listing the declared names the
    /// shape lacks, the names it carries beyond the declaration, and every
    /// per-name type disagreement.
    pub fn validate_shape(&self, hook_shape: &Self) -> Result<(), ContractMismatchError> {
        let diff = self.diff_against(&hook_shape.entries);
        if diff.is_empty() {
            Ok(())
        } else {
            Err(ContractMismatchError::new(diff))
        }
    }

    /// Checks the outputs a hook actually returned against this contract.
    ///
    /// This is the runtime tier: the wiring-time shape check constrains what
    /// a variant declares, while the map a hook returns is runtime data.
    ///
    /// # Errors
    /// Returns a [`ContractViolationError`] when the returned names or the
    /// runtime type tags of the returned artifacts disagree with the schema.
    pub fn check_outputs(&self, outputs: &StepOutputs) -> Result<(), ContractViolationError> {
        let diff = self.diff_against(&outputs.shape());
        if diff.is_empty() {
            Ok(())
        } else {
            Err(ContractViolationError::new(diff))
        }
    }

    /// Returns the declared output names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the declared type for an output name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArtifactType> {
        self.entries.get(name)
    }

    /// Iterates over the declared `(name, type)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArtifactType)> {
        self.entries.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    /// Returns the number of declared outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the contract declares no outputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn diff_against(&self, observed: &BTreeMap<String, ArtifactType>) -> ContractDiff {
        let mut diff = ContractDiff::default();
        for (name, expected) in &self.entries {
            match observed.get(name) {
                None => diff.missing.push(name.clone()),
                Some(found) if found != expected => diff.mismatched.push(TypeMismatch {
                    name: name.clone(),
                    expected: expected.clone(),
                    found: found.clone(),
                }),
                Some(_) => {}
            }
        }
        for name in observed.keys() {
            if !self.entries.contains_key(name) {
                diff.unexpected.push(name.clone());
            }
        }
        diff
    }
}

impl std::fmt::Display for OutputContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(name, tag)| format!("{name}: {tag}"))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}
