//! Wiring-time coupling of a step name and a validated contract.

use super::Step;
use crate::contracts::OutputContract;
use crate::errors::ContractMismatchError;
use serde::Serialize;

/// A step definition: a name coupled to a declared contract that has been
/// checked against the shape the variant actually advertises.
///
/// Definitions are inert descriptions. They exist so that a pipeline author
/// can declare outputs independently (for example from a pipeline file) and
/// learn about disagreements at wiring time instead of mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    name: String,
    contract: OutputContract,
}

impl StepDefinition {
    /// Validates a declared contract against a step variant and couples the
    /// two on success.
    ///
    /// # Errors
    /// Returns a [`ContractMismatchError`] naming the step when the
    /// declaration and the variant's advertised shape disagree.
    pub fn for_step(
        step: &dyn Step,
        declared: OutputContract,
    ) -> Result<Self, ContractMismatchError> {
        declared
            .validate_shape(step.output_contract())
            .map_err(|e| e.with_step(step.name()))?;
        Ok(Self {
            name: step.name().to_string(),
            contract: declared,
        })
    }

    /// Creates a definition straight from what the variant advertises.
    ///
    /// Trivially valid; useful when no independent declaration exists.
    #[must_use]
    pub fn advertised(step: &dyn Step) -> Self {
        Self {
            name: step.name().to_string(),
            contract: step.output_contract().clone(),
        }
    }

    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the validated contract.
    #[must_use]
    pub fn contract(&self) -> &OutputContract {
        &self.contract
    }
}

impl std::fmt::Display for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.contract)
    }
}
