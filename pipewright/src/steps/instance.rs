//! Single-use execution wrapper around a step variant.

use super::{Step, StepInputs, StepOutputs, StepState};
use crate::contracts::OutputContract;
use crate::errors::{StepError, StepStateError};
use parking_lot::Mutex;
use tracing::debug;

/// A configured, single-use binding of a step variant.
///
/// The instance copies the variant's contract at construction so the
/// contract enforced at run time is exactly the one that was validated, and
/// it enforces the lifecycle: one `run`, after which the instance is
/// consumed whether the hook succeeded or not.
#[derive(Debug)]
pub struct StepInstance {
    step: Box<dyn Step>,
    contract: OutputContract,
    state: Mutex<StepState>,
}

impl StepInstance {
    /// Creates a configured instance from a step variant.
    #[must_use]
    pub fn new(step: Box<dyn Step>) -> Self {
        let contract = step.output_contract().clone();
        Self {
            step,
            contract,
            state: Mutex::new(StepState::Configured),
        }
    }

    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.step.name()
    }

    /// Returns the contract cached at construction.
    #[must_use]
    pub fn contract(&self) -> &OutputContract {
        &self.contract
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> StepState {
        *self.state.lock()
    }

    /// Runs the step exactly once and checks its outputs.
    ///
    /// The state moves to `Invoked` before the hook runs and stays there
    /// whether the hook succeeds or fails; a failed run does not earn a
    /// retry on the same instance.
    ///
    /// # Errors
    /// - [`StepError::State`] when the instance has already run
    /// - [`StepError::Execution`] when the hook itself fails
    /// - [`StepError::ContractViolation`] when the hook returns outputs
    ///   whose names or types disagree with the cached contract
    pub fn run(&self, inputs: &StepInputs) -> Result<StepOutputs, StepError> {
        {
            let mut state = self.state.lock();
            if *state != StepState::Configured {
                return Err(StepStateError::new(self.name(), state.as_str(), "run").into());
            }
            *state = StepState::Invoked;
        }

        debug!(step = %self.name(), "invoking step");
        let outputs = self.step.process(inputs)?;
        self.contract
            .check_outputs(&outputs)
            .map_err(|e| e.with_step(self.name()))?;
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{ArtifactCatalog, DatasetArtifact};
    use crate::testing::StubStep;

    fn single_output_stub() -> StubStep {
        let catalog = ArtifactCatalog::with_builtins();
        let contract = OutputContract::declare([("train", "dataset")], &catalog).unwrap();
        StubStep::new("emit", contract, || {
            Ok(StepOutputs::new().with_artifact("train", DatasetArtifact::new(vec![])))
        })
    }

    #[test]
    fn test_instance_caches_contract() {
        let stub = single_output_stub();
        let expected = stub.output_contract().clone();

        let instance = StepInstance::new(Box::new(stub));
        assert_eq!(instance.contract(), &expected);
        assert_eq!(instance.name(), "emit");
    }

    #[test]
    fn test_fresh_instance_is_configured() {
        let instance = StepInstance::new(Box::new(single_output_stub()));
        assert_eq!(instance.state(), StepState::Configured);
    }

    #[test]
    fn test_run_transitions_to_invoked() {
        let instance = StepInstance::new(Box::new(single_output_stub()));

        let outputs = instance.run(&StepInputs::new()).unwrap();
        assert!(outputs.contains("train"));
        assert_eq!(instance.state(), StepState::Invoked);
    }
}
