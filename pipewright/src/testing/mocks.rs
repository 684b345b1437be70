//! Stub steps and scripted integrations.

use crate::contracts::OutputContract;
use crate::errors::{IntegrationError, StepError};
use crate::integrations::{ActivationContext, Integration};
use crate::steps::{Step, StepInputs, StepOutputs};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A step with a fixed name and contract whose outputs are scripted.
///
/// The factory runs on every `process` call, so one stub definition can
/// back many single-use instances. Scripting outputs that disagree with
/// the contract is deliberate: that is how violation handling gets tested.
pub struct StubStep {
    name: String,
    contract: OutputContract,
    factory: Box<dyn Fn() -> Result<StepOutputs, StepError> + Send + Sync>,
}

impl StubStep {
    /// Creates a stub whose hook runs the given factory.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, contract: OutputContract, factory: F) -> Self
    where
        F: Fn() -> Result<StepOutputs, StepError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            contract,
            factory: Box::new(factory),
        }
    }

    /// Creates a stub that returns empty outputs.
    #[must_use]
    pub fn no_op(name: impl Into<String>, contract: OutputContract) -> Self {
        Self::new(name, contract, || Ok(StepOutputs::new()))
    }
}

impl std::fmt::Debug for StubStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubStep")
            .field("name", &self.name)
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

impl Step for StubStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_contract(&self) -> &OutputContract {
        &self.contract
    }

    fn process(&self, _inputs: &StepInputs) -> Result<StepOutputs, StepError> {
        (self.factory)()
    }
}

/// An integration that succeeds and counts its activations.
#[derive(Debug)]
pub struct CountingIntegration {
    name: String,
    activations: AtomicUsize,
}

impl CountingIntegration {
    /// Creates a counting integration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activations: AtomicUsize::new(0),
        }
    }

    /// Returns how many times `activate` has run.
    #[must_use]
    pub fn count(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

impl Integration for CountingIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn activate(&self, _ctx: &ActivationContext) -> Result<(), IntegrationError> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// An integration whose activation always fails.
#[derive(Debug)]
pub struct FailingIntegration {
    name: String,
    reason: String,
}

impl FailingIntegration {
    /// Creates a failing integration.
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl Integration for FailingIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn activate(&self, _ctx: &ActivationContext) -> Result<(), IntegrationError> {
        Err(IntegrationError::activation(
            self.name.clone(),
            self.reason.clone(),
        ))
    }
}
