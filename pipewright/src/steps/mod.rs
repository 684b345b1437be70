//! Steps: the single-responsibility unit of pipeline work.
//!
//! A step variant implements the `Step` trait: a name, a cached output
//! contract, and one processing hook. Wiring-time contract validation lives
//! in `StepDefinition`; the single-use lifecycle and the runtime output
//! check live in `StepInstance`.

mod config;
mod definition;
mod instance;
mod io;
mod split;

pub use config::StepConfig;
pub use definition::StepDefinition;
pub use instance::StepInstance;
pub use io::{StepInputs, StepOutputs};
pub use split::{SplitConfig, TrainTestSplitStep};

use crate::contracts::OutputContract;
use crate::errors::StepError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for pipeline steps.
///
/// A step declares what it produces through its output contract and does
/// its work in `process`. Configuration is held by each variant as plain
/// data; the framework never sees it.
pub trait Step: Send + Sync + Debug {
    /// Returns the name of the step.
    fn name(&self) -> &str;

    /// Returns the contract describing the outputs `process` must return.
    ///
    /// Implementations compute the contract once at construction and hand
    /// out the cached value; this accessor must be cheap and stable.
    fn output_contract(&self) -> &OutputContract;

    /// Performs the step's work.
    ///
    /// Implementations report domain failures through the error; enforcing
    /// the output contract is the caller's job, not the hook's.
    ///
    /// # Errors
    /// Returns a `StepError` when the work itself fails.
    fn process(&self, inputs: &StepInputs) -> Result<StepOutputs, StepError>;
}

/// Lifecycle states of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// Declared and shape-validated, not yet bound into an instance.
    Defined,
    /// Bound into an instance, ready to run exactly once.
    Configured,
    /// The single permitted invocation has happened.
    Invoked,
}

impl StepState {
    /// Returns the snake_case name of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Defined => "defined",
            Self::Configured => "configured",
            Self::Invoked => "invoked",
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
