//! # Pipewright
//!
//! Typed step contracts and an optional-integration registry for data
//! pipelines.
//!
//! Pipewright provides the pieces an orchestration engine builds on:
//!
//! - **Output contracts**: declarative descriptors of the named, typed
//!   artifacts a step produces, validated when declared and enforced when
//!   the step runs
//! - **Single-use steps**: one configuration, one invocation, with the
//!   lifecycle enforced instead of documented
//! - **Optional integrations**: register everything cheaply, activate
//!   best-effort, and keep running when an optional dependency is missing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pipewright::prelude::*;
//!
//! let catalog = ArtifactCatalog::with_builtins();
//! let step = TrainTestSplitStep::new(SplitConfig::default(), &catalog)?;
//!
//! let instance = StepInstance::new(Box::new(step));
//! let outputs = instance.run(
//!     &StepInputs::new().with_artifact("dataset", dataset),
//! )?;
//! let train = outputs.downcast_ref::<DatasetArtifact>("train");
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod artifacts;
pub mod contracts;
pub mod errors;
pub mod integrations;
pub mod steps;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifacts::{
        Artifact, ArtifactCatalog, ArtifactType, DatasetArtifact, ValueArtifact,
    };
    pub use crate::contracts::OutputContract;
    pub use crate::errors::{
        ConfigError, ContractError, ContractMismatchError, ContractViolationError,
        IntegrationError, PipewrightError, StepError, StepStateError,
    };
    pub use crate::integrations::{
        ActivationContext, ActivationReport, Integration, IntegrationHandle,
        IntegrationRegistry, IntegrationStatus,
    };
    pub use crate::steps::{
        SplitConfig, Step, StepConfig, StepDefinition, StepInputs, StepInstance,
        StepOutputs, StepState, TrainTestSplitStep,
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::sync::Arc;

    #[test]
    fn end_to_end_with_builtin_split() {
        let catalog = Arc::new(ArtifactCatalog::with_builtins());

        let registry = IntegrationRegistry::new();
        let report = registry.activate_all(&ActivationContext::new(Arc::clone(&catalog)));
        assert!(report.is_clean());

        let config = SplitConfig {
            ratio: 0.7,
            split_count: 5,
            seed: None,
        };
        let step = TrainTestSplitStep::new(config, &catalog).unwrap();
        let definition =
            StepDefinition::for_step(&step, step.output_contract().clone()).unwrap();
        assert_eq!(definition.name(), "train_test_split");

        let instance = StepInstance::new(Box::new(step));
        let inputs = StepInputs::new()
            .with_artifact("dataset", crate::testing::sample_dataset(10));
        let outputs = instance.run(&inputs).unwrap();

        let train = outputs.downcast_ref::<DatasetArtifact>("train").unwrap();
        let test = outputs.downcast_ref::<DatasetArtifact>("test").unwrap();
        assert_eq!(train.len() + test.len(), 10);
        assert_eq!(instance.state(), StepState::Invoked);
    }
}
