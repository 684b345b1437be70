//! Testing utilities for pipewright.
//!
//! This module provides:
//! - Stub steps with scripted outputs
//! - Scripted integrations and lazy resolvers
//! - Dataset and activation context fixtures

mod fixtures;
mod mocks;

pub use fixtures::{activation_context, resolver_for, sample_dataset, unavailable_resolver};
pub use mocks::{CountingIntegration, FailingIntegration, StubStep};
