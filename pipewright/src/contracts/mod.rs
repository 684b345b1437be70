//! Output contracts: declarative descriptors of what a step produces.
//!
//! A contract is declared once against the artifact catalog, shape-checked
//! against a step variant's advertised outputs at wiring time, and enforced
//! against the outputs a hook actually returns after every invocation.

mod output;

pub use output::OutputContract;
