//! Error types for the pipewright core.
//!
//! The taxonomy separates definition-time authoring bugs (contract and
//! configuration errors, always fatal) from runtime misuse (state and
//! violation errors, fatal per invocation) and from availability failures
//! (integration errors, recovered at the registry boundary).

use crate::artifacts::ArtifactType;
use thiserror::Error;

/// The main error type for pipewright operations.
#[derive(Debug, Error)]
pub enum PipewrightError {
    /// A contract declaration error occurred.
    #[error("{0}")]
    Contract(#[from] ContractError),

    /// A declared contract did not match a hook shape.
    #[error("{0}")]
    ContractMismatch(#[from] ContractMismatchError),

    /// A hook returned outputs that violate its contract.
    #[error("{0}")]
    ContractViolation(#[from] ContractViolationError),

    /// A step configuration failed validation.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A step lifecycle rule was broken.
    #[error("{0}")]
    StepState(#[from] StepStateError),

    /// A step hook failed.
    #[error("{0}")]
    Step(#[from] StepError),

    /// An integration failed to resolve or activate.
    #[error("{0}")]
    Integration(#[from] IntegrationError),
}

/// Error raised when declaring an output contract with invalid entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// An output name was empty or whitespace-only.
    #[error("Output name cannot be empty or whitespace-only")]
    EmptyName,

    /// The same output name appeared more than once.
    #[error("Duplicate output name '{name}' in contract")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// An output was mapped to a type the artifact catalog does not know.
    #[error("Artifact type '{artifact_type}' for output '{name}' is not registered")]
    UnknownType {
        /// The output name.
        name: String,
        /// The unknown type tag.
        artifact_type: ArtifactType,
    },
}

/// A single output whose declared and observed types disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// The output name.
    pub name: String,
    /// The type the contract declares.
    pub expected: ArtifactType,
    /// The type that was found.
    pub found: ArtifactType,
}

impl std::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.name, self.expected, self.found
        )
    }
}

/// The structural difference between a contract and an observed shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractDiff {
    /// Names the contract declares but the shape lacks.
    pub missing: Vec<String>,
    /// Names the shape carries but the contract does not declare.
    pub unexpected: Vec<String>,
    /// Names present on both sides with disagreeing types.
    pub mismatched: Vec<TypeMismatch>,
}

impl ContractDiff {
    /// Returns true when both sides agree exactly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.mismatched.is_empty()
    }

    /// Renders the non-empty difference categories.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing outputs: [{}]", self.missing.join(", ")));
        }
        if !self.unexpected.is_empty() {
            parts.push(format!(
                "unexpected outputs: [{}]",
                self.unexpected.join(", ")
            ));
        }
        if !self.mismatched.is_empty() {
            let rendered: Vec<String> = self.mismatched.iter().map(ToString::to_string).collect();
            parts.push(format!("type mismatches: [{}]", rendered.join(", ")));
        }
        parts.join("; ")
    }
}

/// Error raised when a declared contract and a hook shape disagree.
///
/// Caught at definition time, before any pipeline executes.
#[derive(Debug, Clone, Error)]
#[error("Declared outputs do not match hook shape{}: {}", step_suffix(step), diff.describe())]
pub struct ContractMismatchError {
    /// The step involved, when known.
    pub step: Option<String>,
    /// The structural difference.
    pub diff: ContractDiff,
}

impl ContractMismatchError {
    /// Creates a new mismatch error from a non-empty diff.
    #[must_use]
    pub fn new(diff: ContractDiff) -> Self {
        Self { step: None, diff }
    }

    /// Names the step the mismatch was detected for.
    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }
}

/// Error raised when a hook's actual outputs violate its contract.
///
/// This is the runtime tier of contract checking: the definition-time shape
/// check cannot observe the names a hook really returns.
#[derive(Debug, Clone, Error)]
#[error("Returned outputs violate the declared contract{}: {}", step_suffix(step), diff.describe())]
pub struct ContractViolationError {
    /// The step whose hook misbehaved, when known.
    pub step: Option<String>,
    /// The structural difference.
    pub diff: ContractDiff,
}

impl ContractViolationError {
    /// Creates a new violation error from a non-empty diff.
    #[must_use]
    pub fn new(diff: ContractDiff) -> Self {
        Self { step: None, diff }
    }

    /// Names the step whose hook produced the outputs.
    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }
}

fn step_suffix(step: &Option<String>) -> String {
    step.as_ref()
        .map(|s| format!(" for step '{s}'"))
        .unwrap_or_default()
}

/// A single invalid configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// The offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

/// Error raised when a step configuration fails validation.
#[derive(Debug, Clone, Error)]
#[error("Invalid configuration{}: {}", step_suffix(step), render_issues(issues))]
pub struct ConfigError {
    /// The step the configuration was intended for, when known.
    pub step: Option<String>,
    /// Every offending field.
    pub issues: Vec<ConfigIssue>,
}

impl ConfigError {
    /// Creates an empty error to accumulate issues into.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: None,
            issues: Vec::new(),
        }
    }

    /// Creates an error for a single field.
    #[must_use]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new().with_issue(field, message)
    }

    /// Adds an issue.
    #[must_use]
    pub fn with_issue(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.issues.push(ConfigIssue {
            field: field.into(),
            message: message.into(),
        });
        self
    }

    /// Names the step the configuration belongs to.
    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }

    /// Returns true when no issues were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true when any issue names the given field.
    #[must_use]
    pub fn names_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

impl Default for ConfigError {
    fn default() -> Self {
        Self::new()
    }
}

fn render_issues(issues: &[ConfigIssue]) -> String {
    let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
    rendered.join("; ")
}

/// Error raised when a step instance is driven out of lifecycle order.
#[derive(Debug, Clone, Error)]
#[error("Step '{step}' cannot {operation} while {state}")]
pub struct StepStateError {
    /// The step instance involved.
    pub step: String,
    /// The state the instance was observed in.
    pub state: String,
    /// The operation that was attempted.
    pub operation: String,
}

impl StepStateError {
    /// Creates a new state error.
    #[must_use]
    pub fn new(
        step: impl Into<String>,
        state: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            step: step.into(),
            state: state.into(),
            operation: operation.into(),
        }
    }
}

/// Errors raised while resolving or activating an integration.
///
/// Both variants are expected, recoverable failures: the registry catches
/// them, records the entry as failed, and moves on. Anything else raised by
/// an activation hook is a programming fault and propagates.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The integration's code or dependencies could not be loaded.
    #[error("Integration '{key}' is unavailable: {reason}")]
    Unavailable {
        /// The registry key.
        key: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The integration resolved but its activation hook failed.
    #[error("Integration '{key}' failed to activate: {reason}")]
    Activation {
        /// The registry key.
        key: String,
        /// Why activation failed.
        reason: String,
        /// The underlying cause, when one was attached.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl IntegrationError {
    /// Creates an unavailability error.
    #[must_use]
    pub fn unavailable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an activation failure.
    #[must_use]
    pub fn activation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Activation {
            key: key.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause to an activation failure.
    ///
    /// Has no effect on unavailability errors, which carry their reason
    /// inline.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        if let Self::Activation {
            source: ref mut slot,
            ..
        } = self
        {
            *slot = Some(source.into());
        }
        self
    }

    /// Returns the registry key the failure belongs to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Unavailable { key, .. } | Self::Activation { key, .. } => key,
        }
    }

    /// Returns true for resolution failures.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Errors surfaced to the caller of a step invocation.
#[derive(Debug, Error)]
pub enum StepError {
    /// The hook's actual outputs violated the declared contract.
    #[error("{0}")]
    ContractViolation(#[from] ContractViolationError),

    /// The instance was driven out of lifecycle order.
    #[error("{0}")]
    State(#[from] StepStateError),

    /// The hook itself failed with a domain error.
    #[error("Step '{step}' failed: {message}")]
    Execution {
        /// The step that failed.
        step: String,
        /// What went wrong.
        message: String,
        /// The underlying cause, when one was attached.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StepError {
    /// Creates a domain execution failure.
    #[must_use]
    pub fn execution(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            step: step.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a domain execution failure with an underlying cause.
    #[must_use]
    pub fn execution_with_source(
        step: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Execution {
            step: step.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns true for errors the caller must treat as pipeline-definition
    /// bugs rather than retryable runtime failures.
    #[must_use]
    pub fn is_definition_bug(&self) -> bool {
        matches!(self, Self::ContractViolation(_) | Self::State(_))
    }
}
