//! Step configuration records.

use crate::errors::ConfigError;
use serde::de::DeserializeOwned;

/// Trait for step configuration records.
///
/// Configurations are plain serde data with defaults where defaults make
/// sense. `from_value` is the one entry point pipeline wiring uses:
/// deserialize, then validate, with every failure reported against the
/// field that caused it.
pub trait StepConfig: DeserializeOwned + Send + Sync {
    /// Checks range and cross-field rules after deserialization.
    ///
    /// # Errors
    /// Returns a `ConfigError` carrying one issue per offending field.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Builds a configuration from raw JSON.
    ///
    /// # Errors
    /// Deserialization failures become a `ConfigError` naming the field
    /// serde reports; validation failures pass through unchanged.
    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| ConfigError::field(field_from_serde(&e), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

// serde_json quotes the offending field in backticks ("missing field
// `split_count`"); fall back to the whole document when it names none.
fn field_from_serde(err: &serde_json::Error) -> String {
    err.to_string()
        .split('`')
        .nth(1)
        .map_or_else(|| "<document>".to_string(), str::to_string)
}
