//! Error types.
//!
//! Construction failures, capability failures, and the umbrella error for
//! JSON-text hydration are kept apart: a malformed definition means the engine
//! is never built, while a capability failure aborts one hydrate call.

use thiserror::Error;

use crate::definition::spec::SpecViolation;

/// A field definition failed the definition check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid field [{field}]: {violation}")]
pub struct ConfigurationError {
    pub field: String,
    pub violation: SpecViolation,
}

impl ConfigurationError {
    pub fn new(field: &str, violation: SpecViolation) -> Self {
        Self {
            field: field.to_string(),
            violation,
        }
    }

    /// Human-readable reason, without the field prefix.
    pub fn message(&self) -> String {
        self.violation.to_string()
    }
}

/// A capability rejected its input or its options.
///
/// The engine never catches these; they abort the hydrate call in progress.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("{method}: expected a string but received {received}")]
    ExpectedString {
        method: &'static str,
        received: &'static str,
    },

    #[error("{method}: invalid options: {reason}")]
    InvalidOptions {
        method: &'static str,
        reason: String,
    },
}

/// Errors from [`PipelineEngine::hydrate_json`](crate::pipeline::PipelineEngine::hydrate_json).
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// Errors loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Definition(#[from] ConfigurationError),
}

/// Short name of a JSON value's variant, used in error messages.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
