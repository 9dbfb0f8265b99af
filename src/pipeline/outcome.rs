//! Validation results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::definition::step::StepDefinition;

/// The result of one validator against one sanitized value.
///
/// Failing verdicts list one of these per validator, including the ones
/// that passed, so callers see the full picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub definition: StepDefinition,
    pub value: Value,
    pub is_valid: bool,
}

/// Verdict of a field's validate phase.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldVerdict {
    Valid,
    Invalid(Vec<ValidationFailure>),
}

impl FieldVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldVerdict::Valid)
    }
}

/// Failing fields of a hydrate call, in record order.
pub type FieldErrors = IndexMap<String, Vec<ValidationFailure>>;

/// Result of a hydrate call.
#[derive(Debug, Clone, PartialEq)]
pub enum HydrateOutcome {
    /// Every recognized field passed.
    Valid,
    /// At least one field failed; passing fields were still hydrated.
    Invalid(FieldErrors),
}

impl HydrateOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, HydrateOutcome::Valid)
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            HydrateOutcome::Valid => None,
            HydrateOutcome::Invalid(errors) => Some(errors),
        }
    }

    pub fn into_errors(self) -> Option<FieldErrors> {
        match self {
            HydrateOutcome::Valid => None,
            HydrateOutcome::Invalid(errors) => Some(errors),
        }
    }
}
