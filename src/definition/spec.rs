//! Field specifications and the definition check.
//!
//! A [`FieldSpecInput`] is what callers write; [`FieldSpec::bind`] checks it
//! and resolves every step against the capability registry, producing the
//! immutable [`FieldSpec`] the engine runs.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::{CapabilityError, ConfigurationError};
use crate::pipeline::outcome::{FieldVerdict, ValidationFailure};
use crate::registry::{is_truthy, Capability};

use super::step::{BoundStep, StepDefinition};

/// Which list of a field definition a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Validator,
    Sanitizer,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Validator => write!(f, "Validator"),
            StepKind::Sanitizer => write!(f, "Sanitizer"),
        }
    }
}

/// Why a field definition was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecViolation {
    #[error("{kind} must be an object with a method property.")]
    MissingMethod { kind: StepKind, index: usize },

    #[error("{kind} must be an object with a method property. That method must exist in the \"validator\" package")]
    UnknownMethod {
        kind: StepKind,
        index: usize,
        method: String,
    },
}

impl SpecViolation {
    pub fn kind(&self) -> StepKind {
        match self {
            SpecViolation::MissingMethod { kind, .. } | SpecViolation::UnknownMethod { kind, .. } => {
                *kind
            }
        }
    }

    /// Position of the offending step within its list.
    pub fn index(&self) -> usize {
        match self {
            SpecViolation::MissingMethod { index, .. }
            | SpecViolation::UnknownMethod { index, .. } => *index,
        }
    }
}

/// A field definition as supplied by callers.
///
/// Each list may be a sequence of steps or a single step object; a single
/// step is read as a one-element sequence. Missing or `null` lists are
/// no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpecInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitizers: Option<Value>,
}

impl FieldSpecInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `validators` and `sanitizers` keys of a JSON definition.
    /// Anything other than an object defines no pipelines.
    pub fn from_value(value: &Value) -> Self {
        let list = |key: &str| value.get(key).cloned();
        Self {
            validators: list("validators"),
            sanitizers: list("sanitizers"),
        }
    }

    pub fn validator(mut self, step: StepDefinition) -> Self {
        push_step(&mut self.validators, step);
        self
    }

    pub fn sanitizer(mut self, step: StepDefinition) -> Self {
        push_step(&mut self.sanitizers, step);
        self
    }
}

fn push_step(list: &mut Option<Value>, step: StepDefinition) {
    let step = step.to_value();
    match list.take() {
        Some(Value::Array(mut items)) => {
            items.push(step);
            *list = Some(Value::Array(items));
        }
        None | Some(Value::Null) => *list = Some(Value::Array(vec![step])),
        Some(single) => *list = Some(Value::Array(vec![single, step])),
    }
}

/// A checked field definition: ordered sanitizers, then ordered validators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSpec {
    sanitizers: Vec<BoundStep>,
    validators: Vec<BoundStep>,
}

impl FieldSpec {
    /// Check `input` and resolve its steps.
    ///
    /// Validators are checked before sanitizers and the first violation is
    /// returned.
    pub fn bind(input: &FieldSpecInput) -> Result<Self, SpecViolation> {
        let validators = bind_list(StepKind::Validator, input.validators.as_ref())?;
        let sanitizers = bind_list(StepKind::Sanitizer, input.sanitizers.as_ref())?;
        Ok(Self {
            sanitizers,
            validators,
        })
    }

    /// Every violation in `input`, validators first.
    pub fn violations(input: &FieldSpecInput) -> Vec<SpecViolation> {
        let mut found = list_violations(StepKind::Validator, input.validators.as_ref());
        found.extend(list_violations(StepKind::Sanitizer, input.sanitizers.as_ref()));
        found
    }

    pub fn sanitizers(&self) -> &[BoundStep] {
        &self.sanitizers
    }

    pub fn validators(&self) -> &[BoundStep] {
        &self.validators
    }

    /// Run the sanitizers left to right, each consuming the previous output.
    pub fn sanitize(&self, value: Value) -> Result<Value, CapabilityError> {
        self.sanitizers
            .iter()
            .try_fold(value, |current, step| step.apply(&current))
    }

    /// Run every validator against `value`; there is no short-circuit.
    ///
    /// A failing verdict carries one entry per validator, passing ones
    /// included.
    pub fn validate(&self, value: &Value) -> Result<FieldVerdict, CapabilityError> {
        if self.validators.is_empty() {
            return Ok(FieldVerdict::Valid);
        }

        let results = self
            .validators
            .iter()
            .map(|step| {
                Ok(ValidationFailure {
                    definition: step.definition().clone(),
                    value: value.clone(),
                    is_valid: step.check(value)?,
                })
            })
            .collect::<Result<Vec<_>, CapabilityError>>()?;

        if results.iter().all(|r| r.is_valid) {
            Ok(FieldVerdict::Valid)
        } else {
            Ok(FieldVerdict::Invalid(results))
        }
    }
}

/// The definition check on its own, without keeping the bound result.
pub fn check_field_spec(input: &FieldSpecInput) -> Result<(), SpecViolation> {
    FieldSpec::bind(input).map(|_| ())
}

/// Every violation across a whole set of definitions, in definition order.
pub fn check_definitions(definitions: &IndexMap<String, FieldSpecInput>) -> Vec<ConfigurationError> {
    definitions
        .iter()
        .flat_map(|(field, input)| {
            FieldSpec::violations(input)
                .into_iter()
                .map(move |violation| ConfigurationError::new(field, violation))
        })
        .collect()
}

fn normalize(list: Option<&Value>) -> Vec<&Value> {
    match list {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

fn bind_list(kind: StepKind, list: Option<&Value>) -> Result<Vec<BoundStep>, SpecViolation> {
    normalize(list)
        .into_iter()
        .enumerate()
        .map(|(index, raw)| bind_step(kind, index, raw))
        .collect()
}

fn list_violations(kind: StepKind, list: Option<&Value>) -> Vec<SpecViolation> {
    normalize(list)
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| bind_step(kind, index, raw).err())
        .collect()
}

fn bind_step(kind: StepKind, index: usize, raw: &Value) -> Result<BoundStep, SpecViolation> {
    let method = match raw.get("method") {
        Some(method) if is_truthy(method) => method,
        _ => return Err(SpecViolation::MissingMethod { kind, index }),
    };

    let name = method.as_str().unwrap_or_default();
    let capability = Capability::from_name(name).ok_or_else(|| SpecViolation::UnknownMethod {
        kind,
        index,
        method: method.as_str().map_or_else(|| method.to_string(), str::to_string),
    })?;

    let extra = raw
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(key, _)| key.as_str() != "method" && key.as_str() != "options")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    let definition = StepDefinition {
        method: name.to_string(),
        options: raw.get("options").cloned(),
        extra,
    };
    Ok(BoundStep::new(definition, capability))
}
