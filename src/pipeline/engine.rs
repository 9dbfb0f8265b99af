//! The field-pipeline engine.
//!
//! Hydrating a record runs, for each recognized field:
//! 1. Sanitize phase (sanitizers left to right)
//! 2. Validate phase (every validator, no short-circuit)
//! 3. Store the sanitized value, or record the field's failures
//!
//! Unknown fields are skipped. Fields pass or fail independently.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::definition::spec::{FieldSpec, FieldSpecInput};
use crate::error::{value_kind, CapabilityError, ConfigurationError, EngineError};
use crate::logging::structured::LogContext;
use crate::{log_debug, log_info, log_warn};

use super::context::HydrateContext;
use super::outcome::{FieldErrors, FieldVerdict, HydrateOutcome};

/// Name used in log context when none is given.
pub const DEFAULT_NAME: &str = "representation";

/// Owns a fixed set of field pipelines and the values hydrated through them.
///
/// `hydrate` takes `&mut self`; wrap the engine in
/// [`SharedEngine`](super::shared::SharedEngine) to hydrate from several
/// threads.
#[derive(Debug, Clone)]
pub struct PipelineEngine {
    name: String,
    field_definitions: IndexMap<String, FieldSpec>,
    fields: IndexMap<String, Value>,
}

impl PipelineEngine {
    /// Build an engine from field definitions.
    ///
    /// Fails on the first definition that does not pass the definition
    /// check.
    pub fn new<I, K>(definitions: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, FieldSpecInput)>,
        K: Into<String>,
    {
        Self::with_name(DEFAULT_NAME, definitions)
    }

    /// Build a named engine; the name prefixes every log line.
    pub fn with_name<I, K>(name: &str, definitions: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, FieldSpecInput)>,
        K: Into<String>,
    {
        let ctx = LogContext::new(name);
        let mut field_definitions = IndexMap::new();

        for (field, input) in definitions {
            let field = field.into();
            let spec = FieldSpec::bind(&input).map_err(|violation| {
                log::warn!(
                    "{} DEFINITION_REJECTED field={} reason={}",
                    ctx,
                    field,
                    violation
                );
                ConfigurationError::new(&field, violation)
            })?;
            field_definitions.insert(field, spec);
        }

        log_info!(
            ctx,
            "ENGINE_CREATED",
            fields = field_definitions.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            name: name.to_string(),
            field_definitions,
            fields: IndexMap::new(),
        })
    }

    /// Build an engine from a JSON object of field definitions.
    pub fn from_json_map(definitions: &Map<String, Value>) -> Result<Self, ConfigurationError> {
        Self::new(
            definitions
                .iter()
                .map(|(field, value)| (field.clone(), FieldSpecInput::from_value(value))),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values hydrated so far, by field name.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn definition(&self, name: &str) -> Option<&FieldSpec> {
        self.field_definitions.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_definitions.keys().map(String::as_str)
    }

    /// Sanitize and validate every recognized field of `record`.
    ///
    /// Passing fields are written to [`fields`](Self::fields) even when other
    /// fields fail. A capability error aborts the call; fields hydrated
    /// earlier in the same call stay written.
    pub fn hydrate(&mut self, record: &Map<String, Value>) -> Result<HydrateOutcome, CapabilityError> {
        let run = HydrateContext::new(&self.name);
        let run_ctx = run.log_context();
        log::debug!("{} HYDRATE_START keys={}", run_ctx, record.len());

        let mut errors = FieldErrors::new();

        for (name, raw) in record {
            let ctx = run.field_context(name);

            let Some(spec) = self.field_definitions.get(name) else {
                log::debug!("{} FIELD_SKIPPED reason=no_definition", ctx);
                continue;
            };

            let clean = match spec.sanitize(raw.clone()) {
                Ok(clean) => clean,
                Err(e) => {
                    log::warn!("{} SANITIZE_FAILED error={}", ctx, e);
                    return Err(e);
                }
            };

            let verdict = match spec.validate(&clean) {
                Ok(verdict) => verdict,
                Err(e) => {
                    log::warn!("{} VALIDATE_FAILED error={}", ctx, e);
                    return Err(e);
                }
            };

            match verdict {
                FieldVerdict::Valid => {
                    log_debug!(ctx, "FIELD_HYDRATED", value = clean);
                    self.fields.insert(name.clone(), clean);
                }
                FieldVerdict::Invalid(failures) => {
                    log_debug!(
                        ctx,
                        "FIELD_INVALID",
                        failed = failures.iter().filter(|f| !f.is_valid).count(),
                        checked = failures.len()
                    );
                    errors.insert(name.clone(), failures);
                }
            }
        }

        if errors.is_empty() {
            log::debug!("{} HYDRATE_COMPLETE errors=0", run_ctx);
            return Ok(HydrateOutcome::Valid);
        }

        log_warn!(
            run_ctx,
            "HYDRATE_ERRORS",
            fields = errors.keys().collect::<Vec<_>>()
        );
        log::debug!(
            "{} HYDRATE_ERROR_DETAIL errors={}",
            run_ctx,
            serde_json::to_string(&errors).unwrap_or_default()
        );

        Ok(HydrateOutcome::Invalid(errors))
    }

    /// Parse `input` as a JSON object and hydrate it.
    pub fn hydrate_json(&mut self, input: &str) -> Result<HydrateOutcome, EngineError> {
        match serde_json::from_str::<Value>(input)? {
            Value::Object(record) => Ok(self.hydrate(&record)?),
            other => Err(EngineError::NotAnObject(value_kind(&other))),
        }
    }
}
