//! Sanitizer and validator steps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CapabilityError;
use crate::registry::Capability;

/// One `{method, options}` entry of a sanitizer or validator list.
///
/// Keys other than `method` and `options` are kept in `extra` and reported
/// back unchanged in validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepDefinition {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            options: None,
            extra: Map::new(),
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    /// Attach a key that is carried along but not interpreted.
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// JSON object form, as it appears inside a field definition.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("method".to_string(), Value::String(self.method.clone()));
        if let Some(options) = &self.options {
            obj.insert("options".to_string(), options.clone());
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        Value::Object(obj)
    }
}

/// A step whose method has been resolved against the registry.
///
/// The definition is owned, so callers keep full control over the values
/// they built the engine from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStep {
    definition: StepDefinition,
    capability: Capability,
}

impl BoundStep {
    pub(crate) fn new(definition: StepDefinition, capability: Capability) -> Self {
        Self {
            definition,
            capability,
        }
    }

    pub fn definition(&self) -> &StepDefinition {
        &self.definition
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Apply as a sanitizer.
    pub fn apply(&self, value: &Value) -> Result<Value, CapabilityError> {
        self.capability
            .invoke(value, self.definition.options.as_ref())
    }

    /// Apply as a validator.
    pub fn check(&self, value: &Value) -> Result<bool, CapabilityError> {
        self.capability
            .check(value, self.definition.options.as_ref())
    }
}
