//! Engine configuration.
//!
//! An engine can be described as a JSON document:
//!
//! ```json
//! {
//!   "name": "user",
//!   "fields": {
//!     "isStaff": {
//!       "sanitizers": [{"method": "rtrim"}],
//!       "validators": [{"method": "isBoolean"}]
//!     }
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::definition::spec::{check_definitions, FieldSpecInput};
use crate::error::{ConfigLoadError, ConfigurationError};
use crate::pipeline::engine::{PipelineEngine, DEFAULT_NAME};

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Name and field definitions for one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpecInput>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            fields: IndexMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigLoadError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("CONFIG_READ path={} bytes={}", path.display(), text.len());
        Self::from_json_str(&text)
    }

    /// Every definition problem, without stopping at the first.
    pub fn check(&self) -> Vec<ConfigurationError> {
        check_definitions(&self.fields)
    }

    pub fn build(self) -> Result<PipelineEngine, ConfigurationError> {
        PipelineEngine::with_name(&self.name, self.fields)
    }
}

/// Read, parse and build an engine from a JSON config file.
pub fn load_engine(path: impl AsRef<Path>) -> Result<PipelineEngine, ConfigLoadError> {
    Ok(EngineConfig::from_path(path)?.build()?)
}
