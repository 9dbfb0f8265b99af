//! Thread-safe engine handle.
//!
//! Serializes hydrate calls against one engine so concurrent callers never
//! race on the hydrated field map.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::{CapabilityError, EngineError};

use super::engine::PipelineEngine;
use super::outcome::HydrateOutcome;

/// Cloneable handle to one engine behind a mutex.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<PipelineEngine>>,
}

impl SharedEngine {
    pub fn new(engine: PipelineEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn hydrate(&self, record: &Map<String, Value>) -> Result<HydrateOutcome, CapabilityError> {
        self.inner.lock().hydrate(record)
    }

    pub fn hydrate_json(&self, input: &str) -> Result<HydrateOutcome, EngineError> {
        self.inner.lock().hydrate_json(input)
    }

    /// Snapshot of the hydrated values.
    pub fn fields(&self) -> IndexMap<String, Value> {
        self.inner.lock().fields().clone()
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.inner.lock().field(name).cloned()
    }

    /// Run `f` with the engine locked.
    pub fn with_engine<R>(&self, f: impl FnOnce(&PipelineEngine) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl From<PipelineEngine> for SharedEngine {
    fn from(engine: PipelineEngine) -> Self {
        Self::new(engine)
    }
}
