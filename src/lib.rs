//! Representation Core - Declarative field sanitization and validation
//!
//! This crate turns loosely-typed input records into checked field values.
//! Callers declare, per field name, an ordered list of sanitizers and an
//! ordered list of validators; the engine then:
//!
//! 1. **Checks definitions up front** - every step must name a known capability
//! 2. **Sanitizes before validating** - validators see the cleaned value
//! 3. **Reports per field** - one failing field never blocks another
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `pipeline` - The engine: construction, hydrate, hydrated field map
//! - `definition` - Field definitions and the definition check
//! - `registry` - Built-in sanitizer/validator capabilities
//! - `config` - Loading engine definitions from JSON
//! - `logging` - Structured logging with representation context
//!
//! ## Example
//!
//! ```
//! use representation_core::definition::{FieldSpecInput, StepDefinition};
//! use representation_core::pipeline::{HydrateOutcome, PipelineEngine};
//! use serde_json::json;
//!
//! let mut engine = PipelineEngine::new([(
//!     "isStaff",
//!     FieldSpecInput::new()
//!         .sanitizer(StepDefinition::new("rtrim"))
//!         .validator(StepDefinition::new("isBoolean")),
//! )])
//! .unwrap();
//!
//! let outcome = engine.hydrate_json(r#"{"isStaff": "1    ", "extra": 5}"#).unwrap();
//! assert_eq!(outcome, HydrateOutcome::Valid);
//! assert_eq!(engine.field("isStaff"), Some(&json!("1")));
//! assert_eq!(engine.field("extra"), None);
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod registry;

pub use config::{load_engine, EngineConfig};
pub use definition::{check_definitions, check_field_spec, FieldSpec, FieldSpecInput, StepDefinition};
pub use error::{CapabilityError, ConfigLoadError, ConfigurationError, EngineError};
pub use logging::init_logger;
pub use pipeline::{FieldVerdict, HydrateOutcome, PipelineEngine, SharedEngine, ValidationFailure};
pub use registry::Capability;
