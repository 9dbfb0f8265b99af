//! Field definition module.
//!
//! Raw and checked forms of per-field pipelines:
//! - `step` - `{method, options}` entries and their registry-bound form
//! - `spec` - field specifications and the definition check

pub mod spec;
pub mod step;

pub use spec::*;
pub use step::*;
