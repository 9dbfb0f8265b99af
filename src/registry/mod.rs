//! Capability registry.
//!
//! The built-in library of named sanitizers and validators that field
//! definitions refer to:
//! - `capability` - the closed `Capability` enum and its name table
//! - `predicates` - pass/fail checks (`isBoolean`, `isLength`, ...)
//! - `transforms` - value rewrites (`rtrim`, `toBoolean`, ...)

pub mod capability;
mod options;
mod predicates;
mod transforms;

pub use capability::*;
pub(crate) use options::is_truthy;
