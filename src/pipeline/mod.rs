//! Pipeline orchestration module.
//!
//! The engine that runs field pipelines over input records:
//! - `engine` - construction, hydrate, hydrated field map
//! - `outcome` - validation failures and hydrate results
//! - `context` - per-call logging context
//! - `shared` - mutex-guarded handle for concurrent callers

pub mod context;
pub mod engine;
pub mod outcome;
pub mod shared;

pub use context::*;
pub use engine::*;
pub use outcome::*;
pub use shared::*;
