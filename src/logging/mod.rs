//! Structured logging with representation context.
//!
//! Provides logging macros and utilities that include the representation
//! name, hydrate run id and field name in every log message for easy
//! correlation.

pub mod structured;

pub use structured::*;

/// Install the process-wide logger.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
