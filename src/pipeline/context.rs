//! Hydrate run context.
//!
//! Provides per-call context for logging so that every message from one
//! hydrate call can be correlated.

use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for a single hydrate call.
#[derive(Debug, Clone)]
pub struct HydrateContext {
    pub run_id: String,
    pub representation: String,
}

impl HydrateContext {
    pub fn new(representation: &str) -> Self {
        let run_id = format!("hydrate-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            run_id,
            representation: representation.to_string(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.representation).with_run(&self.run_id)
    }

    /// Create a field-scoped context for this run.
    pub fn field_context(&self, field: &str) -> LogContext {
        self.log_context().with_field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_short_and_unique() {
        let a = HydrateContext::new("user");
        let b = HydrateContext::new("user");
        assert!(a.run_id.starts_with("hydrate-"));
        assert_eq!(a.run_id.len(), "hydrate-".len() + 8);
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn test_field_context() {
        let run = HydrateContext::new("user");
        let ctx = run.field_context("name");
        assert_eq!(ctx.representation, "user");
        assert_eq!(ctx.run_id.as_deref(), Some(run.run_id.as_str()));
        assert_eq!(ctx.field.as_deref(), Some("name"));
    }
}
