//! Structured logging utilities.
//!
//! Provides context-aware logging with the representation name, hydrate run
//! id and field name included in every log message.

use std::fmt;

/// Logging context for one engine.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub representation: String,
    pub run_id: Option<String>,
    pub field: Option<String>,
}

impl LogContext {
    pub fn new(representation: &str) -> Self {
        Self {
            representation: representation.to_string(),
            run_id: None,
            field: None,
        }
    }

    pub fn with_run(&self, run_id: &str) -> Self {
        Self {
            run_id: Some(run_id.to_string()),
            ..self.clone()
        }
    }

    pub fn with_field(&self, field: &str) -> Self {
        Self {
            field: Some(field.to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[representation={}]", self.representation)?;
        if let Some(run_id) = &self.run_id {
            write!(f, " [run={}]", run_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " [field={}]", field)?;
        }
        Ok(())
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("user");
        assert_eq!(format!("{}", ctx), "[representation=user]");

        let ctx_with_run = ctx.with_run("hydrate-1a2b3c4d");
        assert_eq!(
            format!("{}", ctx_with_run),
            "[representation=user] [run=hydrate-1a2b3c4d]"
        );

        assert_eq!(
            format!("{}", ctx_with_run.with_field("isStaff")),
            "[representation=user] [run=hydrate-1a2b3c4d] [field=isStaff]"
        );
    }

    #[test]
    fn test_field_without_run() {
        let ctx = LogContext::new("user").with_field("name");
        assert_eq!(format!("{}", ctx), "[representation=user] [field=name]");
    }
}
