//! Structured logging pipeline.
//!
//! # Data Flow
//! ```text
//! Logger handle (named per component)
//!     → record.rs (level, message, extras, exception)
//!     → sink.rs (severity filter, line-atomic write)
//!     → format.rs (JSON or text line, merges ambient request id)
//!     → stdout, one line per event
//!
//! Framework tracing events (tower-http, hyper):
//!     → bridge.rs (noise floor per target)
//!     → sink.rs
//!
//! correlation.rs holds the per-request id the formatter reads.
//! ```
//!
//! # Design Decisions
//! - JSON for production, text for local development
//! - The request id rides in task-local storage, never in signatures
//! - Reconfiguration swaps the whole sink; setup is idempotent, not additive

pub mod correlation;

mod bridge;
mod format;
mod record;
mod sink;

use std::io::Write;

pub use correlation::RequestId;
pub use format::LogFormat;
pub use record::{error_chain, Fields, Level};
pub use sink::SharedWriter;

use record::Record;

use crate::config::LoggingConfig;

/// Configure the process-wide logging pipeline from settings. Idempotent:
/// calling it again replaces the previous output destination instead of
/// adding a second one. Unrecognized level or format values fall back to
/// INFO and text.
pub fn configure_logging(config: &LoggingConfig) {
    configure_logging_with_writer(config, Box::new(std::io::stdout()));
}

/// Same as [`configure_logging`] but writing to the supplied destination.
/// Tests use this with a [`SharedWriter`] to capture output.
pub fn configure_logging_with_writer(config: &LoggingConfig, writer: Box<dyn Write + Send>) {
    let min_level = Level::parse(&config.level).unwrap_or(Level::Info);
    let format = LogFormat::parse(&config.format);
    sink::install(min_level, format, writer);
    bridge::install();
}

/// Surface the current request's correlation id, for collaborators that
/// want to attach it outside the log pipeline.
pub fn current_request_id() -> Option<RequestId> {
    correlation::get()
}

/// Named logging handle. Cheap to construct; components keep one per module
/// with the component path as the name.
#[derive(Debug, Clone)]
pub struct Logger {
    name: &'static str,
    context: Option<Fields>,
}

impl Logger {
    pub const fn new(name: &'static str) -> Self {
        Self { name, context: None }
    }

    /// A logger that merges `context` into every record it emits, under the
    /// caller's keys. Per-call extras win on key collision.
    pub fn with_context(name: &'static str, context: Fields) -> Self {
        Self {
            name,
            context: Some(context),
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message, None, None);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message, None, None);
    }

    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message, None, None);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message, None, None);
    }

    pub fn debug_with(&self, message: &str, extras: Fields) {
        self.log(Level::Debug, message, Some(extras), None);
    }

    pub fn info_with(&self, message: &str, extras: Fields) {
        self.log(Level::Info, message, Some(extras), None);
    }

    pub fn warning_with(&self, message: &str, extras: Fields) {
        self.log(Level::Warning, message, Some(extras), None);
    }

    pub fn error_with(&self, message: &str, extras: Fields) {
        self.log(Level::Error, message, Some(extras), None);
    }

    /// ERROR record carrying the rendered source chain of `error`.
    pub fn error_with_exception(
        &self,
        message: &str,
        extras: Fields,
        error: &(dyn std::error::Error + 'static),
    ) {
        self.log(Level::Error, message, Some(extras), Some(error_chain(error)));
    }

    /// The single underlying entry point the level helpers route through.
    pub fn log(
        &self,
        level: Level,
        message: &str,
        extras: Option<Fields>,
        exception: Option<String>,
    ) {
        let merged = match (&self.context, extras) {
            (None, extras) => extras,
            (Some(context), None) => Some(context.clone()),
            (Some(context), Some(extras)) => {
                let mut merged = context.clone();
                merged.extend(extras);
                Some(merged)
            }
        };

        sink::submit(&Record {
            level,
            logger: self.name,
            message,
            extras: merged.as_ref(),
            exception: exception.as_deref(),
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::fields;

    use super::*;

    #[test]
    fn test_context_logger_merges_per_call_extras() {
        let logger = Logger::with_context("ctx.test", fields! { "email" => "a@b.com" });
        // Merging happens inside log(); exercise the merge logic directly.
        let merged = match (&logger.context, Some(fields! { "operation" => "check" })) {
            (Some(context), Some(extras)) => {
                let mut merged = context.clone();
                merged.extend(extras);
                merged
            }
            _ => unreachable!(),
        };
        assert_eq!(merged["email"], "a@b.com");
        assert_eq!(merged["operation"], "check");
    }

    #[test]
    fn test_per_call_extras_win_on_collision() {
        let logger = Logger::with_context("ctx.test", fields! { "email" => "old@b.com" });
        let merged = match (&logger.context, Some(fields! { "email" => "new@b.com" })) {
            (Some(context), Some(extras)) => {
                let mut merged = context.clone();
                merged.extend(extras);
                merged
            }
            _ => unreachable!(),
        };
        assert_eq!(merged["email"], "new@b.com");
    }
}
