//! Record formatting.
//!
//! # Responsibilities
//! - Serialize one record into one line, JSON or text
//! - Merge the ambient correlation id and caller-supplied extras
//! - Degrade by omission: a missing optional field never fails a record
//!
//! # Design Decisions
//! - JSON keys keep a fixed leading order: timestamp, level, logger, message
//! - `request_id` is omitted entirely when absent, never emitted as null
//! - Text mode stays a bare `ts - logger - LEVEL - message` line; it carries
//!   no correlation id or extras

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::logging::correlation;
use crate::logging::record::Record;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    /// Parse a format name, case-insensitive. Anything other than `json`
    /// falls back to text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Render a record as a single line, without trailing newline. Wall-clock
/// time is read here, at format time.
pub(crate) fn render(format: LogFormat, record: &Record<'_>) -> String {
    match format {
        LogFormat::Json => render_json(record),
        LogFormat::Text => render_text(record),
    }
}

fn render_json(record: &Record<'_>) -> String {
    let mut fields = Map::new();
    fields.insert(
        "timestamp".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    fields.insert("level".to_string(), Value::String(record.level.to_string()));
    fields.insert("logger".to_string(), Value::String(record.logger.to_string()));
    fields.insert("message".to_string(), Value::String(record.message.to_string()));

    if let Some(id) = correlation::get() {
        fields.insert("request_id".to_string(), Value::String(id.into_inner()));
    }

    if let Some(extras) = record.extras {
        for (key, value) in extras {
            fields.insert(key.clone(), value.clone());
        }
    }

    if let Some(exception) = record.exception {
        fields.insert("exception".to_string(), Value::String(exception.to_string()));
    }

    serde_json::to_string(&fields).unwrap_or_else(|_| String::from("{}"))
}

fn render_text(record: &Record<'_>) -> String {
    format!(
        "{} - {} - {} - {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        record.logger,
        record.level,
        record.message
    )
}
