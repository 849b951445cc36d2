//! Log record primitives.
//!
//! # Responsibilities
//! - Severity level enumeration with a strict ordering
//! - The in-flight record shape handed to the formatter
//! - Error-chain rendering for records that carry a failure

use std::fmt;

use serde_json::Map;

/// Open-ended extra fields attached to a record, merged at the top level of
/// JSON output. Insertion order is preserved through serialization.
pub type Fields = Map<String, serde_json::Value>;

/// Severity of a log event. Ordered: `Debug < Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    /// Uppercase name as it appears in emitted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    /// Parse a level name, case-insensitive. `WARN` is accepted as an alias
    /// for `WARNING`. Returns `None` for anything unrecognized so callers
    /// can fall back to their own default.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARNING" | "WARN" => Some(Level::Warning),
            "ERROR" => Some(Level::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log event, captured before serialization. Borrowed because a
/// record only lives for the duration of one sink submission.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    pub level: Level,
    pub logger: &'a str,
    pub message: &'a str,
    pub extras: Option<&'a Fields>,
    pub exception: Option<&'a str>,
}

/// Render an error and its full source chain into a single block of text,
/// one cause per line.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\ncaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// Build a [`Fields`] map from `"key" => value` pairs. Values go through
/// `serde_json::to_value`; anything that fails to serialize is dropped
/// rather than aborting the record.
#[macro_export]
macro_rules! fields {
    () => { $crate::logging::Fields::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::logging::Fields::new();
        $(
            if let Ok(value) = ::serde_json::to_value($value) {
                map.insert(($key).to_string(), value);
            }
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("debug"), Some(Level::Debug));
        assert_eq!(Level::parse("INFO"), Some(Level::Info));
        assert_eq!(Level::parse("Warning"), Some(Level::Warning));
        assert_eq!(Level::parse("warn"), Some(Level::Warning));
        assert_eq!(Level::parse("ERROR"), Some(Level::Error));
        assert_eq!(Level::parse("verbose"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn test_fields_macro() {
        let map = fields! { "email" => "a@b.com", "attempt" => 2 };
        assert_eq!(map["email"], "a@b.com");
        assert_eq!(map["attempt"], 2);
    }

    #[test]
    fn test_fields_macro_drops_unserializable() {
        struct Broken;
        impl serde::Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("nope"))
            }
        }

        let map = fields! { "ok" => 1, "bad" => Broken };
        assert_eq!(map["ok"], 1);
        assert!(!map.contains_key("bad"));
    }

    #[test]
    fn test_error_chain_walks_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let outer: Box<dyn std::error::Error> =
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, inner));

        let rendered = error_chain(outer.as_ref());
        assert!(rendered.contains("disk on fire"));
        assert!(rendered.contains("caused by:"));
    }
}
