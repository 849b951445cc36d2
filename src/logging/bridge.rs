//! Bridge from framework `tracing` events into the sink.
//!
//! # Responsibilities
//! - Convert events emitted by tower-http/hyper into sink records
//! - Apply the per-target noise floor (access-style channels need WARNING+)
//!
//! # Design Decisions
//! - The global subscriber is installed at most once; reconfiguration lives
//!   entirely in the swappable sink the bridge writes through

use tracing::field::{Field, Visit};
use tracing::{Event, Level as TracingLevel, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::logging::record::{Fields, Level, Record};
use crate::logging::sink;

/// Install the bridge as the global tracing subscriber. Safe to call more
/// than once; later calls leave the existing subscriber in place.
pub(crate) fn install() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(TracingBridge)
        .try_init();
}

/// Minimum severity accepted from a third-party target. Access-style
/// request/response channels are noisy at their native level, so they are
/// held to a higher floor than general framework logs.
fn floor_for(target: &str) -> Level {
    if target.starts_with("tower_http") {
        Level::Warning
    } else {
        Level::Info
    }
}

fn map_level(level: &TracingLevel) -> Level {
    if *level == TracingLevel::ERROR {
        Level::Error
    } else if *level == TracingLevel::WARN {
        Level::Warning
    } else if *level == TracingLevel::INFO {
        Level::Info
    } else {
        // TRACE folds into DEBUG.
        Level::Debug
    }
}

struct TracingBridge;

impl<S: Subscriber> Layer<S> for TracingBridge {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = map_level(metadata.level());
        let target = metadata.target();
        if level < floor_for(target) {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        let message = collector
            .message
            .unwrap_or_else(|| metadata.name().to_string());

        sink::submit(&Record {
            level,
            logger: target,
            message: &message,
            extras: if collector.extras.is_empty() {
                None
            } else {
                Some(&collector.extras)
            },
            exception: None,
        });
    }
}

/// Collects an event's fields; the conventional `message` field becomes the
/// record message, everything else lands in extras.
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    extras: Fields,
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.extras.insert(
                field.name().to_string(),
                serde_json::Value::String(format!("{value:?}")),
            );
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.extras
                .insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.extras
            .insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.extras
            .insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.extras
            .insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.extras
            .insert(field.name().to_string(), serde_json::Value::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_channels_held_to_warning() {
        assert_eq!(floor_for("tower_http::trace::on_request"), Level::Warning);
        assert_eq!(floor_for("tower_http::trace::on_response"), Level::Warning);
        assert_eq!(floor_for("hyper::proto"), Level::Info);
        assert_eq!(floor_for("reqwest::connect"), Level::Info);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(map_level(&TracingLevel::TRACE), Level::Debug);
        assert_eq!(map_level(&TracingLevel::DEBUG), Level::Debug);
        assert_eq!(map_level(&TracingLevel::INFO), Level::Info);
        assert_eq!(map_level(&TracingLevel::WARN), Level::Warning);
        assert_eq!(map_level(&TracingLevel::ERROR), Level::Error);
    }
}
