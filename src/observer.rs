//! Event reporting.
//!
//! The client reports what it does through a [`SearchObserver`] chosen at
//! construction. The default forwards to `tracing`.

use tracing::{debug, error, info, trace, warn, Level};

/// Receives client events.
pub trait SearchObserver: Send + Sync {
    fn on_event(&self, level: Level, message: &str, fields: &[(&str, String)]);
}

/// Observer that forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        let fields = format_fields(fields);
        match level {
            Level::ERROR => error!(target: "ddgs", %fields, "{}", message),
            Level::WARN => warn!(target: "ddgs", %fields, "{}", message),
            Level::INFO => info!(target: "ddgs", %fields, "{}", message),
            Level::DEBUG => debug!(target: "ddgs", %fields, "{}", message),
            _ => trace!(target: "ddgs", %fields, "{}", message),
        }
    }
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&self, _level: Level, _message: &str, _fields: &[(&str, String)]) {}
}

fn format_fields(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}
