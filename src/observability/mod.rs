//! Observability for the table function adapter
//!
//! - Structured logging (JSON lines)
//! - Typed events
//! - Per-module counters
//!
//! Observability is read-only: nothing here changes what a cursor yields.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, TableFuncMetrics};

/// Log a typed event at its own severity, if it passes `threshold`
pub fn log_event(threshold: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log_at(threshold, event.severity(), event.as_str(), fields);
}
