//! Observable events for the table function adapter
//!
//! Events are explicit and typed. Each carries a default severity.

use std::fmt;

use super::logger::Severity;

/// Observable adapter events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registration
    /// Module added to a registry
    ModuleRegistered,
    /// Table declaration handed to the host
    TableDeclared,

    // Negotiation
    /// Negotiation produced a plan
    NegotiationComplete,
    /// Negotiation failed (unusable constraint, encode failure)
    NegotiationRejected,

    // Execution
    /// Cursor opened
    CursorOpen,
    /// Cursor filtered (iterator constructed)
    CursorFilter,
    /// Iterator reached end-of-data
    CursorExhausted,
    /// Iteration stopped by the ordering/constraint boundary check
    EarlyExit,
    /// Iterator reported a failure
    IteratorFailed,
    /// Cursor closed
    CursorClosed,
}

impl Event {
    /// Returns the event name as written to logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ModuleRegistered => "MODULE_REGISTERED",
            Event::TableDeclared => "TABLE_DECLARED",
            Event::NegotiationComplete => "NEGOTIATION_COMPLETE",
            Event::NegotiationRejected => "NEGOTIATION_REJECTED",
            Event::CursorOpen => "CURSOR_OPEN",
            Event::CursorFilter => "CURSOR_FILTER",
            Event::CursorExhausted => "CURSOR_EXHAUSTED",
            Event::EarlyExit => "EARLY_EXIT",
            Event::IteratorFailed => "ITERATOR_FAILED",
            Event::CursorClosed => "CURSOR_CLOSED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ModuleRegistered | Event::TableDeclared => Severity::Info,
            Event::NegotiationComplete | Event::CursorFilter => Severity::Info,
            Event::CursorOpen | Event::CursorClosed => Severity::Trace,
            Event::CursorExhausted | Event::EarlyExit => Severity::Trace,
            Event::NegotiationRejected => Severity::Warn,
            Event::IteratorFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
