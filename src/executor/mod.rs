//! Execution engine
//!
//! Drives a data source through one query: replays the negotiated plan,
//! pulls rows on demand and projects columns for the host.
//!
//! # Execution Flow (strict order)
//!
//! 1. Decode the plan token and check its column references
//! 2. Bind host values to planned constraints, by position
//! 3. Build the iterator from bound constraints and accepted orders
//! 4. Pull a row; stop on end-of-data or, when enabled, a crossed boundary
//! 5. Project columns of the current row on request
//!
//! # Invariants
//!
//! - Rows stream lazily; nothing is buffered or re-sorted
//! - An exhausted iterator is never called again
//! - Misuse is reported as an error, never answered with a default value

mod context;
mod cursor;
mod early_exit;
mod errors;

pub use context::Context;
pub use cursor::Cursor;
pub use errors::{CursorError, CursorErrorCode, CursorResult, ErrorCategory};
