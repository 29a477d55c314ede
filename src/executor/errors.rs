//! Cursor error types
//!
//! Error codes:
//! - VTAB_PLAN_DECODE_FAILED (DECODING)
//! - VTAB_ITERATOR_CONSTRUCTION (CONSTRUCTION)
//! - VTAB_ITERATION_FAILED (ITERATION)
//! - VTAB_UNKNOWN_COLUMN (PROJECTION)
//! - VTAB_PROJECTION_FAILED (PROJECTION)
//! - VTAB_NO_CURRENT_ROW (CONTRACT)
//! - VTAB_CURSOR_NOT_FILTERED (CONTRACT)
//! - VTAB_CURSOR_CLOSED (CONTRACT)

use std::fmt;

use crate::planner::PlannerError;
use crate::source::SourceError;

/// Where in the cursor lifecycle a failure belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Plan token or bound values could not be replayed
    Decoding,
    /// The factory refused to build an iterator
    Construction,
    /// The iterator failed while producing a row
    Iteration,
    /// A row could not project a column
    Projection,
    /// The host drove the cursor out of order
    Contract,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Decoding => write!(f, "DECODING"),
            ErrorCategory::Construction => write!(f, "CONSTRUCTION"),
            ErrorCategory::Iteration => write!(f, "ITERATION"),
            ErrorCategory::Projection => write!(f, "PROJECTION"),
            ErrorCategory::Contract => write!(f, "CONTRACT"),
        }
    }
}

/// Cursor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorErrorCode {
    VtabPlanDecodeFailed,
    VtabIteratorConstruction,
    VtabIterationFailed,
    VtabUnknownColumn,
    VtabProjectionFailed,
    VtabNoCurrentRow,
    VtabCursorNotFiltered,
    VtabCursorClosed,
}

impl CursorErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            CursorErrorCode::VtabPlanDecodeFailed => "VTAB_PLAN_DECODE_FAILED",
            CursorErrorCode::VtabIteratorConstruction => "VTAB_ITERATOR_CONSTRUCTION",
            CursorErrorCode::VtabIterationFailed => "VTAB_ITERATION_FAILED",
            CursorErrorCode::VtabUnknownColumn => "VTAB_UNKNOWN_COLUMN",
            CursorErrorCode::VtabProjectionFailed => "VTAB_PROJECTION_FAILED",
            CursorErrorCode::VtabNoCurrentRow => "VTAB_NO_CURRENT_ROW",
            CursorErrorCode::VtabCursorNotFiltered => "VTAB_CURSOR_NOT_FILTERED",
            CursorErrorCode::VtabCursorClosed => "VTAB_CURSOR_CLOSED",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CursorErrorCode::VtabPlanDecodeFailed => ErrorCategory::Decoding,
            CursorErrorCode::VtabIteratorConstruction => ErrorCategory::Construction,
            CursorErrorCode::VtabIterationFailed => ErrorCategory::Iteration,
            CursorErrorCode::VtabUnknownColumn | CursorErrorCode::VtabProjectionFailed => {
                ErrorCategory::Projection
            }
            CursorErrorCode::VtabNoCurrentRow
            | CursorErrorCode::VtabCursorNotFiltered
            | CursorErrorCode::VtabCursorClosed => ErrorCategory::Contract,
        }
    }
}

impl fmt::Display for CursorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Cursor error with context
#[derive(Debug, Clone)]
pub struct CursorError {
    code: CursorErrorCode,
    message: String,
    /// Column being projected, if applicable
    column: Option<usize>,
}

impl CursorError {
    pub fn decode_failed(reason: impl fmt::Display) -> Self {
        Self {
            code: CursorErrorCode::VtabPlanDecodeFailed,
            message: reason.to_string(),
            column: None,
        }
    }

    pub fn construction(source: &SourceError) -> Self {
        Self {
            code: CursorErrorCode::VtabIteratorConstruction,
            message: format!("Iterator construction failed: {}", source),
            column: None,
        }
    }

    pub fn iteration(source: &SourceError) -> Self {
        Self {
            code: CursorErrorCode::VtabIterationFailed,
            message: format!("Iterator failed: {}", source),
            column: None,
        }
    }

    pub fn unknown_column(column: usize) -> Self {
        Self {
            code: CursorErrorCode::VtabUnknownColumn,
            message: format!("Unknown column {}", column),
            column: Some(column),
        }
    }

    pub fn projection(column: usize, reason: impl fmt::Display) -> Self {
        Self {
            code: CursorErrorCode::VtabProjectionFailed,
            message: format!("Column {} projection failed: {}", column, reason),
            column: Some(column),
        }
    }

    /// Maps a row's projection failure onto the cursor taxonomy
    pub fn from_projection(column: usize, source: &SourceError) -> Self {
        match source {
            SourceError::UnknownColumn(c) => Self::unknown_column(*c),
            other => Self::projection(column, other),
        }
    }

    pub fn no_current_row(column: usize) -> Self {
        Self {
            code: CursorErrorCode::VtabNoCurrentRow,
            message: format!("Column {} requested with no current row", column),
            column: Some(column),
        }
    }

    pub fn not_filtered(operation: &str) -> Self {
        Self {
            code: CursorErrorCode::VtabCursorNotFiltered,
            message: format!("{} called before filter", operation),
            column: None,
        }
    }

    pub fn closed(operation: &str) -> Self {
        Self {
            code: CursorErrorCode::VtabCursorClosed,
            message: format!("{} called on a closed cursor", operation),
            column: None,
        }
    }

    pub fn code(&self) -> CursorErrorCode {
        self.code
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }
}

impl From<PlannerError> for CursorError {
    fn from(err: PlannerError) -> Self {
        Self::decode_failed(err.message())
    }
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.category(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for CursorError {}

/// Result type for cursor operations
pub type CursorResult<T> = Result<T, CursorError>;
