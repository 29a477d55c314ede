//! Planner error types
//!
//! Error codes:
//! - VTAB_CONSTRAINT_UNUSABLE (REJECT)
//! - VTAB_PLAN_ENCODE_FAILED (REJECT)
//! - VTAB_PLAN_DECODE_FAILED (REJECT)
//! - VTAB_PLAN_ARGUMENT_MISMATCH (REJECT)

use std::fmt;

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Host offered a constraint it marked unusable
    VtabConstraintUnusable,
    /// Plan could not be serialized
    VtabPlanEncodeFailed,
    /// Plan token could not be parsed
    VtabPlanDecodeFailed,
    /// Positional values do not line up with planned constraints
    VtabPlanArgumentMismatch,
}

impl PlannerErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::VtabConstraintUnusable => "VTAB_CONSTRAINT_UNUSABLE",
            PlannerErrorCode::VtabPlanEncodeFailed => "VTAB_PLAN_ENCODE_FAILED",
            PlannerErrorCode::VtabPlanDecodeFailed => "VTAB_PLAN_DECODE_FAILED",
            PlannerErrorCode::VtabPlanArgumentMismatch => "VTAB_PLAN_ARGUMENT_MISMATCH",
        }
    }

    /// True for failures of the planning phase, false for failures replaying
    /// a plan at execution start
    pub fn is_planning(&self) -> bool {
        matches!(
            self,
            PlannerErrorCode::VtabConstraintUnusable | PlannerErrorCode::VtabPlanEncodeFailed
        )
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error with context
#[derive(Debug, Clone)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    /// Offered-constraint position, when one is to blame
    constraint: Option<usize>,
}

impl PlannerError {
    pub fn constraint_unusable(position: usize, column: usize) -> Self {
        Self {
            code: PlannerErrorCode::VtabConstraintUnusable,
            message: format!(
                "Constraint {} on column {} is not usable in this plan",
                position, column
            ),
            constraint: Some(position),
        }
    }

    pub fn encode_failed(reason: impl fmt::Display) -> Self {
        Self {
            code: PlannerErrorCode::VtabPlanEncodeFailed,
            message: format!("Plan encoding failed: {}", reason),
            constraint: None,
        }
    }

    pub fn decode_failed(reason: impl fmt::Display) -> Self {
        Self {
            code: PlannerErrorCode::VtabPlanDecodeFailed,
            message: format!("Plan decoding failed: {}", reason),
            constraint: None,
        }
    }

    pub fn argument_mismatch(expected: usize, got: usize) -> Self {
        Self {
            code: PlannerErrorCode::VtabPlanArgumentMismatch,
            message: format!("Plan expects {} argument(s), got {}", expected, got),
            constraint: None,
        }
    }

    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn constraint(&self) -> Option<usize> {
        self.constraint
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
