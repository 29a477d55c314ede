//! Pushdown negotiation
//!
//! The planner decides, per query, which predicates and sort terms a table
//! function takes over from the host, and packs that decision into an
//! opaque token the host replays at execution start.
//!
//! # Design Principles
//!
//! - Deterministic: same columns + same offer -> same token
//! - Two-phase: the plan is an immutable value, never shared state
//! - Conservative: anything not explicitly supported stays with the host

mod ast;
mod codec;
mod errors;
mod explain;
#[allow(clippy::module_inception)]
mod planner;

pub use ast::{
    Constraint, ConstraintInfo, ConstraintOp, ConstraintUsage, IndexInfoInput, IndexInfoOutput,
    OrderBy, Plan, PlannedConstraint,
};
pub use codec::{decode, encode};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult};
pub use explain::PlanExplain;
pub use planner::{IndexPlanner, Negotiation, DEFAULT_BASE_COST, DEFAULT_COST_PER_CONSTRAINT};
