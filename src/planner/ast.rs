//! Negotiation inputs, outputs, and the plan value
//!
//! A negotiation takes what the host offers ([`IndexInfoInput`]), decides
//! what the table function will handle, and records it as a [`Plan`]. The
//! plan crosses to execution as an opaque token; its constraints get their
//! values back, positionally, when the cursor is filtered.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Comparison operators the host can offer for pushdown.
///
/// Codes match the host's `SQLITE_INDEX_CONSTRAINT_*` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintOp {
    Eq,
    Gt,
    Le,
    Lt,
    Ge,
    Match,
    Like,
    Glob,
    Regexp,
    Ne,
    IsNot,
    IsNotNull,
    IsNull,
    Is,
    Limit,
    Offset,
    Function,
}

impl ConstraintOp {
    /// Host numeric code
    pub fn code(&self) -> u8 {
        match self {
            ConstraintOp::Eq => 2,
            ConstraintOp::Gt => 4,
            ConstraintOp::Le => 8,
            ConstraintOp::Lt => 16,
            ConstraintOp::Ge => 32,
            ConstraintOp::Match => 64,
            ConstraintOp::Like => 65,
            ConstraintOp::Glob => 66,
            ConstraintOp::Regexp => 67,
            ConstraintOp::Ne => 68,
            ConstraintOp::IsNot => 69,
            ConstraintOp::IsNotNull => 70,
            ConstraintOp::IsNull => 71,
            ConstraintOp::Is => 72,
            ConstraintOp::Limit => 73,
            ConstraintOp::Offset => 74,
            ConstraintOp::Function => 150,
        }
    }

    /// Inverse of [`ConstraintOp::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            2 => ConstraintOp::Eq,
            4 => ConstraintOp::Gt,
            8 => ConstraintOp::Le,
            16 => ConstraintOp::Lt,
            32 => ConstraintOp::Ge,
            64 => ConstraintOp::Match,
            65 => ConstraintOp::Like,
            66 => ConstraintOp::Glob,
            67 => ConstraintOp::Regexp,
            68 => ConstraintOp::Ne,
            69 => ConstraintOp::IsNot,
            70 => ConstraintOp::IsNotNull,
            71 => ConstraintOp::IsNull,
            72 => ConstraintOp::Is,
            73 => ConstraintOp::Limit,
            74 => ConstraintOp::Offset,
            150 => ConstraintOp::Function,
            _ => return None,
        })
    }

    /// SQL spelling, for explain output
    pub fn symbol(&self) -> &'static str {
        match self {
            ConstraintOp::Eq => "=",
            ConstraintOp::Gt => ">",
            ConstraintOp::Le => "<=",
            ConstraintOp::Lt => "<",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Match => "MATCH",
            ConstraintOp::Like => "LIKE",
            ConstraintOp::Glob => "GLOB",
            ConstraintOp::Regexp => "REGEXP",
            ConstraintOp::Ne => "!=",
            ConstraintOp::IsNot => "IS NOT",
            ConstraintOp::IsNotNull => "IS NOT NULL",
            ConstraintOp::IsNull => "IS NULL",
            ConstraintOp::Is => "IS",
            ConstraintOp::Limit => "LIMIT",
            ConstraintOp::Offset => "OFFSET",
            ConstraintOp::Function => "FUNCTION",
        }
    }

    /// Lower-bound operators (`>`, `>=`)
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, ConstraintOp::Gt | ConstraintOp::Ge)
    }

    /// Upper-bound operators (`<`, `<=`)
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, ConstraintOp::Lt | ConstraintOp::Le)
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A predicate the host offers during negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintInfo {
    /// Index into the registered column list. Out-of-range indices (such as
    /// the host's rowid pseudo-column) are never accepted.
    pub column: usize,
    pub op: ConstraintOp,
    /// False when the right-hand side cannot be evaluated at this point
    pub usable: bool,
}

impl ConstraintInfo {
    pub fn new(column: usize, op: ConstraintOp) -> Self {
        Self {
            column,
            op,
            usable: true,
        }
    }

    pub fn unusable(column: usize, op: ConstraintOp) -> Self {
        Self {
            column,
            op,
            usable: false,
        }
    }
}

/// A requested (or accepted) sort term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: usize,
    pub desc: bool,
}

impl OrderBy {
    pub fn asc(column: usize) -> Self {
        Self {
            column,
            desc: false,
        }
    }

    pub fn desc(column: usize) -> Self {
        Self { column, desc: true }
    }
}

/// Everything the host offers for one query
#[derive(Debug, Clone, Default)]
pub struct IndexInfoInput {
    pub constraints: Vec<ConstraintInfo>,
    pub order_by: Vec<OrderBy>,
}

impl IndexInfoInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraint(mut self, constraint: ConstraintInfo) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }
}

/// Per-offered-constraint decision handed back to the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintUsage {
    /// 1-based argument slot, 0 when the constraint was not accepted
    pub argv_index: usize,
    /// Host may skip re-checking this predicate
    pub omit: bool,
}

impl ConstraintUsage {
    pub fn is_used(&self) -> bool {
        self.argv_index > 0
    }
}

/// Negotiation result handed back to the host
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfoOutput {
    pub estimated_cost: f64,
    /// Opaque plan token, replayed to `filter`
    pub index_string: String,
    /// One entry per offered constraint, same order
    pub constraint_usage: Vec<ConstraintUsage>,
    pub order_by_consumed: bool,
}

/// An accepted constraint, before its value is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedConstraint {
    pub column: usize,
    pub op: ConstraintOp,
}

/// An accepted constraint with the value the query supplied
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub column: usize,
    pub op: ConstraintOp,
    pub value: Value,
}

impl Constraint {
    pub fn new(column: usize, op: ConstraintOp, value: impl Into<Value>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }
}

/// What a negotiation committed to: constraints in argument order plus the
/// sort terms the iterator must honour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub constraints: Vec<PlannedConstraint>,
    pub orders: Vec<OrderBy>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positional values `filter` must receive
    pub fn arity(&self) -> usize {
        self.constraints.len()
    }

    /// Highest column index referenced by the plan
    pub fn max_column(&self) -> Option<usize> {
        self.constraints
            .iter()
            .map(|c| c.column)
            .chain(self.orders.iter().map(|o| o.column))
            .max()
    }
}
