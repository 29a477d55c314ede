//! Constraint and order negotiation
//!
//! Given what the host offers for one query, decide which predicates and
//! sort terms the table function handles itself.
//!
//! Rules (strict order):
//! 1. Cost starts at the base cost
//! 2. Each requested order is accepted iff the column supports its direction;
//!    any miss clears `order_by_consumed`
//! 3. Each offered constraint must be usable, otherwise negotiation fails;
//!    the first column filter with a matching op accepts it
//! 4. Each accepted constraint lowers cost and takes the next argument slot

use crate::schema::Column;

use super::ast::{
    ConstraintUsage, IndexInfoInput, IndexInfoOutput, OrderBy, Plan, PlannedConstraint,
};
use super::codec;
use super::errors::{PlannerError, PlannerResult};

/// Default starting cost. High enough that the host prefers real indexes
/// unless the table function accepts constraints.
pub const DEFAULT_BASE_COST: f64 = 1000.0;

/// Default cost reduction per accepted constraint
pub const DEFAULT_COST_PER_CONSTRAINT: f64 = 10.0;

/// Outcome of a successful negotiation
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiation {
    /// Plan as committed (also encoded in `output.index_string`)
    pub plan: Plan,
    pub output: IndexInfoOutput,
}

/// Negotiates pushdown for one table function's columns
pub struct IndexPlanner<'a> {
    columns: &'a [Column],
    base_cost: f64,
    cost_per_constraint: f64,
}

impl<'a> IndexPlanner<'a> {
    pub fn new(columns: &'a [Column]) -> Self {
        Self {
            columns,
            base_cost: DEFAULT_BASE_COST,
            cost_per_constraint: DEFAULT_COST_PER_CONSTRAINT,
        }
    }

    pub fn with_costs(mut self, base_cost: f64, cost_per_constraint: f64) -> Self {
        self.base_cost = base_cost;
        self.cost_per_constraint = cost_per_constraint;
        self
    }

    /// Runs one negotiation.
    ///
    /// Deterministic: the same input always yields the same token.
    pub fn plan(&self, input: &IndexInfoInput) -> PlannerResult<Negotiation> {
        let mut cost = self.base_cost;
        let mut plan = Plan {
            constraints: Vec::with_capacity(input.constraints.len()),
            orders: Vec::new(),
        };

        let orders = self.accept_orders(&input.order_by);
        let order_by_consumed = orders.len() == input.order_by.len();
        plan.orders = orders;

        let mut usage = vec![ConstraintUsage::default(); input.constraints.len()];
        for (position, offered) in input.constraints.iter().enumerate() {
            if !offered.usable {
                return Err(PlannerError::constraint_unusable(position, offered.column));
            }

            let Some(column) = self.columns.get(offered.column) else {
                continue;
            };

            if let Some(filter) = column.filter_for(offered.op) {
                cost -= self.cost_per_constraint;
                usage[position] = ConstraintUsage {
                    argv_index: plan.constraints.len() + 1,
                    omit: filter.omit_check,
                };
                plan.constraints.push(PlannedConstraint {
                    column: offered.column,
                    op: filter.op,
                });
            }
        }

        let index_string = codec::encode(&plan)?;

        Ok(Negotiation {
            plan,
            output: IndexInfoOutput {
                estimated_cost: cost,
                index_string,
                constraint_usage: usage,
                order_by_consumed,
            },
        })
    }

    fn accept_orders(&self, requested: &[OrderBy]) -> Vec<OrderBy> {
        requested
            .iter()
            .filter(|order| {
                self.columns
                    .get(order.column)
                    .is_some_and(|c| c.order_by.supports(order.desc))
            })
            .copied()
            .collect()
    }
}
