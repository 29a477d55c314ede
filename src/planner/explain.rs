//! Explain output for a negotiation
//!
//! Deterministic, human-readable summary of what a table function agreed to
//! handle for a query, or why it refused.

use std::fmt;

use crate::schema::Column;

use super::ast::IndexInfoInput;
use super::errors::PlannerError;
use super::planner::Negotiation;

/// Explain output
#[derive(Debug, Clone, PartialEq)]
pub struct PlanExplain {
    /// Whether negotiation succeeded
    pub accepted: bool,
    /// Accepted constraints as `column op ?N [omit]`
    pub constraints: Vec<String>,
    /// Offered constraints left to the host
    pub residual: Vec<String>,
    /// Accepted sort terms as `column asc|desc`
    pub orders: Vec<String>,
    pub order_by_consumed: Option<bool>,
    pub estimated_cost: Option<f64>,
    pub rejection_reason: Option<String>,
    pub rejection_code: Option<String>,
}

impl PlanExplain {
    /// Builds the explain view of a successful negotiation
    pub fn from_negotiation(
        columns: &[Column],
        input: &IndexInfoInput,
        negotiation: &Negotiation,
    ) -> Self {
        let mut accepted = Vec::new();
        let mut residual = Vec::new();

        for (offered, usage) in input
            .constraints
            .iter()
            .zip(&negotiation.output.constraint_usage)
        {
            let name = column_name(columns, offered.column);
            if usage.is_used() {
                let omit = if usage.omit { " [omit]" } else { "" };
                accepted.push((
                    usage.argv_index,
                    format!("{} {} ?{}{}", name, offered.op, usage.argv_index, omit),
                ));
            } else {
                residual.push(format!("{} {}", name, offered.op));
            }
        }
        accepted.sort_by_key(|(argv, _)| *argv);
        let constraints = accepted.into_iter().map(|(_, c)| c).collect();

        let orders = negotiation
            .plan
            .orders
            .iter()
            .map(|o| {
                let dir = if o.desc { "desc" } else { "asc" };
                format!("{} {}", column_name(columns, o.column), dir)
            })
            .collect();

        Self {
            accepted: true,
            constraints,
            residual,
            orders,
            order_by_consumed: Some(negotiation.output.order_by_consumed),
            estimated_cost: Some(negotiation.output.estimated_cost),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Builds the explain view of a failed negotiation
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            constraints: Vec::new(),
            residual: Vec::new(),
            orders: Vec::new(),
            order_by_consumed: None,
            estimated_cost: None,
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

fn column_name(columns: &[Column], index: usize) -> String {
    columns
        .get(index)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("#{}", index))
}

impl fmt::Display for PlanExplain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if !self.accepted {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
            return Ok(());
        }

        writeln!(f, "Status: ACCEPTED")?;
        if let Some(cost) = self.estimated_cost {
            writeln!(f, "Cost: {}", cost)?;
        }
        if !self.constraints.is_empty() {
            writeln!(f, "Constraints:")?;
            for c in &self.constraints {
                writeln!(f, "  - {}", c)?;
            }
        }
        if !self.residual.is_empty() {
            writeln!(f, "Host Filters:")?;
            for c in &self.residual {
                writeln!(f, "  - {}", c)?;
            }
        }
        if !self.orders.is_empty() {
            writeln!(f, "Order:")?;
            for o in &self.orders {
                writeln!(f, "  - {}", o)?;
            }
        }
        if let Some(consumed) = self.order_by_consumed {
            writeln!(f, "Order Consumed: {}", consumed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{ConstraintInfo, ConstraintOp, IndexPlanner, OrderBy};
    use crate::schema::{ColumnFilter, ColumnType, SortSupport};

    fn columns() -> Vec<Column> {
        vec![
            Column::new("letter", ColumnType::Text)
                .with_ops([ConstraintOp::Ge])
                .with_order_by(SortSupport::Both),
            Column::new("skip", ColumnType::Integer)
                .hidden()
                .with_filter(ColumnFilter::omitted(ConstraintOp::Eq)),
        ]
    }

    #[test]
    fn test_explain_accepted() {
        let columns = columns();
        let input = IndexInfoInput::new()
            .with_constraint(ConstraintInfo::new(1, ConstraintOp::Eq))
            .with_constraint(ConstraintInfo::new(0, ConstraintOp::Ge))
            .with_constraint(ConstraintInfo::new(0, ConstraintOp::Like))
            .with_order_by(OrderBy::desc(0));
        let negotiation = IndexPlanner::new(&columns).plan(&input).unwrap();

        let explain = PlanExplain::from_negotiation(&columns, &input, &negotiation);
        assert!(explain.accepted);
        assert_eq!(explain.constraints, vec!["skip = ?1 [omit]", "letter >= ?2"]);
        assert_eq!(explain.residual, vec!["letter LIKE"]);
        assert_eq!(explain.orders, vec!["letter desc"]);

        let text = explain.to_string();
        assert!(text.contains("Status: ACCEPTED"));
        assert!(text.contains("Cost: 980"));
        assert!(text.contains("Order Consumed: true"));
    }

    #[test]
    fn test_explain_rejected() {
        let columns = columns();
        let input = IndexInfoInput::new().with_constraint(ConstraintInfo::unusable(0, ConstraintOp::Ge));
        let err = IndexPlanner::new(&columns).plan(&input).unwrap_err();

        let explain = PlanExplain::from_error(&err);
        assert!(!explain.accepted);
        let text = explain.to_string();
        assert!(text.contains("Status: REJECTED"));
        assert!(text.contains("VTAB_CONSTRAINT_UNUSABLE"));
    }

    #[test]
    fn test_unknown_column_named_by_index() {
        assert_eq!(column_name(&columns(), 7), "#7");
    }
}
