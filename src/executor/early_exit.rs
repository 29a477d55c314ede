//! Sort-order boundary check
//!
//! When rows arrive in the order the plan asked for, a range constraint on
//! the same column stops holding for good once one row falls outside it:
//!
//! - `>`  with DESC: exit once value <= bound
//! - `>=` with DESC: exit once value <  bound
//! - `<`  with ASC:  exit once value >= bound
//! - `<=` with ASC:  exit once value >  bound
//!
//! Any incomparable value ends the check for that row with no decision.

use std::cmp::Ordering;

use crate::planner::{Constraint, ConstraintOp, OrderBy};
use crate::source::Row;
use crate::value::{compare, Comparison};

use super::context::Context;
use super::errors::{CursorError, CursorResult};

/// True when `row` proves no later row can satisfy the bound constraints
pub(crate) fn passed_boundary(
    row: &dyn Row,
    constraints: &[Constraint],
    orders: &[OrderBy],
) -> CursorResult<bool> {
    let mut ctx = Context::new();

    for order in orders {
        for constraint in constraints.iter().filter(|c| c.column == order.column) {
            if !applies(constraint.op, order.desc) {
                continue;
            }

            row.column(&mut ctx, order.column)
                .map_err(|e| CursorError::from_projection(order.column, &e))?;

            let ordering = match compare(ctx.value(), &constraint.value) {
                Comparison::Ordered(ordering) => ordering,
                Comparison::Incomparable => return Ok(false),
            };

            if crossed(constraint.op, ordering) {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

fn applies(op: ConstraintOp, desc: bool) -> bool {
    (desc && op.is_lower_bound()) || (!desc && op.is_upper_bound())
}

/// `ordering` is row value compared to the bound
fn crossed(op: ConstraintOp, ordering: Ordering) -> bool {
    match op {
        ConstraintOp::Gt => ordering != Ordering::Greater,
        ConstraintOp::Ge => ordering == Ordering::Less,
        ConstraintOp::Lt => ordering != Ordering::Less,
        ConstraintOp::Le => ordering == Ordering::Greater,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceError, SourceResult};

    struct IntRow(i64);

    impl Row for IntRow {
        fn column(&self, ctx: &mut Context, col: usize) -> SourceResult<()> {
            match col {
                0 => ctx.result_int64(self.0),
                1 => ctx.result_float(f64::NAN),
                _ => return Err(SourceError::UnknownColumn(col)),
            }
            Ok(())
        }
    }

    struct TextRow(&'static str);

    impl Row for TextRow {
        fn column(&self, ctx: &mut Context, _col: usize) -> SourceResult<()> {
            ctx.result_text(self.0);
            Ok(())
        }
    }

    fn check(row: &dyn Row, op: ConstraintOp, bound: i64, order: OrderBy) -> bool {
        passed_boundary(row, &[Constraint::new(0, op, bound)], &[order]).unwrap()
    }

    #[test]
    fn test_gt_desc() {
        assert!(!check(&IntRow(51), ConstraintOp::Gt, 50, OrderBy::desc(0)));
        assert!(check(&IntRow(50), ConstraintOp::Gt, 50, OrderBy::desc(0)));
        assert!(check(&IntRow(49), ConstraintOp::Gt, 50, OrderBy::desc(0)));
    }

    #[test]
    fn test_ge_desc() {
        assert!(!check(&IntRow(50), ConstraintOp::Ge, 50, OrderBy::desc(0)));
        assert!(check(&IntRow(49), ConstraintOp::Ge, 50, OrderBy::desc(0)));
    }

    #[test]
    fn test_lt_asc() {
        assert!(!check(&IntRow(49), ConstraintOp::Lt, 50, OrderBy::asc(0)));
        assert!(check(&IntRow(50), ConstraintOp::Lt, 50, OrderBy::asc(0)));
    }

    #[test]
    fn test_le_asc() {
        assert!(!check(&IntRow(50), ConstraintOp::Le, 50, OrderBy::asc(0)));
        assert!(check(&IntRow(51), ConstraintOp::Le, 50, OrderBy::asc(0)));
    }

    #[test]
    fn test_direction_mismatch_never_exits() {
        assert!(!check(&IntRow(0), ConstraintOp::Gt, 50, OrderBy::asc(0)));
        assert!(!check(&IntRow(100), ConstraintOp::Lt, 50, OrderBy::desc(0)));
        assert!(!check(&IntRow(0), ConstraintOp::Eq, 50, OrderBy::desc(0)));
    }

    #[test]
    fn test_other_column_ignored() {
        let constraints = [Constraint::new(0, ConstraintOp::Gt, 50i64)];
        assert!(!passed_boundary(&IntRow(0), &constraints, &[OrderBy::desc(2)]).unwrap());
    }

    #[test]
    fn test_text_bound() {
        let constraints = [Constraint::new(0, ConstraintOp::Ge, "m")];
        let orders = [OrderBy::desc(0)];
        assert!(!passed_boundary(&TextRow("m"), &constraints, &orders).unwrap());
        assert!(passed_boundary(&TextRow("l"), &constraints, &orders).unwrap());
    }

    #[test]
    fn test_incomparable_skips_remaining_checks() {
        // NaN on column 1 stops the scan before column 0 is looked at
        let constraints = [
            Constraint::new(1, ConstraintOp::Gt, 0.5),
            Constraint::new(0, ConstraintOp::Gt, 50i64),
        ];
        let orders = [OrderBy::desc(1), OrderBy::desc(0)];
        assert!(!passed_boundary(&IntRow(0), &constraints, &orders).unwrap());
    }

    #[test]
    fn test_projection_error_propagates() {
        let constraints = [Constraint::new(5, ConstraintOp::Gt, 1i64)];
        let err = passed_boundary(&IntRow(0), &constraints, &[OrderBy::desc(5)]).unwrap_err();
        assert_eq!(err.code(), crate::executor::CursorErrorCode::VtabUnknownColumn);
    }
}
