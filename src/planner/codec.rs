//! Plan token codec
//!
//! The token is compact JSON:
//! `{"constraints":[{"column":0,"op":"gt"}],"orders":[{"column":0,"desc":true}]}`.
//! It never carries bound values; those arrive positionally at `filter`.

use crate::value::Value;

use super::ast::{Constraint, Plan};
use super::errors::{PlannerError, PlannerResult};

/// Serialize a plan into its token
pub fn encode(plan: &Plan) -> PlannerResult<String> {
    serde_json::to_string(plan).map_err(PlannerError::encode_failed)
}

/// Parse a token produced by [`encode`]
pub fn decode(token: &str) -> PlannerResult<Plan> {
    serde_json::from_str(token).map_err(PlannerError::decode_failed)
}

impl Plan {
    /// Pair each planned constraint with its positional value.
    ///
    /// `values[i]` belongs to the constraint with `argv_index == i + 1`.
    pub fn bind(&self, values: &[Value]) -> PlannerResult<Vec<Constraint>> {
        if values.len() != self.constraints.len() {
            return Err(PlannerError::argument_mismatch(
                self.constraints.len(),
                values.len(),
            ));
        }
        Ok(self
            .constraints
            .iter()
            .zip(values)
            .map(|(planned, value)| Constraint {
                column: planned.column,
                op: planned.op,
                value: value.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{ConstraintOp, OrderBy, PlannedConstraint, PlannerErrorCode};

    fn sample_plan() -> Plan {
        Plan {
            constraints: vec![
                PlannedConstraint {
                    column: 1,
                    op: ConstraintOp::Eq,
                },
                PlannedConstraint {
                    column: 0,
                    op: ConstraintOp::Gt,
                },
            ],
            orders: vec![OrderBy::desc(0)],
        }
    }

    #[test]
    fn test_token_shape() {
        let token = encode(&sample_plan()).unwrap();
        assert_eq!(
            token,
            r#"{"constraints":[{"column":1,"op":"eq"},{"column":0,"op":"gt"}],"orders":[{"column":0,"desc":true}]}"#
        );
    }

    #[test]
    fn test_empty_plan_round_trip() {
        let token = encode(&Plan::new()).unwrap();
        assert_eq!(decode(&token).unwrap(), Plan::new());
    }

    #[test]
    fn test_malformed_token() {
        for token in ["", "not json", r#"{"constraints":[{"column":0,"op":"between"}],"orders":[]}"#] {
            let err = decode(token).unwrap_err();
            assert_eq!(err.code(), PlannerErrorCode::VtabPlanDecodeFailed);
        }
    }

    #[test]
    fn test_bind_keeps_order() {
        let bound = sample_plan()
            .bind(&[Value::Integer(10), Value::Integer(50)])
            .unwrap();
        assert_eq!(bound[0], Constraint::new(1, ConstraintOp::Eq, 10i64));
        assert_eq!(bound[1], Constraint::new(0, ConstraintOp::Gt, 50i64));
    }

    #[test]
    fn test_bind_count_mismatch() {
        let err = sample_plan().bind(&[Value::Integer(1)]).unwrap_err();
        assert_eq!(err.code(), PlannerErrorCode::VtabPlanArgumentMismatch);

        let err = Plan::new().bind(&[Value::Null]).unwrap_err();
        assert_eq!(err.code(), PlannerErrorCode::VtabPlanArgumentMismatch);
    }
}
