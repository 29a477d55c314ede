//! Cursor over one table function invocation
//!
//! Lifecycle (strict order):
//! 1. `open` yields an Idle cursor
//! 2. `filter` decodes the plan token, binds values, builds the iterator and
//!    pulls the first row
//! 3. `advance` pulls the next row until end-of-data or early exit
//! 4. `close` releases the iterator; the cursor is then terminal
//!
//! Once a cursor is exhausted the iterator is dropped and never called again.

use std::sync::Arc;

use uuid::Uuid;

use crate::module::TableFuncModule;
use crate::observability::{log_event, Event};
use crate::planner::{decode, Constraint, OrderBy};
use crate::source::{Row, RowIterator};
use crate::value::{ColumnValue, Value};

use super::context::Context;
use super::early_exit::passed_boundary;
use super::errors::{CursorError, CursorResult};

enum State {
    Idle,
    Active(Scan),
    Closed,
}

/// Iteration state between `filter` and `close`
struct Scan {
    /// `None` once exhausted
    iter: Option<Box<dyn RowIterator>>,
    current: Option<Box<dyn Row>>,
    constraints: Vec<Constraint>,
    orders: Vec<OrderBy>,
    /// Advances since filter; doubles as rowid
    count: i64,
}

/// Execution cursor
pub struct Cursor {
    id: Uuid,
    module: Arc<TableFuncModule>,
    state: State,
}

impl Cursor {
    pub(crate) fn new(module: Arc<TableFuncModule>) -> Self {
        let cursor = Self {
            id: Uuid::new_v4(),
            module,
            state: State::Idle,
        };
        cursor.module.metrics().increment_cursors_opened();
        cursor.log(Event::CursorOpen, &[]);
        cursor
    }

    /// Unique id used in log lines
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Start (or restart) iteration for a negotiated plan.
    ///
    /// `values[i]` is the host value for argument slot `i + 1`.
    pub fn filter(&mut self, token: &str, values: &[Value]) -> CursorResult<()> {
        if matches!(self.state, State::Closed) {
            return Err(CursorError::closed("filter"));
        }
        // A previous iterator is released before the new one is built
        self.state = State::Idle;

        let plan = decode(token)?;
        let width = self.module.columns().len();
        if let Some(max) = plan.max_column() {
            if max >= width {
                return Err(CursorError::decode_failed(format!(
                    "Plan references column {} but table has {} column(s)",
                    max, width
                )));
            }
        }
        let constraints = plan.bind(values)?;

        let iter = match self.module.factory().create(&constraints, &plan.orders) {
            Ok(iter) => iter,
            Err(e) => {
                self.module.metrics().increment_iteration_errors();
                let reason = e.to_string();
                self.log(
                    Event::IteratorFailed,
                    &[("phase", "create"), ("reason", reason.as_str())],
                );
                return Err(CursorError::construction(&e));
            }
        };

        let constraint_count = constraints.len().to_string();
        let order_count = plan.orders.len().to_string();
        self.log(
            Event::CursorFilter,
            &[("constraints", constraint_count.as_str()), ("orders", order_count.as_str())],
        );

        self.state = State::Active(Scan {
            iter: Some(iter),
            current: None,
            constraints,
            orders: plan.orders,
            count: 0,
        });
        self.pull()
    }

    /// Move to the next row. A no-op once exhausted.
    pub fn advance(&mut self) -> CursorResult<()> {
        let scan = self.scan_mut("advance")?;
        if scan.iter.is_none() {
            scan.current = None;
            return Ok(());
        }
        scan.count += 1;
        self.pull()
    }

    /// True when there is no current row
    pub fn eof(&self) -> bool {
        match &self.state {
            State::Active(scan) => scan.current.is_none(),
            State::Idle | State::Closed => true,
        }
    }

    /// Project column `index` of the current row into `ctx`
    pub fn column(&self, ctx: &mut Context, index: usize) -> CursorResult<()> {
        let scan = self.scan("column")?;
        if index >= self.module.columns().len() {
            return Err(CursorError::unknown_column(index));
        }
        let row = scan
            .current
            .as_ref()
            .ok_or_else(|| CursorError::no_current_row(index))?;
        row.column(ctx, index)
            .map_err(|e| CursorError::from_projection(index, &e))
    }

    /// Project column `index` of the current row and return the value.
    ///
    /// A row that reports `result_error` surfaces as a projection error.
    pub fn column_value(&self, index: usize) -> CursorResult<ColumnValue> {
        let mut ctx = Context::new();
        self.column(&mut ctx, index)?;
        match ctx.take() {
            ColumnValue::Error(message) => Err(CursorError::projection(index, message)),
            value => Ok(value),
        }
    }

    /// Zero-based position of the current row since the last `filter`
    pub fn rowid(&self) -> CursorResult<i64> {
        Ok(self.scan("rowid")?.count)
    }

    /// Release the iterator. Idempotent.
    pub fn close(&mut self) {
        if matches!(self.state, State::Closed) {
            return;
        }
        let rowid = match &self.state {
            State::Active(scan) => scan.count.to_string(),
            _ => "-".to_string(),
        };
        self.state = State::Closed;
        self.log(Event::CursorClosed, &[("rowid", rowid.as_str())]);
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    fn scan(&self, operation: &str) -> CursorResult<&Scan> {
        match &self.state {
            State::Active(scan) => Ok(scan),
            State::Idle => Err(CursorError::not_filtered(operation)),
            State::Closed => Err(CursorError::closed(operation)),
        }
    }

    fn scan_mut(&mut self, operation: &str) -> CursorResult<&mut Scan> {
        match &mut self.state {
            State::Active(scan) => Ok(scan),
            State::Idle => Err(CursorError::not_filtered(operation)),
            State::Closed => Err(CursorError::closed(operation)),
        }
    }

    /// Pull one row from the iterator and make it current, unless it is past
    /// the boundary of an accepted order.
    fn pull(&mut self) -> CursorResult<()> {
        let module = Arc::clone(&self.module);
        let early_exit = module.config().is_early_exit_enabled();

        let State::Active(scan) = &mut self.state else {
            return Ok(());
        };
        let Some(iter) = scan.iter.as_mut() else {
            scan.current = None;
            return Ok(());
        };

        module.metrics().increment_iterator_pulls();
        let pulled = iter.next();

        let outcome = match pulled {
            Ok(Some(row)) => {
                let exit = early_exit
                    && match passed_boundary(&*row, &scan.constraints, &scan.orders) {
                        Ok(exit) => exit,
                        Err(e) => {
                            scan.current = None;
                            scan.iter = None;
                            return Err(e);
                        }
                    };
                if exit {
                    scan.current = None;
                    scan.iter = None;
                    module.metrics().increment_early_exits();
                    Some(Event::EarlyExit)
                } else {
                    scan.current = Some(row);
                    module.metrics().increment_rows_produced();
                    None
                }
            }
            Ok(None) => {
                scan.current = None;
                scan.iter = None;
                Some(Event::CursorExhausted)
            }
            Err(e) => {
                scan.current = None;
                scan.iter = None;
                module.metrics().increment_iteration_errors();
                let reason = e.to_string();
                let rowid = scan.count.to_string();
                self.log(
                    Event::IteratorFailed,
                    &[
                        ("phase", "next"),
                        ("reason", reason.as_str()),
                        ("rowid", rowid.as_str()),
                    ],
                );
                return Err(CursorError::iteration(&e));
            }
        };

        if let Some(event) = outcome {
            let rowid = scan.count.to_string();
            self.log(event, &[("rowid", rowid.as_str())]);
        }
        Ok(())
    }

    fn log(&self, event: Event, fields: &[(&str, &str)]) {
        let id = self.id.to_string();
        let mut all = Vec::with_capacity(fields.len() + 2);
        all.push(("cursor", id.as_str()));
        all.push(("table", self.module.name()));
        all.extend_from_slice(fields);
        log_event(self.module.config().log_level, event, &all);
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.close();
    }
}
