//! Shared test harness
//!
//! Plays the host's side of the handshake: offers predicates, collects the
//! argument values the table function asked for, drives the cursor, then
//! re-checks predicates that were not omitted and sorts when the order was
//! not consumed.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use vtab::value::compare;
use vtab::{
    Column, ColumnFilter, ColumnType, ColumnValue, Constraint, ConstraintInfo, ConstraintOp,
    Context, IndexInfoInput, IndexInfoOutput, OrderBy, Row, RowIterator, SortSupport, SourceError,
    SourceResult, Table, TableFuncConfig, TableFuncModule, Value,
};

// =============================================================================
// Host Emulation
// =============================================================================

/// One predicate from a WHERE clause
#[derive(Debug, Clone)]
pub struct Predicate {
    pub column: usize,
    pub op: ConstraintOp,
    pub value: Value,
}

/// The parts of a query the table function gets to see
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub predicates: Vec<Predicate>,
    pub order_by: Vec<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: usize, op: ConstraintOp, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            column,
            op,
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn index_info(&self) -> IndexInfoInput {
        let mut input = IndexInfoInput::new();
        for p in &self.predicates {
            input = input.with_constraint(ConstraintInfo::new(p.column, p.op));
        }
        for o in &self.order_by {
            input = input.with_order_by(*o);
        }
        input
    }
}

/// What the host ended up returning
pub struct QueryResult {
    pub rows: Vec<Vec<ColumnValue>>,
    pub rowids: Vec<i64>,
    pub output: IndexInfoOutput,
}

impl QueryResult {
    /// Column `col` of every row
    pub fn column(&self, col: usize) -> Vec<ColumnValue> {
        self.rows.iter().map(|r| r[col].clone()).collect()
    }

    pub fn ints(&self, col: usize) -> Vec<i64> {
        self.column(col)
            .into_iter()
            .map(|v| match v {
                ColumnValue::Int64(i) => i,
                ColumnValue::Int(i) => i as i64,
                other => panic!("not an integer: {:?}", other),
            })
            .collect()
    }

    pub fn texts(&self, col: usize) -> Vec<String> {
        self.column(col)
            .into_iter()
            .map(|v| match v {
                ColumnValue::Text(s) => s,
                other => panic!("not text: {:?}", other),
            })
            .collect()
    }
}

/// Run `query` against `table` the way the host would
pub fn run(table: &Table, query: &Query) -> QueryResult {
    let output = table.best_index(&query.index_info()).unwrap();

    let accepted = output.constraint_usage.iter().filter(|u| u.is_used()).count();
    let mut argv = vec![Value::Null; accepted];
    for (predicate, usage) in query.predicates.iter().zip(&output.constraint_usage) {
        if usage.is_used() {
            argv[usage.argv_index - 1] = predicate.value.clone();
        }
    }

    let width = table.columns().len();
    let mut cursor = table.open();
    cursor.filter(&output.index_string, &argv).unwrap();

    let mut rows = Vec::new();
    let mut rowids = Vec::new();
    while !cursor.eof() {
        let row: Vec<ColumnValue> = (0..width).map(|i| cursor.column_value(i).unwrap()).collect();
        let rowid = cursor.rowid().unwrap();

        let keep = query
            .predicates
            .iter()
            .zip(&output.constraint_usage)
            .filter(|(_, usage)| !usage.omit)
            .all(|(p, _)| holds(&row[p.column], p.op, &p.value));
        if keep {
            rows.push(row);
            rowids.push(rowid);
        }
        cursor.advance().unwrap();
    }
    cursor.close();

    if !output.order_by_consumed {
        rows.sort_by(|a, b| host_order(a, b, &query.order_by));
    }

    QueryResult {
        rows,
        rowids,
        output,
    }
}

fn holds(actual: &ColumnValue, op: ConstraintOp, bound: &Value) -> bool {
    let Some(ordering) = compare(actual, bound).ordering() else {
        return false;
    };
    match op {
        ConstraintOp::Eq => ordering == Ordering::Equal,
        ConstraintOp::Gt => ordering == Ordering::Greater,
        ConstraintOp::Ge => ordering != Ordering::Less,
        ConstraintOp::Lt => ordering == Ordering::Less,
        ConstraintOp::Le => ordering != Ordering::Greater,
        _ => true,
    }
}

fn host_order(a: &[ColumnValue], b: &[ColumnValue], order_by: &[OrderBy]) -> Ordering {
    for o in order_by {
        let ordering = b[o.column]
            .to_value()
            .and_then(|bv| compare(&a[o.column], &bv).ordering())
            .unwrap_or(Ordering::Equal);
        let ordering = if o.desc { ordering.reverse() } else { ordering };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

pub fn connect(module: TableFuncModule) -> Table {
    module.connect(|_| Ok::<(), String>(())).unwrap()
}

// =============================================================================
// Series Source
// =============================================================================

pub const SERIES_VALUE: usize = 0;
pub const SERIES_START: usize = 1;
pub const SERIES_STOP: usize = 2;
pub const SERIES_STEP: usize = 3;

pub fn series_columns() -> Vec<Column> {
    vec![
        Column::new("value", ColumnType::Integer)
            .with_ops([
                ConstraintOp::Gt,
                ConstraintOp::Ge,
                ConstraintOp::Lt,
                ConstraintOp::Le,
            ])
            .with_order_by(SortSupport::Both),
        Column::new("start", ColumnType::Integer)
            .hidden()
            .with_filter(ColumnFilter::omitted(ConstraintOp::Eq)),
        Column::new("stop", ColumnType::Integer)
            .hidden()
            .with_filter(ColumnFilter::omitted(ConstraintOp::Eq)),
        Column::new("step", ColumnType::Integer)
            .hidden()
            .with_filter(ColumnFilter::omitted(ConstraintOp::Eq)),
    ]
}

struct SeriesRow {
    value: i64,
    start: i64,
    stop: i64,
    step: i64,
}

impl Row for SeriesRow {
    fn column(&self, ctx: &mut Context, col: usize) -> SourceResult<()> {
        match col {
            SERIES_VALUE => ctx.result_int64(self.value),
            SERIES_START => ctx.result_int64(self.start),
            SERIES_STOP => ctx.result_int64(self.stop),
            SERIES_STEP => ctx.result_int64(self.step),
            _ => return Err(SourceError::UnknownColumn(col)),
        }
        Ok(())
    }
}

/// Walks start..=stop by step; the first value produced is one step in
struct SeriesIterator {
    current: i64,
    start: i64,
    stop: i64,
    step: i64,
    desc: bool,
    calls: Arc<AtomicUsize>,
}

impl RowIterator for SeriesIterator {
    fn next(&mut self) -> SourceResult<Option<Box<dyn Row>>> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.desc {
            self.current -= self.step;
            if self.current < self.start {
                return Ok(None);
            }
        } else {
            self.current += self.step;
            if self.current > self.stop {
                return Ok(None);
            }
        }
        Ok(Some(Box::new(SeriesRow {
            value: self.current,
            start: self.start,
            stop: self.stop,
            step: self.step,
        })))
    }
}

/// Series table function plus a count of `next` calls across all cursors
pub fn series_module(config: TableFuncConfig) -> (TableFuncModule, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = move |constraints: &[Constraint],
                        orders: &[OrderBy]|
          -> SourceResult<Box<dyn RowIterator>> {
        let (mut start, mut stop, mut step) = (0, 100, 1);
        for c in constraints.iter().filter(|c| c.op == ConstraintOp::Eq) {
            match c.column {
                SERIES_START => start = c.value.as_int64(),
                SERIES_STOP => stop = c.value.as_int64(),
                SERIES_STEP => step = c.value.as_int64(),
                _ => {}
            }
        }
        if step <= 0 {
            return Err(SourceError::msg("step must be positive"));
        }
        let desc = orders.iter().any(|o| o.column == SERIES_VALUE && o.desc);
        Ok(Box::new(SeriesIterator {
            current: if desc { stop } else { start },
            start,
            stop,
            step,
            desc,
            calls: Arc::clone(&counter),
        }))
    };
    let module = TableFuncModule::new("series", series_columns(), factory, config).unwrap();
    (module, calls)
}

// =============================================================================
// Alphabet Source
// =============================================================================

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

pub fn alphabet_columns() -> Vec<Column> {
    vec![Column::new("letter", ColumnType::Text)
        .with_ops([
            ConstraintOp::Gt,
            ConstraintOp::Ge,
            ConstraintOp::Lt,
            ConstraintOp::Le,
        ])
        .with_order_by(SortSupport::Both)]
}

struct LetterRow(char);

impl Row for LetterRow {
    fn column(&self, ctx: &mut Context, col: usize) -> SourceResult<()> {
        match col {
            0 => ctx.result_text(self.0.to_string()),
            _ => return Err(SourceError::UnknownColumn(col)),
        }
        Ok(())
    }
}

struct AlphabetIterator {
    current: i32,
    desc: bool,
    calls: Arc<AtomicUsize>,
}

impl RowIterator for AlphabetIterator {
    fn next(&mut self) -> SourceResult<Option<Box<dyn Row>>> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.current += if self.desc { -1 } else { 1 };
        let letter = usize::try_from(self.current)
            .ok()
            .and_then(|i| LETTERS.chars().nth(i));
        Ok(letter.map(|c| Box::new(LetterRow(c)) as Box<dyn Row>))
    }
}

/// Alphabet table function plus a count of `next` calls across all cursors
pub fn alphabet_module(config: TableFuncConfig) -> (TableFuncModule, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = move |_: &[Constraint], orders: &[OrderBy]| -> SourceResult<Box<dyn RowIterator>> {
        let desc = orders.iter().any(|o| o.column == 0 && o.desc);
        Ok(Box::new(AlphabetIterator {
            current: if desc { 26 } else { -1 },
            desc,
            calls: Arc::clone(&counter),
        }))
    };
    let module = TableFuncModule::new("alphabet", alphabet_columns(), factory, config).unwrap();
    (module, calls)
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(AtomicOrdering::SeqCst)
}
