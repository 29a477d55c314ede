//! vtab - Table-valued functions for an embeddable SQL engine
//!
//! Lets an application expose a parameter-driven, streaming data source as a
//! table without speaking the engine's negotiation protocol directly.
//!
//! Layers, leaves first:
//! - `value`: host values, projected column values, comparison
//! - `schema`: column descriptors and the declared table
//! - `planner`: constraint and order negotiation, plan tokens
//! - `source`: the row/iterator/factory contract a table function implements
//! - `executor`: cursors, projection, early exit
//! - `module`: registration, connection, configuration
//! - `observability`: structured logs and counters

pub mod executor;
pub mod module;
pub mod observability;
pub mod planner;
pub mod schema;
pub mod source;
pub mod value;

pub use executor::{Context, Cursor, CursorError, CursorErrorCode, CursorResult};
pub use module::{ModuleRegistry, Table, TableFuncConfig, TableFuncModule};
pub use planner::{
    Constraint, ConstraintInfo, ConstraintOp, ConstraintUsage, IndexInfoInput, IndexInfoOutput,
    OrderBy, PlannerError, PlannerErrorCode,
};
pub use schema::{Column, ColumnFilter, ColumnType, SchemaError, SortSupport};
pub use source::{IteratorFactory, Row, RowIterator, SourceError, SourceResult};
pub use value::{ColumnValue, Value};
