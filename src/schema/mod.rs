//! Column descriptors and table declaration
//!
//! Column metadata is fixed at registration and shared, read-only, by every
//! query against the table function.

mod column;
mod declare;
mod errors;

pub use column::{Column, ColumnFilter, ColumnType, SortSupport};
pub use declare::{create_table_sql, validate};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
