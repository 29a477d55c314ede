//! Values crossing the host boundary
//!
//! - [`Value`]: literals the host binds to accepted constraints
//! - [`ColumnValue`]: what a row projects for one column
//! - [`compare`]: ordering between the two, used by early exit

mod column_value;
mod comparator;
#[allow(clippy::module_inception)]
mod value;

pub use column_value::ColumnValue;
pub use comparator::{compare, Comparison};
pub use value::Value;
