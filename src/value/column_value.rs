//! Values produced by row projection

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::value::Value;

/// Everything a row can hand back for one column.
///
/// One variant per result-sink call on [`crate::executor::Context`].
#[derive(Clone)]
pub enum ColumnValue {
    Int(i32),
    Int64(i64),
    Float(f64),
    Null,
    /// Host value passed through untouched
    Value(Value),
    /// Zero-filled blob of the given length
    ZeroBlob(i64),
    Text(String),
    Blob(Vec<u8>),
    /// The row signalled an error for this column
    Error(String),
    /// Opaque handle for zero-copy large values
    Pointer(Arc<dyn Any + Send + Sync>),
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null | ColumnValue::Value(Value::Null))
    }

    /// Converts to a host value. Errors and pointers have no host
    /// representation and return `None`.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            ColumnValue::Int(i) => Some(Value::Integer(*i as i64)),
            ColumnValue::Int64(i) => Some(Value::Integer(*i)),
            ColumnValue::Float(f) => Some(Value::Float(*f)),
            ColumnValue::Null => Some(Value::Null),
            ColumnValue::Value(v) => Some(v.clone()),
            ColumnValue::ZeroBlob(n) => Some(Value::Blob(vec![0; (*n).max(0) as usize])),
            ColumnValue::Text(s) => Some(Value::Text(s.clone())),
            ColumnValue::Blob(b) => Some(Value::Blob(b.clone())),
            ColumnValue::Error(_) | ColumnValue::Pointer(_) => None,
        }
    }

    /// Downcast a pointer value
    pub fn pointer<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            ColumnValue::Pointer(p) => p.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            ColumnValue::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            ColumnValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            ColumnValue::Null => write!(f, "Null"),
            ColumnValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ColumnValue::ZeroBlob(n) => f.debug_tuple("ZeroBlob").field(n).finish(),
            ColumnValue::Text(v) => f.debug_tuple("Text").field(v).finish(),
            ColumnValue::Blob(v) => f.debug_tuple("Blob").field(v).finish(),
            ColumnValue::Error(e) => f.debug_tuple("Error").field(e).finish(),
            ColumnValue::Pointer(_) => write!(f, "Pointer(..)"),
        }
    }
}

impl PartialEq for ColumnValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ColumnValue::Int(a), ColumnValue::Int(b)) => a == b,
            (ColumnValue::Int64(a), ColumnValue::Int64(b)) => a == b,
            (ColumnValue::Float(a), ColumnValue::Float(b)) => a == b,
            (ColumnValue::Null, ColumnValue::Null) => true,
            (ColumnValue::Value(a), ColumnValue::Value(b)) => a == b,
            (ColumnValue::ZeroBlob(a), ColumnValue::ZeroBlob(b)) => a == b,
            (ColumnValue::Text(a), ColumnValue::Text(b)) => a == b,
            (ColumnValue::Blob(a), ColumnValue::Blob(b)) => a == b,
            (ColumnValue::Error(a), ColumnValue::Error(b)) => a == b,
            (ColumnValue::Pointer(a), ColumnValue::Pointer(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
