//! Typed comparison between a projected column value and a bound literal
//!
//! The bound literal is read through the accessor matching the projected
//! value's kind, so an `Int` column compares against `as_int()`, a `Text`
//! column against `as_text()`, and so on. Kinds without a defined ordering
//! yield [`Comparison::Incomparable`] rather than a guess.

use std::cmp::Ordering;

use super::column_value::ColumnValue;
use super::value::Value;

/// Outcome of comparing a column value with a bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Ordered(Ordering),
    Incomparable,
}

impl Comparison {
    pub fn ordering(&self) -> Option<Ordering> {
        match self {
            Comparison::Ordered(o) => Some(*o),
            Comparison::Incomparable => None,
        }
    }
}

impl From<Option<Ordering>> for Comparison {
    fn from(o: Option<Ordering>) -> Self {
        match o {
            Some(o) => Comparison::Ordered(o),
            None => Comparison::Incomparable,
        }
    }
}

/// Compare `actual` (what the row produced) with `bound` (what the query supplied)
pub fn compare(actual: &ColumnValue, bound: &Value) -> Comparison {
    match actual {
        ColumnValue::Int(v) => Comparison::Ordered(v.cmp(&bound.as_int())),
        ColumnValue::Int64(v) => Comparison::Ordered(v.cmp(&bound.as_int64())),
        ColumnValue::Float(v) => v.partial_cmp(&bound.as_float()).into(),
        // str ordering is bytewise over UTF-8, which is code point order
        ColumnValue::Text(v) => Comparison::Ordered(v.as_str().cmp(&*bound.as_text())),
        ColumnValue::Blob(v) => Comparison::Ordered(v.as_slice().cmp(&*bound.as_blob())),
        ColumnValue::Value(v) => compare_value(v, bound),
        ColumnValue::Null
        | ColumnValue::ZeroBlob(_)
        | ColumnValue::Error(_)
        | ColumnValue::Pointer(_) => Comparison::Incomparable,
    }
}

fn compare_value(actual: &Value, bound: &Value) -> Comparison {
    match actual {
        Value::Null => Comparison::Incomparable,
        Value::Integer(v) => Comparison::Ordered(v.cmp(&bound.as_int64())),
        Value::Float(v) => v.partial_cmp(&bound.as_float()).into(),
        Value::Text(v) => Comparison::Ordered(v.as_str().cmp(&*bound.as_text())),
        Value::Blob(v) => Comparison::Ordered(v.as_slice().cmp(&*bound.as_blob())),
    }
}
