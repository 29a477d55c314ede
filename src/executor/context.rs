//! Column result sink
//!
//! A row writes exactly one value per column request. Each `result_*` call
//! replaces whatever was captured before.

use std::any::Any;
use std::sync::Arc;

use crate::value::{ColumnValue, Value};

/// Receives one projected column value
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    value: ColumnValue,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Empty sink; an untouched column reads as NULL
    pub fn new() -> Self {
        Self {
            value: ColumnValue::Null,
        }
    }

    pub fn result_int(&mut self, v: i32) {
        self.value = ColumnValue::Int(v);
    }

    pub fn result_int64(&mut self, v: i64) {
        self.value = ColumnValue::Int64(v);
    }

    pub fn result_float(&mut self, v: f64) {
        self.value = ColumnValue::Float(v);
    }

    pub fn result_null(&mut self) {
        self.value = ColumnValue::Null;
    }

    /// Pass a host value through unchanged
    pub fn result_value(&mut self, v: Value) {
        self.value = ColumnValue::Value(v);
    }

    pub fn result_zero_blob(&mut self, len: i64) {
        self.value = ColumnValue::ZeroBlob(len);
    }

    pub fn result_text(&mut self, v: impl Into<String>) {
        self.value = ColumnValue::Text(v.into());
    }

    pub fn result_blob(&mut self, v: impl Into<Vec<u8>>) {
        self.value = ColumnValue::Blob(v.into());
    }

    /// Signal a projection failure to the host
    pub fn result_error(&mut self, message: impl Into<String>) {
        self.value = ColumnValue::Error(message.into());
    }

    /// Hand the host an opaque application object
    pub fn result_pointer<T: Any + Send + Sync>(&mut self, v: Arc<T>) {
        self.value = ColumnValue::Pointer(v);
    }

    pub fn value(&self) -> &ColumnValue {
        &self.value
    }

    /// Take the captured value, leaving NULL behind
    pub fn take(&mut self) -> ColumnValue {
        std::mem::replace(&mut self.value, ColumnValue::Null)
    }
}
