//! Schema and registration errors
//!
//! Error codes:
//! - VTAB_SCHEMA_INVALID (REJECT)
//! - VTAB_DECLARE_FAILED (REJECT)
//! - VTAB_MODULE_EXISTS (REJECT)

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Column list or table name cannot be declared
    VtabSchemaInvalid,
    /// The host refused the table declaration
    VtabDeclareFailed,
    /// A module with this name is already registered
    VtabModuleExists,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::VtabSchemaInvalid => "VTAB_SCHEMA_INVALID",
            SchemaErrorCode::VtabDeclareFailed => "VTAB_DECLARE_FAILED",
            SchemaErrorCode::VtabModuleExists => "VTAB_MODULE_EXISTS",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    table: Option<String>,
}

impl SchemaError {
    /// Column list or name rejected at registration
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::VtabSchemaInvalid,
            message: reason.into(),
            table: None,
        }
    }

    /// Host declare callback failed
    pub fn declare_failed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            code: SchemaErrorCode::VtabDeclareFailed,
            message: format!("Declaring table '{}' failed: {}", table, reason.into()),
            table: Some(table),
        }
    }

    /// Duplicate registration
    pub fn module_exists(table: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            code: SchemaErrorCode::VtabModuleExists,
            message: format!("Module '{}' is already registered", table),
            table: Some(table),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
