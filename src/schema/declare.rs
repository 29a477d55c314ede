//! Table declaration string
//!
//! Rendered once per connect and handed verbatim to the host:
//!
//! ```text
//! CREATE TABLE series (
//!     value INTEGER,
//!     start INTEGER HIDDEN
//! )
//! ```

use std::collections::HashSet;

use super::column::{Column, ColumnType};
use super::errors::{SchemaError, SchemaResult};

/// Checks a name and column list before anything is declared
pub fn validate(name: &str, columns: &[Column]) -> SchemaResult<()> {
    if !is_identifier(name) {
        return Err(SchemaError::invalid(format!("Invalid table name '{}'", name)));
    }
    if columns.is_empty() {
        return Err(SchemaError::invalid("Table function must declare at least one column")
            .with_table(name));
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !is_identifier(&column.name) {
            return Err(
                SchemaError::invalid(format!("Invalid column name '{}'", column.name))
                    .with_table(name),
            );
        }
        if let ColumnType::Custom(type_name) = &column.column_type {
            if !is_type_name(type_name) {
                return Err(SchemaError::invalid(format!(
                    "Invalid type name '{}' for column '{}'",
                    type_name, column.name
                ))
                .with_table(name));
            }
        }
        if !seen.insert(column.name.to_ascii_lowercase()) {
            return Err(
                SchemaError::invalid(format!("Duplicate column '{}'", column.name))
                    .with_table(name),
            );
        }
    }
    Ok(())
}

/// Renders the `CREATE TABLE` statement for a table function
pub fn create_table_sql(name: &str, columns: &[Column]) -> SchemaResult<String> {
    validate(name, columns)?;

    let mut sql = format!("CREATE TABLE {} (", name);
    let last = columns.len() - 1;
    for (i, column) in columns.iter().enumerate() {
        sql.push_str(&format!("\n    {} {}", column.name, column.column_type));
        if column.hidden {
            sql.push_str(" HIDDEN");
        }
        if i < last {
            sql.push(',');
        }
    }
    sql.push_str("\n)");
    Ok(sql)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Type names like `DATETIME` or `VARCHAR(20)`: starts with a letter, then
/// letters, digits, `_`, spaces and balanced parentheses. No separators.
fn is_type_name(s: &str) -> bool {
    if !s.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return false;
    }
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            c if c.is_ascii_alphanumeric() || c == '_' || c == ' ' => {}
            _ => return false,
        }
    }
    depth == 0
}
