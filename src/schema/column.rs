//! Column descriptors
//!
//! A table function declares its columns once, at registration. Each column
//! says which operators it can evaluate itself (its filters) and which sort
//! directions it can produce natively. Hidden columns carry table function
//! arguments: `series(0, 100)` binds equality constraints on them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::planner::ConstraintOp;

/// Declared column type, as written into the table declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
    /// Any other type name the host accepts
    Custom(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Real => "REAL",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Custom(name) => name.as_str(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operator a column evaluates itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub op: ConstraintOp,
    /// Tell the host it may skip re-checking the predicate
    #[serde(default)]
    pub omit_check: bool,
}

impl ColumnFilter {
    pub fn new(op: ConstraintOp) -> Self {
        Self {
            op,
            omit_check: false,
        }
    }

    /// Filter the host does not need to re-check
    pub fn omitted(op: ConstraintOp) -> Self {
        Self {
            op,
            omit_check: true,
        }
    }
}

/// Sort directions a column can produce without the host sorting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortSupport {
    #[default]
    None,
    Asc,
    Desc,
    Both,
}

impl SortSupport {
    /// Whether a request in the given direction can be satisfied
    pub fn supports(&self, desc: bool) -> bool {
        match self {
            SortSupport::None => false,
            SortSupport::Asc => !desc,
            SortSupport::Desc => desc,
            SortSupport::Both => true,
        }
    }
}

/// One declared column of a table function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub filters: Vec<ColumnFilter>,
    #[serde(default)]
    pub order_by: SortSupport,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            not_null: false,
            hidden: false,
            filters: Vec::new(),
            order_by: SortSupport::None,
        }
    }

    /// Hidden column: excluded from `SELECT *`, usable as an argument
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn with_filter(mut self, filter: ColumnFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds a plain (host re-checked) filter for each op
    pub fn with_ops(mut self, ops: impl IntoIterator<Item = ConstraintOp>) -> Self {
        self.filters.extend(ops.into_iter().map(ColumnFilter::new));
        self
    }

    pub fn with_order_by(mut self, order_by: SortSupport) -> Self {
        self.order_by = order_by;
        self
    }

    /// First declared filter for `op`, if any
    pub fn filter_for(&self, op: ConstraintOp) -> Option<&ColumnFilter> {
        self.filters.iter().find(|f| f.op == op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_support() {
        assert!(!SortSupport::None.supports(false));
        assert!(!SortSupport::None.supports(true));
        assert!(SortSupport::Asc.supports(false));
        assert!(!SortSupport::Asc.supports(true));
        assert!(SortSupport::Desc.supports(true));
        assert!(!SortSupport::Desc.supports(false));
        assert!(SortSupport::Both.supports(true));
        assert!(SortSupport::Both.supports(false));
    }

    #[test]
    fn test_builder() {
        let col = Column::new("start", ColumnType::Integer)
            .hidden()
            .with_filter(ColumnFilter::omitted(ConstraintOp::Eq));
        assert!(col.hidden);
        assert!(!col.not_null);
        assert_eq!(col.filters.len(), 1);
        assert!(col.filters[0].omit_check);
    }

    #[test]
    fn test_filter_for_returns_first_match() {
        let col = Column::new("v", ColumnType::Integer)
            .with_filter(ColumnFilter::omitted(ConstraintOp::Eq))
            .with_filter(ColumnFilter::new(ConstraintOp::Eq));
        assert!(col.filter_for(ConstraintOp::Eq).unwrap().omit_check);
        assert!(col.filter_for(ConstraintOp::Gt).is_none());
    }

    #[test]
    fn test_column_from_json() {
        let col: Column = serde_json::from_str(
            r#"{"name":"letter","type":"text","filters":[{"op":"ge"}],"order_by":"both"}"#,
        )
        .unwrap();
        assert_eq!(col.column_type, ColumnType::Text);
        assert_eq!(col.order_by, SortSupport::Both);
        assert_eq!(col.filters, vec![ColumnFilter::new(ConstraintOp::Ge)]);
        assert!(!col.hidden);
    }

    #[test]
    fn test_custom_type_name() {
        assert_eq!(ColumnType::Custom("DATETIME".into()).to_string(), "DATETIME");
        assert_eq!(ColumnType::Integer.to_string(), "INTEGER");
    }
}
