//! # Data sources
//!
//! The contract a table function implements: a factory that builds an
//! iterator from the bound constraints and accepted orders, an iterator that
//! yields rows, and rows that project their columns into a [`Context`].
//!
//! Rules:
//! - `next()` returning `Ok(None)` is end-of-data, never an error
//! - Rows must honour every order they were handed; the cursor never re-sorts
//! - Constraints marked omit are trusted by the host and never re-checked

use std::error::Error as StdError;

use thiserror::Error;

use crate::executor::Context;
use crate::planner::{Constraint, OrderBy};

/// Errors a data source reports back to the cursor
#[derive(Debug, Error)]
pub enum SourceError {
    /// Row was asked for a column it does not have
    #[error("Unknown column {0}")]
    UnknownColumn(usize),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl SourceError {
    pub fn msg(message: impl Into<String>) -> Self {
        SourceError::Message(message.into())
    }
}

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// One produced row
pub trait Row: Send {
    /// Write column `col` into `ctx`
    fn column(&self, ctx: &mut Context, col: usize) -> SourceResult<()>;
}

/// Lazy row stream for one cursor
pub trait RowIterator: Send {
    /// Next row, or `None` at end-of-data
    fn next(&mut self) -> SourceResult<Option<Box<dyn Row>>>;
}

/// Builds a fresh iterator each time a cursor is filtered
pub trait IteratorFactory: Send + Sync {
    fn create(
        &self,
        constraints: &[Constraint],
        orders: &[OrderBy],
    ) -> SourceResult<Box<dyn RowIterator>>;
}

impl<F> IteratorFactory for F
where
    F: Fn(&[Constraint], &[OrderBy]) -> SourceResult<Box<dyn RowIterator>> + Send + Sync,
{
    fn create(
        &self,
        constraints: &[Constraint],
        orders: &[OrderBy],
    ) -> SourceResult<Box<dyn RowIterator>> {
        self(constraints, orders)
    }
}
