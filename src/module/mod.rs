//! Registration surface
//!
//! What an application touches to expose a table function:
//! - [`TableFuncModule`]: columns, factory and settings
//! - [`Table`]: the connected table; negotiation and cursors
//! - [`ModuleRegistry`]: modules by name
//! - [`TableFuncConfig`]: per-module settings

mod config;
mod registry;
mod table;

pub use config::TableFuncConfig;
pub use registry::ModuleRegistry;
pub use table::{Table, TableFuncModule};
