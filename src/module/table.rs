//! Table function module and its connected table
//!
//! A [`TableFuncModule`] is what the application registers: a name, the
//! column layout, a factory and configuration. Connecting it declares the
//! schema to the host and yields a [`Table`], which answers negotiation and
//! opens cursors.

use std::fmt;
use std::sync::Arc;

use crate::executor::Cursor;
use crate::observability::{log_event, Event, TableFuncMetrics};
use crate::planner::{IndexInfoInput, IndexInfoOutput, IndexPlanner, PlanExplain, PlannerResult};
use crate::schema::{self, Column, SchemaError, SchemaResult};
use crate::source::IteratorFactory;

use super::config::TableFuncConfig;

/// A registered table-valued function
#[derive(Clone)]
pub struct TableFuncModule {
    name: String,
    columns: Arc<[Column]>,
    factory: Arc<dyn IteratorFactory>,
    config: TableFuncConfig,
    metrics: Arc<TableFuncMetrics>,
}

impl TableFuncModule {
    /// Validate the layout and build a module.
    ///
    /// Fails on an empty or non-identifier name, no columns, duplicate
    /// column names, a malformed type name or an invalid cost model.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        factory: impl IteratorFactory + 'static,
        config: TableFuncConfig,
    ) -> SchemaResult<Self> {
        let name = name.into();
        schema::validate(&name, &columns)?;
        config.validate().map_err(|e| e.with_table(name.as_str()))?;
        Ok(Self {
            name,
            columns: columns.into(),
            factory: Arc::new(factory),
            config,
            metrics: Arc::new(TableFuncMetrics::new()),
        })
    }

    /// Report into a caller-owned set of counters
    pub fn with_metrics(mut self, metrics: Arc<TableFuncMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &TableFuncConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<TableFuncMetrics> {
        &self.metrics
    }

    pub(crate) fn factory(&self) -> &dyn IteratorFactory {
        self.factory.as_ref()
    }

    /// The `CREATE TABLE` statement handed to the host
    pub fn declaration(&self) -> SchemaResult<String> {
        schema::create_table_sql(&self.name, &self.columns)
    }

    /// Declare the schema through the host's callback and return the
    /// connected table.
    pub fn connect<F, E>(&self, declare: F) -> SchemaResult<Table>
    where
        F: FnOnce(&str) -> Result<(), E>,
        E: fmt::Display,
    {
        let declaration = self.declaration()?;
        declare(&declaration)
            .map_err(|e| SchemaError::declare_failed(&self.name, e.to_string()))?;

        let column_count = self.columns.len().to_string();
        let eponymous_only = self.config.eponymous_only.to_string();
        let read_only = self.config.read_only.to_string();
        log_event(
            self.config.log_level,
            Event::TableDeclared,
            &[
                ("columns", column_count.as_str()),
                ("eponymous_only", eponymous_only.as_str()),
                ("read_only", read_only.as_str()),
                ("table", self.name.as_str()),
            ],
        );

        Ok(Table {
            module: Arc::new(self.clone()),
            declaration,
        })
    }
}

impl fmt::Debug for TableFuncModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableFuncModule")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A connected table function
#[derive(Debug)]
pub struct Table {
    module: Arc<TableFuncModule>,
    declaration: String,
}

impl Table {
    pub fn name(&self) -> &str {
        self.module.name()
    }

    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    pub fn columns(&self) -> &[Column] {
        self.module.columns()
    }

    pub fn metrics(&self) -> &Arc<TableFuncMetrics> {
        self.module.metrics()
    }

    fn planner(&self) -> IndexPlanner<'_> {
        let config = self.module.config();
        IndexPlanner::new(self.module.columns())
            .with_costs(config.base_cost, config.cost_per_constraint)
    }

    /// Negotiate pushdown for one query
    pub fn best_index(&self, input: &IndexInfoInput) -> PlannerResult<IndexInfoOutput> {
        self.module.metrics().increment_negotiations();
        let level = self.module.config().log_level;

        match self.planner().plan(input) {
            Ok(negotiation) => {
                let accepted = negotiation.plan.constraints.len().to_string();
                let cost = negotiation.output.estimated_cost.to_string();
                log_event(
                    level,
                    Event::NegotiationComplete,
                    &[
                        ("accepted", accepted.as_str()),
                        ("cost", cost.as_str()),
                        ("plan", negotiation.output.index_string.as_str()),
                        ("table", self.name()),
                    ],
                );
                Ok(negotiation.output)
            }
            Err(e) => {
                self.module.metrics().increment_negotiations_rejected();
                log_event(
                    level,
                    Event::NegotiationRejected,
                    &[("code", e.code().code()), ("table", self.name())],
                );
                Err(e)
            }
        }
    }

    /// Explain what negotiation would decide for `input`, without counting it
    pub fn explain(&self, input: &IndexInfoInput) -> PlanExplain {
        match self.planner().plan(input) {
            Ok(negotiation) => {
                PlanExplain::from_negotiation(self.module.columns(), input, &negotiation)
            }
            Err(e) => PlanExplain::from_error(&e),
        }
    }

    /// New Idle cursor
    pub fn open(&self) -> Cursor {
        Cursor::new(Arc::clone(&self.module))
    }

    /// Nothing to release; the module outlives every connection
    pub fn disconnect(self) -> SchemaResult<()> {
        Ok(())
    }

    /// Table functions hold no backing storage to drop
    pub fn destroy(self) -> SchemaResult<()> {
        Ok(())
    }
}
