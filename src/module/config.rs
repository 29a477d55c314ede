//! Table function configuration
//!
//! Fixed at registration; every cursor of the module sees the same values.
//!
//! Rules:
//! - Costs must be finite
//! - `cost_per_constraint` must not be negative, so accepting a predicate
//!   never raises the estimate

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::planner::{DEFAULT_BASE_COST, DEFAULT_COST_PER_CONSTRAINT};
use crate::schema::{SchemaError, SchemaResult};

/// Per-module settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFuncConfig {
    /// Stop iterating once a row crosses a range bound in the accepted
    /// sort direction.
    pub early_order_by_constraint_exit: bool,
    /// Cost reported when no constraint is accepted
    pub base_cost: f64,
    /// Cost removed per accepted constraint
    pub cost_per_constraint: f64,
    /// Usable only as a function call, never via CREATE VIRTUAL TABLE.
    /// Read by the embedding host when it creates the module.
    pub eponymous_only: bool,
    /// Host-side flag: the module exposes no update hooks
    pub read_only: bool,
    /// Events below this severity are not written
    pub log_level: Severity,
}

impl Default for TableFuncConfig {
    fn default() -> Self {
        Self {
            early_order_by_constraint_exit: false,
            base_cost: DEFAULT_BASE_COST,
            cost_per_constraint: DEFAULT_COST_PER_CONSTRAINT,
            eponymous_only: true,
            read_only: true,
            log_level: Severity::Warn,
        }
    }
}

impl TableFuncConfig {
    /// Default settings with the boundary check turned on
    pub fn early_exit() -> Self {
        Self {
            early_order_by_constraint_exit: true,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_early_exit(mut self, enabled: bool) -> Self {
        self.early_order_by_constraint_exit = enabled;
        self
    }

    pub fn with_costs(mut self, base_cost: f64, cost_per_constraint: f64) -> Self {
        self.base_cost = base_cost;
        self.cost_per_constraint = cost_per_constraint;
        self
    }

    pub fn with_log_level(mut self, level: Severity) -> Self {
        self.log_level = level;
        self
    }

    pub fn is_early_exit_enabled(&self) -> bool {
        self.early_order_by_constraint_exit
    }

    /// Checks the cost model before a module is built
    pub fn validate(&self) -> SchemaResult<()> {
        if !self.base_cost.is_finite() {
            return Err(SchemaError::invalid(format!(
                "base_cost must be finite, got {}",
                self.base_cost
            )));
        }
        if !self.cost_per_constraint.is_finite() || self.cost_per_constraint < 0.0 {
            return Err(SchemaError::invalid(format!(
                "cost_per_constraint must be finite and non-negative, got {}",
                self.cost_per_constraint
            )));
        }
        Ok(())
    }
}
