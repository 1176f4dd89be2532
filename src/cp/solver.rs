//! Solver interface: configuration, status, solution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::CpModel;
use super::variables::{BoolVar, IntVar, IntervalVar};
use crate::error::ScheduleError;

/// Outcome of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// A solution was found and proven optimal.
    Optimal,
    /// A solution was found; the search stopped before proving optimality.
    Feasible,
    /// The search proved that no solution exists.
    Infeasible,
    /// The search stopped before finding any solution.
    Unknown,
}

/// Failures of the engine itself, as opposed to model infeasibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Limits were reached before any solution was found.
    #[error("solver limits reached after {nodes} nodes / {elapsed_ms} ms without a solution")]
    LimitReached { nodes: u64, elapsed_ms: u64 },
    /// The model is malformed.
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// Any other engine failure.
    #[error("solver failure: {0}")]
    Internal(String),
}

/// Search limits.
///
/// `None` means unlimited. Limits are honored cooperatively by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Maximum number of search nodes.
    pub node_limit: Option<u64>,
}

impl SolverConfig {
    /// Sets the wall-clock limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the node limit.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpSolution {
    /// Run outcome.
    pub status: SolverStatus,
    /// One value per model variable; empty when no solution was found.
    pub values: Vec<i64>,
    /// Objective value of the returned solution.
    pub objective_value: Option<i64>,
    /// Search nodes explored.
    pub nodes: u64,
    /// Wall-clock time spent (ms).
    pub elapsed_ms: u64,
}

impl CpSolution {
    /// Whether the status carries a solution.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Value of an integer variable.
    pub fn value(&self, var: IntVar) -> Option<i64> {
        self.values.get(var.0).copied()
    }

    /// Value of a boolean variable.
    pub fn bool_value(&self, var: BoolVar) -> Option<bool> {
        self.value(var.as_int()).map(|v| v == 1)
    }

    /// Start, end and presence of an interval.
    ///
    /// An interval without a presence literal is always present.
    pub fn interval_value(&self, model: &CpModel, interval: IntervalVar) -> Option<(i64, i64, bool)> {
        let (start, end, presence) = model.interval_parts(interval)?;
        let present = match presence {
            Some(p) => self.bool_value(p)?,
            None => true,
        };
        Some((self.value(start)?, self.value(end)?, present))
    }
}

/// A constraint optimization engine.
///
/// Implementations must treat each call independently: no state is shared
/// between solves, so one solver value may serve concurrent callers.
pub trait CpSolver {
    /// Solves a model under the given limits.
    ///
    /// Returns `Err` only for engine failures; infeasibility and limit
    /// outcomes are reported through [`CpSolution::status`].
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> Result<CpSolution, EngineError>;
}
