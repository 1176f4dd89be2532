//! Constraint programming layer.
//!
//! A small modeling API (integer and boolean variables, optional interval
//! variables, linear inequalities, min/max aggregates, exactly-one groups,
//! no-overlap) and the [`CpSolver`] seam behind which engines plug in.
//! [`BranchAndBoundSolver`] is the built-in exact engine.
//!
//! # Reference
//! - Laborie et al. (2018), "IBM ILOG CP Optimizer for Scheduling"
//! - Baptiste et al. (2001), "Constraint-Based Scheduling"

mod model;
mod search;
mod solver;
mod variables;

pub use model::{Constraint, CpModel};
pub use search::BranchAndBoundSolver;
pub use solver::{CpSolution, CpSolver, EngineError, SolverConfig, SolverStatus};
pub use variables::{BoolVar, IntVar, IntervalVar, LinearExpr};
