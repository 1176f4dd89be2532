//! CP formulation of the job shop with machine pools.
//!
//! Bridges domain models to the [`cp`](crate::cp) layer in three steps:
//! [`ConstraintBuilder`] declares variables and constraints,
//! [`ObjectiveComposer`] adds the lexicographic objective, and
//! [`SolutionDecoder`] reads a solved model back into a
//! [`Schedule`](crate::models::Schedule).
//!
//! # Reference
//! - Laborie et al. (2018), "IBM ILOG CP Optimizer for Scheduling"
//! - Baptiste et al. (2001), "Constraint-Based Scheduling"

mod builder;
mod decoder;
mod objective;

pub use builder::{ConstraintBuilder, OperationVars, ScheduleModel, UnitVars};
pub use decoder::SolutionDecoder;
pub use objective::{primary_weight, ObjectiveComposer, ObjectiveVars, SECONDARY_WEIGHT};
