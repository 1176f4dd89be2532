//! Exact scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `CpScheduler` formulates the job shop with machine pools as a
//! constraint model and solves it with a [`CpSolver`](crate::cp::CpSolver).
//! Without limits the returned schedule is optimal for the lexicographic
//! objective (priority-weighted completion time, then makespan).
//!
//! # KPI
//!
//! `ScheduleKpi` computes makespan, per-instance utilization and average
//! flow time from the scheduled operations.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3, 7
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod kpi;
mod pipeline;

pub use kpi::ScheduleKpi;
pub use pipeline::{CpScheduler, ScheduleRequest};
