//! Job shop scheduling with machine pools and business priorities.
//!
//! Each job is a precedence graph of operations; each operation needs one
//! instance of a machine group (a pool of interchangeable machines).
//! Schedules minimize priority-weighted completion time first and makespan
//! second, exactly.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `Operation`, `MachineGroup`,
//!   `MachineInstance`, `Schedule`, `ScheduledOperation`
//! - **`validation`**: Input integrity checks (duplicate IDs, references, DAG cycles)
//! - **`problem`**: Validated per-solve snapshot (`ProblemModel`)
//! - **`cp`**: Constraint model, solver trait and built-in branch-and-bound engine
//! - **`formulation`**: Model construction, objective, solution decoding
//! - **`scheduler`**: `CpScheduler` pipeline and `ScheduleKpi`
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use u_jobshop::models::{Job, MachineGroup, Operation};
//! use u_jobshop::scheduler::CpScheduler;
//!
//! let groups = vec![MachineGroup::new("G", 2)];
//! let jobs = vec![
//!     Job::new("J1").then(Operation::new("O1", "G", 4)),
//!     Job::new("J2").then(Operation::new("O1", "G", 4)),
//! ];
//!
//! let schedule = CpScheduler::new().solve(&jobs, &groups).unwrap();
//! assert_eq!(schedule.makespan, 4);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"
//! - Baptiste, Le Pape & Nuijten (2001), "Constraint-Based Scheduling"

pub mod cp;
pub mod error;
pub mod formulation;
pub mod models;
pub mod problem;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;

#[cfg(test)]
pub(crate) mod test_support {
    use tracing_subscriber::{fmt, EnvFilter};

    /// Routes `tracing` output through the test harness.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    }
}
