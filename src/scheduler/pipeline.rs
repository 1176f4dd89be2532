//! Exact CP scheduler.
//!
//! # Pipeline
//!
//! 1. Reject empty input without touching the engine.
//! 2. Validate and snapshot the problem ([`ProblemModel`]).
//! 3. Build variables and constraints ([`ConstraintBuilder`]).
//! 4. Add the lexicographic objective ([`ObjectiveComposer`]).
//! 5. Solve under the configured limits ([`CpSolver`]).
//! 6. Decode `Optimal`/`Feasible` results ([`SolutionDecoder`]).
//!
//! Infeasible and limit outcomes never produce a schedule.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 7: Job Shops

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cp::{BranchAndBoundSolver, CpSolver, EngineError, SolverConfig, SolverStatus};
use crate::error::ScheduleError;
use crate::formulation::{ConstraintBuilder, ObjectiveComposer, SolutionDecoder};
use crate::models::{Job, MachineGroup, Schedule};
use crate::problem::ProblemModel;

/// Input container for scheduling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Jobs to schedule.
    pub jobs: Vec<Job>,
    /// Available machine pools.
    #[serde(alias = "machines")]
    pub machine_groups: Vec<MachineGroup>,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(jobs: Vec<Job>, machine_groups: Vec<MachineGroup>) -> Self {
        Self {
            jobs,
            machine_groups,
        }
    }

    /// Parses a request from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Job shop scheduler backed by a constraint solver.
///
/// Stateless between calls: one instance can serve concurrent solves.
///
/// # Example
///
/// ```
/// use u_jobshop::scheduler::CpScheduler;
/// use u_jobshop::models::{Job, MachineGroup, Operation};
///
/// let groups = vec![MachineGroup::single("A"), MachineGroup::single("B")];
/// let jobs = vec![Job::new("J1")
///     .then(Operation::new("O1", "A", 2))
///     .then(Operation::new("O2", "B", 3))];
///
/// let schedule = CpScheduler::new().solve(&jobs, &groups).unwrap();
/// assert_eq!(schedule.makespan, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CpScheduler<S = BranchAndBoundSolver> {
    solver: S,
    config: SolverConfig,
}

impl CpScheduler {
    /// Creates a scheduler using the built-in engine and no limits.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: CpSolver> CpScheduler<S> {
    /// Creates a scheduler on a custom engine.
    pub fn with_solver(solver: S) -> Self {
        Self {
            solver,
            config: SolverConfig::default(),
        }
    }

    /// Sets the search limits.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Current search limits.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Schedules a request.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<Schedule, ScheduleError> {
        self.solve(&request.jobs, &request.machine_groups)
    }

    /// Computes an optimal (or best found within limits) schedule.
    ///
    /// # Errors
    /// - [`ScheduleError::NothingToSolve`]: `jobs` or `groups` is empty
    /// - [`ScheduleError::Validation`]: malformed input
    /// - [`ScheduleError::Infeasible`]: no schedule exists (e.g. zero-capacity group)
    /// - [`ScheduleError::Engine`]: limits hit before any solution, or engine failure
    pub fn solve(&self, jobs: &[Job], groups: &[MachineGroup]) -> Result<Schedule, ScheduleError> {
        let problem = ProblemModel::new(jobs, groups)?;
        info!(
            jobs = jobs.len(),
            operations = problem.operation_count(),
            instances = problem.instances().len(),
            horizon = problem.horizon(),
            "solving job shop"
        );

        let mut built = ConstraintBuilder::new(&problem).build();
        ObjectiveComposer::new(&problem).compose(&mut built);

        let solution = self.solver.solve(&built.model, &self.config)?;
        match solution.status {
            SolverStatus::Optimal | SolverStatus::Feasible => {
                let schedule = SolutionDecoder::new(&problem, &built).decode(&solution)?;
                info!(
                    makespan = schedule.makespan,
                    weighted_completion = schedule.weighted_completion_time,
                    status = ?solution.status,
                    nodes = solution.nodes,
                    "schedule found"
                );
                Ok(schedule)
            }
            SolverStatus::Infeasible => {
                warn!(nodes = solution.nodes, "no feasible schedule");
                Err(ScheduleError::Infeasible)
            }
            SolverStatus::Unknown => {
                warn!(
                    nodes = solution.nodes,
                    elapsed_ms = solution.elapsed_ms,
                    "solver limits reached without a schedule"
                );
                Err(EngineError::LimitReached {
                    nodes: solution.nodes,
                    elapsed_ms: solution.elapsed_ms,
                }
                .into())
            }
        }
    }
}
