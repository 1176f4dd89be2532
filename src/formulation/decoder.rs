//! Readout of a solved model into a [`Schedule`].

use crate::cp::{CpSolution, EngineError, SolverStatus};
use crate::models::{Schedule, ScheduledOperation};
use crate::problem::ProblemModel;
use crate::scheduler::ScheduleKpi;

use super::builder::ScheduleModel;

/// Turns engine values into placements and KPIs.
pub struct SolutionDecoder<'p, 'a> {
    problem: &'p ProblemModel<'a>,
    built: &'p ScheduleModel,
}

impl<'p, 'a> SolutionDecoder<'p, 'a> {
    /// Creates a decoder for a built model.
    pub fn new(problem: &'p ProblemModel<'a>, built: &'p ScheduleModel) -> Self {
        Self { problem, built }
    }

    /// Decodes an `Optimal` or `Feasible` solution.
    ///
    /// # Errors
    /// [`EngineError::Internal`] if the solution carries no values or an
    /// operation has no present unit.
    pub fn decode(&self, solution: &CpSolution) -> Result<Schedule, EngineError> {
        if !solution.is_solution_found() {
            return Err(EngineError::Internal(format!(
                "cannot decode a {:?} result",
                solution.status
            )));
        }

        let model = &self.built.model;
        let mut schedule = Schedule::new();

        for (j, job) in self.problem.jobs().iter().enumerate() {
            for (o, op) in job.operations.iter().enumerate() {
                let placement = self
                    .built
                    .operation(j, o)
                    .units
                    .iter()
                    .find_map(|unit| match solution.interval_value(model, unit.interval) {
                        Some((start, end, true)) => Some((unit.instance, start, end)),
                        _ => None,
                    });

                let Some((instance, start, end)) = placement else {
                    return Err(EngineError::Internal(format!(
                        "operation '{}' of job '{}' has no selected machine",
                        op.id, job.id
                    )));
                };

                let instance = &self.problem.instances()[instance];
                schedule.add_operation(ScheduledOperation::new(
                    &job.id,
                    &op.id,
                    &instance.group_id,
                    instance.id(),
                    start,
                    end,
                ));
            }
        }

        let kpi = ScheduleKpi::calculate(&schedule.scheduled_operations);
        schedule.machine_utilization = kpi.utilization_by_instance;
        schedule.average_flow_time = kpi.avg_flow_time;
        schedule.weighted_completion_time = self
            .problem
            .jobs()
            .iter()
            .map(|job| job.priority * schedule.job_completion_time(&job.id).unwrap_or(0))
            .sum();
        schedule.proven_optimal = solution.status == SolverStatus::Optimal;

        debug_assert!(schedule.check(self.problem.jobs()).is_empty());
        Ok(schedule)
    }
}
