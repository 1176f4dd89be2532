//! Translation of a problem into CP variables and constraints.
//!
//! # Formulation
//!
//! For every operation `o` of group `g` and every instance `m` of `g`:
//! - an optional interval `u(o, m)` of length `p(o)` over `[0, H]`, gated by
//!   a presence literal,
//! - `ExactlyOne(presence(o, ·))`; empty when `g` has no instances, which
//!   makes the model infeasible,
//! - `start(o) = min(start(u(o, ·)))`, `end(o) = max(end(u(o, ·)))`.
//!
//! Precedence is stated on the aggregated `start(o) ≥ end(pred)` so that
//! only the selected unit is constrained by it. Each instance gets one
//! `NoOverlap` over every unit targeting it.

use tracing::debug;

use crate::cp::{BoolVar, CpModel, IntVar, IntervalVar};
use crate::problem::ProblemModel;

/// One candidate placement of an operation on a machine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitVars {
    /// Index into [`ProblemModel::instances`].
    pub instance: usize,
    /// Optional interval on that instance.
    pub interval: IntervalVar,
    /// Whether this candidate is the chosen one.
    pub presence: BoolVar,
}

/// Decision variables of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationVars {
    /// One unit per instance of the required group.
    pub units: Vec<UnitVars>,
    /// Minimum start over the units.
    pub start: IntVar,
    /// Maximum end over the units.
    pub end: IntVar,
}

/// A constraint model plus the handles needed to read solutions back.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    /// The CP model.
    pub model: CpModel,
    /// `[job][operation]` → variables.
    pub operations: Vec<Vec<OperationVars>>,
    /// Upper bound on every time variable.
    pub horizon: i64,
}

impl ScheduleModel {
    /// Variables of `jobs()[job].operations[operation]`.
    pub fn operation(&self, job: usize, operation: usize) -> &OperationVars {
        &self.operations[job][operation]
    }
}

/// Builds the variables and constraints of a problem.
///
/// # Example
/// ```
/// use u_jobshop::formulation::ConstraintBuilder;
/// use u_jobshop::models::{Job, MachineGroup, Operation};
/// use u_jobshop::problem::ProblemModel;
///
/// let groups = vec![MachineGroup::new("WELD", 2)];
/// let jobs = vec![Job::new("J1").then(Operation::new("O1", "WELD", 3))];
/// let problem = ProblemModel::new(&jobs, &groups).unwrap();
///
/// let built = ConstraintBuilder::new(&problem).build();
/// assert_eq!(built.horizon, 3);
/// assert_eq!(built.operation(0, 0).units.len(), 2);
/// ```
pub struct ConstraintBuilder<'p, 'a> {
    problem: &'p ProblemModel<'a>,
}

impl<'p, 'a> ConstraintBuilder<'p, 'a> {
    /// Creates a builder.
    pub fn new(problem: &'p ProblemModel<'a>) -> Self {
        Self { problem }
    }

    /// Creates all variables and constraints. The objective is left unset.
    pub fn build(&self) -> ScheduleModel {
        let problem = self.problem;
        let horizon = problem.horizon();
        let mut model = CpModel::new("jobshop");
        let mut per_instance: Vec<Vec<IntervalVar>> = vec![Vec::new(); problem.instances().len()];

        let mut operations = Vec::with_capacity(problem.jobs().len());
        for job in problem.jobs() {
            let mut vars = Vec::with_capacity(job.operations.len());
            for op in &job.operations {
                let tag = format!("{}/{}", job.id, op.id);

                let units: Vec<UnitVars> = problem
                    .instance_range(&op.machine_group_id)
                    .map(|instance| {
                        let label = format!("{tag}@{}", problem.instances()[instance]);
                        let start = model.new_int_var(0, horizon, format!("start[{label}]"));
                        let end = model.new_int_var(0, horizon, format!("end[{label}]"));
                        let presence = model.new_bool_var(format!("presence[{label}]"));
                        let interval = model.new_optional_interval(
                            start,
                            end,
                            op.processing_time,
                            presence,
                            format!("unit[{label}]"),
                        );
                        per_instance[instance].push(interval);
                        UnitVars {
                            instance,
                            interval,
                            presence,
                        }
                    })
                    .collect();

                model.add_exactly_one(units.iter().map(|u| u.presence).collect());

                let start = model.new_int_var(0, horizon, format!("start[{tag}]"));
                let end = model.new_int_var(0, horizon, format!("end[{tag}]"));
                if !units.is_empty() {
                    let unit_parts: Vec<(IntVar, IntVar)> = units
                        .iter()
                        .filter_map(|u| model.interval_parts(u.interval))
                        .map(|(s, e, _)| (s, e))
                        .collect();
                    model.add_min_equality(start, unit_parts.iter().map(|&(s, _)| s).collect());
                    model.add_max_equality(end, unit_parts.iter().map(|&(_, e)| e).collect());
                }

                vars.push(OperationVars { units, start, end });
            }
            operations.push(vars);
        }

        for (j, job) in problem.jobs().iter().enumerate() {
            for o in 0..job.operations.len() {
                for &p in problem.predecessors(j, o) {
                    model.add_less_or_equal(operations[j][p].end, operations[j][o].start);
                }
            }
        }

        for intervals in per_instance {
            model.add_no_overlap(intervals);
        }

        debug!(
            vars = model.var_count(),
            intervals = model.interval_count(),
            constraints = model.constraint_count(),
            horizon,
            "formulation built"
        );

        ScheduleModel {
            model,
            operations,
            horizon,
        }
    }
}
