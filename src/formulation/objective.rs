//! Lexicographic objective: priority-weighted completion first, makespan second.
//!
//! `objective = (H + 1) · Σ priority(j) · C(j) + C_max`
//!
//! `C_max ≤ H`, so one unit of the weighted sum always outweighs any
//! makespan difference and the makespan only breaks ties.
//!
//! # Reference
//! Ehrgott (2005), "Multicriteria Optimization", Ch. 5 (lexicographic optimality)

use crate::cp::{IntVar, LinearExpr};
use crate::problem::ProblemModel;

use super::builder::ScheduleModel;

/// Weight of the makespan term.
pub const SECONDARY_WEIGHT: i64 = 1;

/// Weight of the weighted-completion term for a given horizon.
pub fn primary_weight(horizon: i64) -> i64 {
    horizon + 1
}

/// Completion and makespan variables created by the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveVars {
    /// `[job]` → completion time (max end over its sink operations).
    pub job_ends: Vec<IntVar>,
    /// Max over `job_ends`.
    pub makespan: IntVar,
}

/// Adds the scalarized objective to a built model.
pub struct ObjectiveComposer<'p, 'a> {
    problem: &'p ProblemModel<'a>,
}

impl<'p, 'a> ObjectiveComposer<'p, 'a> {
    /// Creates a composer.
    pub fn new(problem: &'p ProblemModel<'a>) -> Self {
        Self { problem }
    }

    /// Declares completion variables and sets the objective on `built.model`.
    pub fn compose(&self, built: &mut ScheduleModel) -> ObjectiveVars {
        let horizon = built.horizon;
        let model = &mut built.model;

        let mut job_ends = Vec::with_capacity(self.problem.jobs().len());
        for (j, job) in self.problem.jobs().iter().enumerate() {
            let sink_ends: Vec<IntVar> = self
                .problem
                .sink_operations(j)
                .iter()
                .map(|&o| built.operations[j][o].end)
                .collect();
            let end = model.new_int_var(0, horizon, format!("completion[{}]", job.id));
            model.add_max_equality(end, sink_ends);
            job_ends.push(end);
        }

        let makespan = model.new_int_var(0, horizon, "makespan");
        model.add_max_equality(makespan, job_ends.clone());

        let weighted = LinearExpr::weighted_sum(
            self.problem
                .jobs()
                .iter()
                .zip(&job_ends)
                .map(|(job, &end)| (job.priority, end)),
        );
        model.minimize(
            weighted * primary_weight(horizon) + LinearExpr::from(makespan) * SECONDARY_WEIGHT,
        );

        ObjectiveVars { job_ends, makespan }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::ConstraintBuilder;
    use crate::models::{Job, MachineGroup, Operation};

    #[test]
    fn test_primary_weight_exceeds_horizon() {
        assert_eq!(primary_weight(0), 1);
        assert_eq!(primary_weight(10), 11);
        assert!(primary_weight(10) > 10 * SECONDARY_WEIGHT);
    }

    #[test]
    fn test_objective_value_on_fixed_assignment() {
        let groups = vec![MachineGroup::single("M")];
        let jobs = vec![
            Job::new("HIGH").with_priority(9).then(Operation::new("O1", "M", 5)),
            Job::new("LOW").with_priority(1).then(Operation::new("O1", "M", 5)),
        ];
        let problem = ProblemModel::new(&jobs, &groups).unwrap();
        let mut built = ConstraintBuilder::new(&problem).build();
        let vars = ObjectiveComposer::new(&problem).compose(&mut built);

        let mut values = vec![0; built.model.var_count()];
        values[vars.job_ends[0].index()] = 5;
        values[vars.job_ends[1].index()] = 10;
        values[vars.makespan.index()] = 10;

        let objective = built.model.objective().unwrap();
        assert_eq!(objective.evaluate(&values), 11 * (9 * 5 + 10) + 10);
    }

    #[test]
    fn test_completion_takes_all_sinks() {
        let groups = vec![MachineGroup::new("M", 2)];
        let jobs = vec![Job::new("J")
            .with_operation(Operation::new("A", "M", 2))
            .with_operation(Operation::new("B", "M", 3))];
        let problem = ProblemModel::new(&jobs, &groups).unwrap();
        let mut built = ConstraintBuilder::new(&problem).build();
        let vars = ObjectiveComposer::new(&problem).compose(&mut built);

        let target = vars.job_ends[0];
        let sinks = built.model.constraints().iter().find_map(|c| match c {
            crate::cp::Constraint::MaxEquality { target: t, vars } if *t == target => {
                Some(vars.clone())
            }
            _ => None,
        });
        assert_eq!(
            sinks,
            Some(vec![built.operation(0, 0).end, built.operation(0, 1).end])
        );
    }
}
