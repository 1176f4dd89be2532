//! CP model: variables, constraints, objective.

use super::variables::{BoolVar, IntVar, IntervalDecl, IntervalVar, LinearExpr, VarDecl};
use super::EngineError;

/// A constraint over model variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Exactly one of the booleans is true. Unsatisfiable when empty.
    ExactlyOne(Vec<BoolVar>),
    /// `expr ≤ 0`.
    LinearLe(LinearExpr),
    /// `target = min(vars)`. Unsatisfiable when `vars` is empty.
    MinEquality { target: IntVar, vars: Vec<IntVar> },
    /// `target = max(vars)`. Unsatisfiable when `vars` is empty.
    MaxEquality { target: IntVar, vars: Vec<IntVar> },
    /// Present intervals pairwise do not overlap. Absent ones are ignored.
    NoOverlap(Vec<IntervalVar>),
}

/// A constraint optimization model.
///
/// Built incrementally through the `new_*` / `add_*` methods, then handed to
/// a [`CpSolver`](super::CpSolver). The model owns no solver state.
#[derive(Debug, Clone)]
pub struct CpModel {
    name: String,
    pub(crate) vars: Vec<VarDecl>,
    pub(crate) intervals: Vec<IntervalDecl>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Option<LinearExpr>,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            intervals: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares an integer variable with domain `[lb, ub]`.
    pub fn new_int_var(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> IntVar {
        self.vars.push(VarDecl {
            name: name.into(),
            lb,
            ub,
        });
        IntVar(self.vars.len() - 1)
    }

    /// Declares a boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        BoolVar(self.new_int_var(0, 1, name).0)
    }

    /// Declares an always-present interval `end = start + duration`.
    pub fn new_interval(
        &mut self,
        start: IntVar,
        end: IntVar,
        duration: i64,
        name: impl Into<String>,
    ) -> IntervalVar {
        self.push_interval(start, end, duration, None, name.into())
    }

    /// Declares an optional interval whose existence is `presence`.
    pub fn new_optional_interval(
        &mut self,
        start: IntVar,
        end: IntVar,
        duration: i64,
        presence: BoolVar,
        name: impl Into<String>,
    ) -> IntervalVar {
        self.push_interval(start, end, duration, Some(presence), name.into())
    }

    fn push_interval(
        &mut self,
        start: IntVar,
        end: IntVar,
        duration: i64,
        presence: Option<BoolVar>,
        name: String,
    ) -> IntervalVar {
        self.intervals.push(IntervalDecl {
            name,
            start,
            end,
            duration,
            presence,
        });
        IntervalVar(self.intervals.len() - 1)
    }

    /// Requires exactly one of `literals` to be true.
    pub fn add_exactly_one(&mut self, literals: Vec<BoolVar>) {
        self.constraints.push(Constraint::ExactlyOne(literals));
    }

    /// Requires `lhs ≤ rhs`.
    pub fn add_less_or_equal(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) {
        let expr = (lhs.into() - rhs.into()).normalized();
        self.constraints.push(Constraint::LinearLe(expr));
    }

    /// Requires `target = min(vars)`.
    pub fn add_min_equality(&mut self, target: IntVar, vars: Vec<IntVar>) {
        self.constraints.push(Constraint::MinEquality { target, vars });
    }

    /// Requires `target = max(vars)`.
    pub fn add_max_equality(&mut self, target: IntVar, vars: Vec<IntVar>) {
        self.constraints.push(Constraint::MaxEquality { target, vars });
    }

    /// Forbids overlap among the present intervals.
    pub fn add_no_overlap(&mut self, intervals: Vec<IntervalVar>) {
        self.constraints.push(Constraint::NoOverlap(intervals));
    }

    /// Sets the expression to minimize, replacing any previous objective.
    pub fn minimize(&mut self, objective: impl Into<LinearExpr>) {
        self.objective = Some(objective.into().normalized());
    }

    /// The objective, if any.
    pub fn objective(&self) -> Option<&LinearExpr> {
        self.objective.as_ref()
    }

    /// Name of a variable.
    pub fn var_name(&self, var: IntVar) -> Option<&str> {
        self.vars.get(var.0).map(|v| v.name.as_str())
    }

    /// Declared domain of a variable.
    pub fn var_bounds(&self, var: IntVar) -> Option<(i64, i64)> {
        self.vars.get(var.0).map(|v| (v.lb, v.ub))
    }

    /// Name of an interval.
    pub fn interval_name(&self, interval: IntervalVar) -> Option<&str> {
        self.intervals.get(interval.0).map(|i| i.name.as_str())
    }

    /// Start, end and presence handles of an interval.
    pub fn interval_parts(&self, interval: IntervalVar) -> Option<(IntVar, IntVar, Option<BoolVar>)> {
        self.intervals
            .get(interval.0)
            .map(|i| (i.start, i.end, i.presence))
    }

    /// Constraints in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of variables (booleans included).
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of intervals.
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Number of constraints (interval links excluded).
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Checks that every handle is in range and every domain is usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        let n = self.vars.len();
        let check_var = |v: IntVar| -> Result<(), EngineError> {
            if v.0 < n {
                Ok(())
            } else {
                Err(EngineError::InvalidModel(format!(
                    "variable #{} is not declared",
                    v.0
                )))
            }
        };
        let check_interval = |i: IntervalVar| -> Result<(), EngineError> {
            if i.0 < self.intervals.len() {
                Ok(())
            } else {
                Err(EngineError::InvalidModel(format!(
                    "interval #{} is not declared",
                    i.0
                )))
            }
        };

        for v in &self.vars {
            if v.lb > v.ub {
                return Err(EngineError::InvalidModel(format!(
                    "variable '{}' has empty domain [{}, {}]",
                    v.name, v.lb, v.ub
                )));
            }
        }

        for i in &self.intervals {
            check_var(i.start)?;
            check_var(i.end)?;
            if let Some(p) = i.presence {
                check_var(p.as_int())?;
            }
            if i.duration < 0 {
                return Err(EngineError::InvalidModel(format!(
                    "interval '{}' has negative duration {}",
                    i.name, i.duration
                )));
            }
        }

        for c in &self.constraints {
            match c {
                Constraint::ExactlyOne(lits) => {
                    for l in lits {
                        check_var(l.as_int())?;
                    }
                }
                Constraint::LinearLe(expr) => {
                    for v in expr.vars() {
                        check_var(v)?;
                    }
                }
                Constraint::MinEquality { target, vars }
                | Constraint::MaxEquality { target, vars } => {
                    check_var(*target)?;
                    for v in vars {
                        check_var(*v)?;
                    }
                }
                Constraint::NoOverlap(intervals) => {
                    for i in intervals {
                        check_interval(*i)?;
                    }
                }
            }
        }

        if let Some(obj) = &self.objective {
            for v in obj.vars() {
                check_var(v)?;
            }
        }

        Ok(())
    }

    /// Whether a full assignment satisfies every domain, interval link and constraint.
    ///
    /// `values` must hold one entry per declared variable.
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        if values.len() != self.vars.len() {
            return false;
        }
        let in_domain = self
            .vars
            .iter()
            .zip(values)
            .all(|(d, &x)| d.lb <= x && x <= d.ub);
        if !in_domain {
            return false;
        }

        let present = |i: &IntervalDecl| i.presence.map_or(true, |p| values[p.0] == 1);

        if self
            .intervals
            .iter()
            .any(|i| values[i.start.0] + i.duration != values[i.end.0])
        {
            return false;
        }

        self.constraints.iter().all(|c| match c {
            Constraint::ExactlyOne(lits) => lits.iter().filter(|l| values[l.0] == 1).count() == 1,
            Constraint::LinearLe(expr) => expr.evaluate(values) <= 0,
            Constraint::MinEquality { target, vars } => vars
                .iter()
                .map(|v| values[v.0])
                .min()
                .is_some_and(|m| m == values[target.0]),
            Constraint::MaxEquality { target, vars } => vars
                .iter()
                .map(|v| values[v.0])
                .max()
                .is_some_and(|m| m == values[target.0]),
            Constraint::NoOverlap(intervals) => {
                let active: Vec<&IntervalDecl> = intervals
                    .iter()
                    .map(|i| &self.intervals[i.0])
                    .filter(|i| present(i) && i.duration > 0)
                    .collect();
                active.iter().enumerate().all(|(k, a)| {
                    active[k + 1..].iter().all(|b| {
                        values[a.end.0] <= values[b.start.0] || values[b.end.0] <= values[a.start.0]
                    })
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_counts() {
        let mut m = CpModel::new("test");
        let s = m.new_int_var(0, 10, "s");
        let e = m.new_int_var(0, 10, "e");
        let p = m.new_bool_var("p");
        let i = m.new_optional_interval(s, e, 3, p, "i");
        m.add_exactly_one(vec![p]);
        m.add_no_overlap(vec![i]);
        m.add_less_or_equal(s, 4i64);
        m.minimize(e);

        assert_eq!(m.name(), "test");
        assert_eq!(m.var_count(), 3);
        assert_eq!(m.interval_count(), 1);
        assert_eq!(m.constraint_count(), 3);
        assert_eq!(m.var_bounds(p.as_int()), Some((0, 1)));
        assert_eq!(m.interval_parts(i), Some((s, e, Some(p))));
        assert_eq!(m.interval_name(i), Some("i"));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let mut m = CpModel::new("bad");
        m.new_int_var(5, 4, "x");
        assert!(matches!(m.validate(), Err(EngineError::InvalidModel(_))));
    }

    #[test]
    fn test_validate_rejects_foreign_handle() {
        let mut other = CpModel::new("other");
        other.new_int_var(0, 1, "a");
        let foreign = other.new_int_var(0, 1, "b");

        let mut m = CpModel::new("bad");
        m.new_int_var(0, 1, "x");
        m.add_less_or_equal(foreign, 0i64);
        assert!(matches!(m.validate(), Err(EngineError::InvalidModel(_))));
    }

    #[test]
    fn test_is_satisfied_by() {
        let mut m = CpModel::new("check");
        let s1 = m.new_int_var(0, 10, "s1");
        let e1 = m.new_int_var(0, 10, "e1");
        let s2 = m.new_int_var(0, 10, "s2");
        let e2 = m.new_int_var(0, 10, "e2");
        let i1 = m.new_interval(s1, e1, 2, "i1");
        let i2 = m.new_interval(s2, e2, 3, "i2");
        m.add_no_overlap(vec![i1, i2]);

        assert!(m.is_satisfied_by(&[0, 2, 2, 5]));
        assert!(!m.is_satisfied_by(&[0, 2, 1, 4])); // overlap
        assert!(!m.is_satisfied_by(&[0, 3, 2, 5])); // broken link
        assert!(!m.is_satisfied_by(&[0, 2])); // wrong length
    }

    #[test]
    fn test_absent_intervals_ignored_by_no_overlap() {
        let mut m = CpModel::new("optional");
        let s1 = m.new_int_var(0, 10, "s1");
        let e1 = m.new_int_var(0, 10, "e1");
        let p1 = m.new_bool_var("p1");
        let s2 = m.new_int_var(0, 10, "s2");
        let e2 = m.new_int_var(0, 10, "e2");
        let p2 = m.new_bool_var("p2");
        let i1 = m.new_optional_interval(s1, e1, 2, p1, "i1");
        let i2 = m.new_optional_interval(s2, e2, 2, p2, "i2");
        m.add_no_overlap(vec![i1, i2]);

        // Same slot, one absent.
        assert!(m.is_satisfied_by(&[0, 2, 1, 0, 2, 0]));
        // Same slot, both present.
        assert!(!m.is_satisfied_by(&[0, 2, 1, 0, 2, 1]));
    }

    #[test]
    fn test_empty_aggregates_unsatisfied() {
        let mut m = CpModel::new("empty");
        let t = m.new_int_var(0, 10, "t");
        m.add_min_equality(t, vec![]);
        assert!(!m.is_satisfied_by(&[0]));

        let mut m = CpModel::new("empty-one");
        m.add_exactly_one(vec![]);
        assert!(!m.is_satisfied_by(&[]));
    }
}
