//! Exact depth-first branch-and-bound engine.
//!
//! # Algorithm
//!
//! 1. Bounds propagation to a fixpoint over interval links, linear
//!    inequalities, min/max aggregates, exactly-one groups, pairwise
//!    no-overlap reasoning and the incumbent bound `objective ≤ best − 1`.
//! 2. Branching, in order:
//!    - presence literals (earliest start first, least-loaded candidate first),
//!    - the order of unresolved no-overlap pairs (earlier start first),
//!    - any remaining variable (lower bound first).
//! 3. Every leaf is a full assignment; it becomes the new incumbent.
//!
//! The search is deterministic: it iterates only over vectors in
//! declaration order, so identical models yield identical solutions.
//!
//! # Reference
//! - Baptiste, Le Pape & Nuijten (2001), "Constraint-Based Scheduling", Ch. 2
//! - Brucker, Jurisch & Sievers (1994), "A branch and bound algorithm for
//!   the job-shop scheduling problem"

use std::time::{Duration, Instant};

use tracing::debug;

use super::model::{Constraint, CpModel};
use super::solver::{CpSolution, CpSolver, EngineError, SolverConfig, SolverStatus};
use super::variables::{BoolVar, IntVar, IntervalDecl, LinearExpr};

/// Built-in exact solver.
///
/// Suited to small and medium instances. Larger instances should run
/// under a [`SolverConfig`] time or node limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBoundSolver;

impl BranchAndBoundSolver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for BranchAndBoundSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> Result<CpSolution, EngineError> {
        model.validate()?;
        Ok(Search::new(model, config).run())
    }
}

/// An emptied domain.
#[derive(Debug)]
struct Conflict;

/// `Ok(true)` when a bound moved.
type Prop = Result<bool, Conflict>;

#[derive(Debug, Clone)]
struct Domains {
    lb: Vec<i64>,
    ub: Vec<i64>,
}

impl Domains {
    fn from_model(model: &CpModel) -> Self {
        Self {
            lb: model.vars.iter().map(|v| v.lb).collect(),
            ub: model.vars.iter().map(|v| v.ub).collect(),
        }
    }

    fn set_lb(&mut self, var: IntVar, value: i64) -> Prop {
        if value <= self.lb[var.0] {
            return Ok(false);
        }
        if value > self.ub[var.0] {
            return Err(Conflict);
        }
        self.lb[var.0] = value;
        Ok(true)
    }

    fn set_ub(&mut self, var: IntVar, value: i64) -> Prop {
        if value >= self.ub[var.0] {
            return Ok(false);
        }
        if value < self.lb[var.0] {
            return Err(Conflict);
        }
        self.ub[var.0] = value;
        Ok(true)
    }

    fn lb(&self, var: IntVar) -> i64 {
        self.lb[var.0]
    }

    fn ub(&self, var: IntVar) -> i64 {
        self.ub[var.0]
    }

    fn is_fixed(&self, var: IntVar) -> bool {
        self.lb[var.0] == self.ub[var.0]
    }

    fn presence(&self, interval: &IntervalDecl) -> Presence {
        match interval.presence {
            None => Presence::Present,
            Some(p) if self.lb(p.as_int()) == 1 => Presence::Present,
            Some(p) if self.ub(p.as_int()) == 0 => Presence::Absent,
            Some(_) => Presence::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Present,
    Absent,
    Open,
}

#[derive(Debug, Clone)]
struct Node {
    domains: Domains,
    /// Branching-imposed precedences `(before, after)` between intervals.
    orders: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy)]
enum Decision {
    SetLb(IntVar, i64),
    SetUb(IntVar, i64),
    Order(usize, usize),
}

struct Search<'a> {
    model: &'a CpModel,
    config: &'a SolverConfig,
    /// Interval indices of each no-overlap constraint.
    overlap_groups: Vec<Vec<usize>>,
    /// Interval index → positions in `overlap_groups`.
    member_of: Vec<Vec<usize>>,
    incumbent: Option<(i64, Vec<i64>)>,
    /// `objective − (best − 1) ≤ 0` once an incumbent exists.
    bound: Option<LinearExpr>,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(model: &'a CpModel, config: &'a SolverConfig) -> Self {
        let overlap_groups: Vec<Vec<usize>> = model
            .constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::NoOverlap(list) => Some(list.iter().map(|i| i.0).collect()),
                _ => None,
            })
            .collect();

        let mut member_of = vec![Vec::new(); model.intervals.len()];
        for (g, group) in overlap_groups.iter().enumerate() {
            for &i in group {
                member_of[i].push(g);
            }
        }

        Self {
            model,
            config,
            overlap_groups,
            member_of,
            incumbent: None,
            bound: None,
            nodes: 0,
        }
    }

    fn run(mut self) -> CpSolution {
        let started = Instant::now();
        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| started + Duration::from_millis(ms));

        let root = Node {
            domains: Domains::from_model(self.model),
            orders: Vec::new(),
        };
        let mut stack: Vec<(Node, Option<Decision>)> = vec![(root, None)];
        let mut exhausted = true;

        while let Some((mut node, decision)) = stack.pop() {
            if self.limit_reached(deadline) {
                exhausted = false;
                break;
            }
            self.nodes += 1;

            if let Some(d) = decision {
                if apply(&mut node, d).is_err() {
                    continue;
                }
            }
            if self.propagate(&mut node).is_err() {
                continue;
            }

            match self.branch(&node) {
                Some(decisions) => {
                    for d in decisions.into_iter().rev() {
                        stack.push((node.clone(), Some(d)));
                    }
                }
                None => {
                    self.record(node.domains.lb);
                    if self.model.objective.is_none() {
                        break;
                    }
                }
            }
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let (status, values, objective_value) = match self.incumbent.take() {
            Some((value, values)) => {
                let status = if exhausted {
                    SolverStatus::Optimal
                } else {
                    SolverStatus::Feasible
                };
                let objective = self.model.objective.as_ref().map(|_| value);
                (status, values, objective)
            }
            None if exhausted => (SolverStatus::Infeasible, Vec::new(), None),
            None => (SolverStatus::Unknown, Vec::new(), None),
        };

        debug!(
            model = self.model.name(),
            ?status,
            nodes = self.nodes,
            elapsed_ms,
            "search finished"
        );

        CpSolution {
            status,
            values,
            objective_value,
            nodes: self.nodes,
            elapsed_ms,
        }
    }

    fn limit_reached(&self, deadline: Option<Instant>) -> bool {
        if self.config.node_limit.is_some_and(|n| self.nodes >= n) {
            return true;
        }
        deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn record(&mut self, values: Vec<i64>) {
        debug_assert!(self.model.is_satisfied_by(&values));
        let value = self
            .model
            .objective
            .as_ref()
            .map_or(0, |obj| obj.evaluate(&values));
        debug!(objective = value, nodes = self.nodes, "new incumbent");

        if let Some(obj) = &self.model.objective {
            let mut bound = obj.clone();
            bound.constant -= value - 1;
            self.bound = Some(bound);
        }
        self.incumbent = Some((value, values));
    }

    // ---- propagation ------------------------------------------------------

    fn propagate(&self, node: &mut Node) -> Result<(), Conflict> {
        let Node { domains, orders } = node;
        loop {
            let mut changed = false;

            for interval in &self.model.intervals {
                changed |= propagate_link(domains, interval)?;
            }

            for c in &self.model.constraints {
                changed |= match c {
                    Constraint::ExactlyOne(lits) => propagate_exactly_one(domains, lits)?,
                    Constraint::LinearLe(expr) => propagate_linear(domains, expr)?,
                    Constraint::MinEquality { target, vars } => {
                        propagate_min(domains, *target, vars)?
                    }
                    Constraint::MaxEquality { target, vars } => {
                        propagate_max(domains, *target, vars)?
                    }
                    Constraint::NoOverlap(_) => false,
                };
            }

            for group in &self.overlap_groups {
                changed |= self.propagate_no_overlap(domains, group)?;
            }

            for &(before, after) in orders.iter() {
                changed |= self.propagate_order(domains, before, after)?;
            }

            if let Some(bound) = &self.bound {
                changed |= propagate_linear(domains, bound)?;
            }

            if !changed {
                return Ok(());
            }
        }
    }

    fn propagate_no_overlap(&self, d: &mut Domains, group: &[usize]) -> Prop {
        let mut changed = false;
        for (k, &ia) in group.iter().enumerate() {
            for &ib in &group[k + 1..] {
                let a = &self.model.intervals[ia];
                let b = &self.model.intervals[ib];
                if a.duration == 0 || b.duration == 0 {
                    continue;
                }
                let a_first = d.lb(a.start) + a.duration <= d.ub(b.start);
                let b_first = d.lb(b.start) + b.duration <= d.ub(a.start);

                match (d.presence(a), d.presence(b)) {
                    (Presence::Present, Presence::Present) => {
                        if !a_first && !b_first {
                            return Err(Conflict);
                        }
                        if !a_first {
                            changed |= self.propagate_order(d, ib, ia)?;
                        }
                        if !b_first {
                            changed |= self.propagate_order(d, ia, ib)?;
                        }
                    }
                    (Presence::Present, Presence::Open) if !a_first && !b_first => {
                        changed |= forbid(d, b.presence)?;
                    }
                    (Presence::Open, Presence::Present) if !a_first && !b_first => {
                        changed |= forbid(d, a.presence)?;
                    }
                    _ => {}
                }
            }
        }
        Ok(changed)
    }

    fn propagate_order(&self, d: &mut Domains, before: usize, after: usize) -> Prop {
        let a = &self.model.intervals[before];
        let b = &self.model.intervals[after];
        let mut changed = d.set_lb(b.start, d.lb(a.start) + a.duration)?;
        changed |= d.set_ub(a.start, d.ub(b.start) - a.duration)?;
        Ok(changed)
    }

    // ---- branching --------------------------------------------------------

    fn branch(&self, node: &Node) -> Option<Vec<Decision>> {
        self.branch_presence(&node.domains)
            .or_else(|| self.branch_order(node))
            .or_else(|| branch_value(&node.domains))
    }

    /// Earliest-start open presence literal; ties go to the least-loaded
    /// candidate, then declaration order.
    fn branch_presence(&self, d: &Domains) -> Option<Vec<Decision>> {
        let (_, literal) = self
            .model
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, iv)| d.presence(iv) == Presence::Open)
            .filter_map(|(k, iv)| iv.presence.map(|p| ((d.lb(iv.start), self.load(d, k), k), p)))
            .min_by_key(|&(key, _)| key)?;

        let var = literal.as_int();
        Some(vec![Decision::SetLb(var, 1), Decision::SetUb(var, 0)])
    }

    /// Total duration already committed to the no-overlap groups of an interval.
    fn load(&self, d: &Domains, interval: usize) -> i64 {
        self.member_of[interval]
            .iter()
            .flat_map(|&g| self.overlap_groups[g].iter())
            .map(|&i| &self.model.intervals[i])
            .filter(|iv| d.presence(iv) == Presence::Present)
            .map(|iv| iv.duration)
            .sum()
    }

    /// Unresolved pair of present intervals sharing a no-overlap group.
    fn branch_order(&self, node: &Node) -> Option<Vec<Decision>> {
        let d = &node.domains;
        let mut best: Option<((i64, i64, usize, usize), usize, usize)> = None;

        for group in &self.overlap_groups {
            for (k, &ia) in group.iter().enumerate() {
                for &ib in &group[k + 1..] {
                    let a = &self.model.intervals[ia];
                    let b = &self.model.intervals[ib];
                    if a.duration == 0 || b.duration == 0 {
                        continue;
                    }
                    if d.presence(a) != Presence::Present || d.presence(b) != Presence::Present {
                        continue;
                    }
                    if node
                        .orders
                        .iter()
                        .any(|&o| o == (ia, ib) || o == (ib, ia))
                    {
                        continue;
                    }
                    let resolved = d.ub(a.start) + a.duration <= d.lb(b.start)
                        || d.ub(b.start) + b.duration <= d.lb(a.start);
                    if resolved {
                        continue;
                    }

                    let (first, second) = if (d.lb(a.start), d.lb(a.end), ia)
                        <= (d.lb(b.start), d.lb(b.end), ib)
                    {
                        (ia, ib)
                    } else {
                        (ib, ia)
                    };
                    let key = (
                        d.lb(a.start).min(d.lb(b.start)),
                        d.lb(a.start).max(d.lb(b.start)),
                        first,
                        second,
                    );
                    if best.map_or(true, |(k, _, _)| key < k) {
                        best = Some((key, first, second));
                    }
                }
            }
        }

        best.map(|(_, first, second)| {
            vec![
                Decision::Order(first, second),
                Decision::Order(second, first),
            ]
        })
    }
}

fn apply(node: &mut Node, decision: Decision) -> Result<(), Conflict> {
    match decision {
        Decision::SetLb(var, value) => node.domains.set_lb(var, value).map(|_| ()),
        Decision::SetUb(var, value) => node.domains.set_ub(var, value).map(|_| ()),
        Decision::Order(before, after) => {
            node.orders.push((before, after));
            Ok(())
        }
    }
}

/// First unfixed variable: its lower bound, else above it.
fn branch_value(d: &Domains) -> Option<Vec<Decision>> {
    (0..d.lb.len()).map(IntVar).find(|&v| !d.is_fixed(v)).map(|v| {
        let lb = d.lb(v);
        vec![Decision::SetUb(v, lb), Decision::SetLb(v, lb + 1)]
    })
}

fn forbid(d: &mut Domains, presence: Option<BoolVar>) -> Prop {
    match presence {
        Some(p) => d.set_ub(p.as_int(), 0),
        None => Err(Conflict),
    }
}

fn propagate_link(d: &mut Domains, interval: &IntervalDecl) -> Prop {
    let (s, e, dur) = (interval.start, interval.end, interval.duration);
    let mut changed = d.set_lb(e, d.lb(s) + dur)?;
    changed |= d.set_ub(e, d.ub(s) + dur)?;
    changed |= d.set_lb(s, d.lb(e) - dur)?;
    changed |= d.set_ub(s, d.ub(e) - dur)?;
    Ok(changed)
}

fn propagate_exactly_one(d: &mut Domains, literals: &[BoolVar]) -> Prop {
    let mut trues = 0usize;
    let mut open = Vec::new();
    for l in literals {
        let v = l.as_int();
        if d.lb(v) == 1 {
            trues += 1;
        } else if d.ub(v) == 1 {
            open.push(v);
        }
    }

    match (trues, open.len()) {
        (t, _) if t > 1 => Err(Conflict),
        (1, _) => {
            let mut changed = false;
            for v in open {
                changed |= d.set_ub(v, 0)?;
            }
            Ok(changed)
        }
        (0, 0) => Err(Conflict),
        (0, 1) => d.set_lb(open[0], 1),
        _ => Ok(false),
    }
}

/// Bounds reasoning on `Σ c·x + k ≤ 0`.
fn propagate_linear(d: &mut Domains, expr: &LinearExpr) -> Prop {
    let term_min = |d: &Domains, c: i64, v: IntVar| -> i128 {
        if c > 0 {
            c as i128 * d.lb(v) as i128
        } else {
            c as i128 * d.ub(v) as i128
        }
    };

    let min_sum: i128 = expr.constant as i128
        + expr
            .terms
            .iter()
            .map(|&(c, v)| term_min(d, c, v))
            .sum::<i128>();
    if min_sum > 0 {
        return Err(Conflict);
    }

    let mut changed = false;
    for &(c, v) in &expr.terms {
        // c·x ≤ slack
        let slack = -(min_sum - term_min(d, c, v));
        let c = c as i128;
        if c > 0 {
            changed |= d.set_ub(v, clamp(div_floor(slack, c)))?;
        } else {
            changed |= d.set_lb(v, clamp(div_ceil(slack, c)))?;
        }
    }
    Ok(changed)
}

fn propagate_min(d: &mut Domains, target: IntVar, vars: &[IntVar]) -> Prop {
    let (Some(min_lb), Some(min_ub)) = (
        vars.iter().map(|&v| d.lb(v)).min(),
        vars.iter().map(|&v| d.ub(v)).min(),
    ) else {
        return Err(Conflict);
    };

    let mut changed = d.set_lb(target, min_lb)?;
    changed |= d.set_ub(target, min_ub)?;
    for &v in vars {
        changed |= d.set_lb(v, d.lb(target))?;
    }

    let ub = d.ub(target);
    let mut support = vars.iter().filter(|&&v| d.lb(v) <= ub);
    if let (Some(&only), None) = (support.next(), support.next()) {
        changed |= d.set_ub(only, ub)?;
    }
    Ok(changed)
}

fn propagate_max(d: &mut Domains, target: IntVar, vars: &[IntVar]) -> Prop {
    let (Some(max_lb), Some(max_ub)) = (
        vars.iter().map(|&v| d.lb(v)).max(),
        vars.iter().map(|&v| d.ub(v)).max(),
    ) else {
        return Err(Conflict);
    };

    let mut changed = d.set_lb(target, max_lb)?;
    changed |= d.set_ub(target, max_ub)?;
    for &v in vars {
        changed |= d.set_ub(v, d.ub(target))?;
    }

    let lb = d.lb(target);
    let mut support = vars.iter().filter(|&&v| d.ub(v) >= lb);
    if let (Some(&only), None) = (support.next(), support.next()) {
        changed |= d.set_lb(only, lb)?;
    }
    Ok(changed)
}

fn div_floor(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 && ((n < 0) != (d < 0)) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 && ((n < 0) == (d < 0)) {
        q + 1
    } else {
        q
    }
}

fn clamp(x: i128) -> i64 {
    x.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(model: &CpModel) -> CpSolution {
        BranchAndBoundSolver::new()
            .solve(model, &SolverConfig::default())
            .unwrap()
    }

    #[test]
    fn test_division_rounding() {
        assert_eq!(div_floor(7, 2), 3);
        assert_eq!(div_floor(-7, 2), -4);
        assert_eq!(div_floor(7, -2), -4);
        assert_eq!(div_floor(-7, -2), 3);
        assert_eq!(div_ceil(7, 2), 4);
        assert_eq!(div_ceil(-7, 2), -3);
        assert_eq!(div_ceil(7, -2), -3);
        assert_eq!(div_ceil(-7, -2), 4);
        assert_eq!(div_ceil(6, 3), 2);
    }

    #[test]
    fn test_minimize_single_var() {
        let mut m = CpModel::new("min");
        let x = m.new_int_var(3, 10, "x");
        m.minimize(x);
        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.value(x), Some(3));
        assert_eq!(sol.objective_value, Some(3));
    }

    #[test]
    fn test_linear_inequality() {
        // x + y ≥ 7, minimize 2x + y with x, y ∈ [0, 5] → x = 2, y = 5
        let mut m = CpModel::new("lin");
        let x = m.new_int_var(0, 5, "x");
        let y = m.new_int_var(0, 5, "y");
        m.add_less_or_equal(7i64, LinearExpr::sum([x, y]));
        m.minimize(LinearExpr::weighted_sum([(2, x), (1, y)]));
        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.value(x), Some(2));
        assert_eq!(sol.value(y), Some(5));
        assert_eq!(sol.objective_value, Some(9));
    }

    #[test]
    fn test_infeasible_linear() {
        let mut m = CpModel::new("inf");
        let x = m.new_int_var(0, 3, "x");
        m.add_less_or_equal(5i64, x);
        assert_eq!(solve(&m).status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_empty_exactly_one_is_infeasible() {
        let mut m = CpModel::new("empty");
        m.new_int_var(0, 3, "x");
        m.add_exactly_one(Vec::new());
        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Infeasible);
        assert!(sol.values.is_empty());
    }

    #[test]
    fn test_exactly_one_picks_cheapest() {
        let mut m = CpModel::new("choice");
        let a = m.new_bool_var("a");
        let b = m.new_bool_var("b");
        let c = m.new_bool_var("c");
        m.add_exactly_one(vec![a, b, c]);
        m.minimize(LinearExpr::weighted_sum([(5, a.as_int()), (2, b.as_int()), (9, c.as_int())]));
        let sol = solve(&m);
        assert_eq!(sol.bool_value(a), Some(false));
        assert_eq!(sol.bool_value(b), Some(true));
        assert_eq!(sol.bool_value(c), Some(false));
    }

    #[test]
    fn test_min_max_equality() {
        let mut m = CpModel::new("agg");
        let x = m.new_int_var(2, 9, "x");
        let y = m.new_int_var(4, 9, "y");
        let lo = m.new_int_var(0, 20, "lo");
        let hi = m.new_int_var(0, 20, "hi");
        m.add_min_equality(lo, vec![x, y]);
        m.add_max_equality(hi, vec![x, y]);
        m.add_less_or_equal(6i64, lo);
        m.minimize(hi);
        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.value(lo), Some(6));
        assert_eq!(sol.value(hi), Some(6));
        assert!(m.is_satisfied_by(&sol.values));
    }

    #[test]
    fn test_no_overlap_serializes() {
        let mut m = CpModel::new("disjunctive");
        let mut ends = Vec::new();
        let mut intervals = Vec::new();
        for (k, dur) in [3, 2, 4].into_iter().enumerate() {
            let s = m.new_int_var(0, 9, format!("s{k}"));
            let e = m.new_int_var(0, 9, format!("e{k}"));
            intervals.push(m.new_interval(s, e, dur, format!("i{k}")));
            ends.push(e);
        }
        m.add_no_overlap(intervals);
        let makespan = m.new_int_var(0, 9, "makespan");
        m.add_max_equality(makespan, ends);
        m.minimize(makespan);

        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.value(makespan), Some(9));
        assert!(m.is_satisfied_by(&sol.values));
    }

    #[test]
    fn test_optional_intervals_on_two_machines() {
        // Two tasks of length 4, each may run on machine 0 or 1.
        let mut m = CpModel::new("alternatives");
        let mut per_machine = vec![Vec::new(), Vec::new()];
        let mut ends = Vec::new();
        for t in 0..2 {
            let mut lits = Vec::new();
            for (k, machine) in per_machine.iter_mut().enumerate() {
                let s = m.new_int_var(0, 8, format!("s{t}{k}"));
                let e = m.new_int_var(0, 8, format!("e{t}{k}"));
                let p = m.new_bool_var(format!("p{t}{k}"));
                machine.push(m.new_optional_interval(s, e, 4, p, format!("i{t}{k}")));
                lits.push(p);
                ends.push(e);
            }
            m.add_exactly_one(lits);
        }
        for machine in per_machine {
            m.add_no_overlap(machine);
        }
        let makespan = m.new_int_var(0, 8, "makespan");
        m.add_max_equality(makespan, ends);
        m.minimize(makespan);

        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.value(makespan), Some(4));
        assert!(m.is_satisfied_by(&sol.values));
    }

    #[test]
    fn test_satisfaction_without_objective() {
        let mut m = CpModel::new("sat");
        let x = m.new_int_var(0, 5, "x");
        m.add_less_or_equal(2i64, x);
        let sol = solve(&m);
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.value(x), Some(2));
        assert_eq!(sol.objective_value, None);
    }

    #[test]
    fn test_node_limit_without_solution_is_unknown() {
        let mut m = CpModel::new("limited");
        let x = m.new_int_var(0, 5, "x");
        m.minimize(x);
        let sol = BranchAndBoundSolver::new()
            .solve(&m, &SolverConfig::default().with_node_limit(0))
            .unwrap();
        assert_eq!(sol.status, SolverStatus::Unknown);
        assert!(!sol.is_solution_found());
    }

    #[test]
    fn test_invalid_model_is_engine_error() {
        let mut m = CpModel::new("invalid");
        m.new_int_var(3, 1, "x");
        let err = BranchAndBoundSolver::new()
            .solve(&m, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidModel(_)));
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            let mut m = CpModel::new("det");
            let mut lits = Vec::new();
            let mut intervals = Vec::new();
            let mut ends = Vec::new();
            for k in 0..3 {
                let s = m.new_int_var(0, 6, format!("s{k}"));
                let e = m.new_int_var(0, 6, format!("e{k}"));
                let p = m.new_bool_var(format!("p{k}"));
                intervals.push(m.new_optional_interval(s, e, 2, p, format!("i{k}")));
                lits.push(p);
                ends.push(e);
            }
            m.add_exactly_one(lits);
            m.add_no_overlap(intervals);
            let last = m.new_int_var(0, 6, "last");
            m.add_max_equality(last, ends);
            m.minimize(last);
            m
        };
        let a = solve(&build());
        let b = solve(&build());
        assert_eq!(a.values, b.values);
        assert_eq!(a.objective_value, b.objective_value);
        assert_eq!(a.nodes, b.nodes);
    }
}
