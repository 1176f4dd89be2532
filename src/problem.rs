//! Validated problem snapshot for one solve call.
//!
//! [`ProblemModel`] borrows the caller's jobs and machine groups, checks
//! them, and precomputes everything the formulation needs: the time
//! horizon, the machine instance table, predecessor indices and the sink
//! operations of each job.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::ScheduleError;
use crate::models::{Job, MachineGroup, MachineInstance};
use crate::validation::validate_input;

/// Immutable, validated view of a scheduling problem.
#[derive(Debug, Clone)]
pub struct ProblemModel<'a> {
    jobs: &'a [Job],
    groups: &'a [MachineGroup],
    horizon: i64,
    /// All instances, grouped by machine group in input order.
    instances: Vec<MachineInstance>,
    group_instances: HashMap<&'a str, Range<usize>>,
    /// `[job][operation]` → indices of predecessor operations.
    predecessors: Vec<Vec<Vec<usize>>>,
    /// `[job]` → indices of operations no other operation depends on.
    sinks: Vec<Vec<usize>>,
}

impl<'a> ProblemModel<'a> {
    /// Checks the input and builds the snapshot.
    ///
    /// # Errors
    /// - [`ScheduleError::NothingToSolve`] if `jobs` or `groups` is empty
    /// - [`ScheduleError::Validation`] with every detected issue otherwise
    pub fn new(jobs: &'a [Job], groups: &'a [MachineGroup]) -> Result<Self, ScheduleError> {
        if jobs.is_empty() {
            return Err(ScheduleError::NothingToSolve("no jobs".into()));
        }
        if groups.is_empty() {
            return Err(ScheduleError::NothingToSolve("no machine groups".into()));
        }
        validate_input(jobs, groups)?;

        let horizon = jobs.iter().map(Job::total_processing_time).sum();

        let mut instances = Vec::new();
        let mut group_instances = HashMap::new();
        for group in groups {
            let first = instances.len();
            instances.extend(group.instances());
            group_instances.insert(group.id.as_str(), first..instances.len());
        }

        let mut predecessors = Vec::with_capacity(jobs.len());
        let mut sinks = Vec::with_capacity(jobs.len());
        for job in jobs {
            let index: HashMap<&str, usize> = job
                .operations
                .iter()
                .enumerate()
                .map(|(i, op)| (op.id.as_str(), i))
                .collect();

            let preds: Vec<Vec<usize>> = job
                .operations
                .iter()
                .map(|op| {
                    op.predecessors
                        .iter()
                        .filter_map(|p| index.get(p.as_str()).copied())
                        .collect()
                })
                .collect();

            let mut has_successor = vec![false; job.operations.len()];
            for &p in preds.iter().flatten() {
                has_successor[p] = true;
            }
            sinks.push(
                has_successor
                    .iter()
                    .enumerate()
                    .filter(|&(_, &succ)| !succ)
                    .map(|(i, _)| i)
                    .collect(),
            );
            predecessors.push(preds);
        }

        Ok(Self {
            jobs,
            groups,
            horizon,
            instances,
            group_instances,
            predecessors,
            sinks,
        })
    }

    /// The jobs, in input order.
    pub fn jobs(&self) -> &'a [Job] {
        self.jobs
    }

    /// The machine groups, in input order.
    pub fn groups(&self) -> &'a [MachineGroup] {
        self.groups
    }

    /// Sum of all processing times; an upper bound for every time value.
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Every machine instance. Positions in this slice are instance indices.
    pub fn instances(&self) -> &[MachineInstance] {
        &self.instances
    }

    /// Instance indices of a group. Empty for zero-capacity or unknown groups.
    pub fn instance_range(&self, group_id: &str) -> Range<usize> {
        self.group_instances.get(group_id).cloned().unwrap_or(0..0)
    }

    /// Predecessor operation indices of `jobs()[job].operations[operation]`.
    pub fn predecessors(&self, job: usize, operation: usize) -> &[usize] {
        &self.predecessors[job][operation]
    }

    /// Operations of a job that precede no other operation.
    pub fn sink_operations(&self, job: usize) -> &[usize] {
        &self.sinks[job]
    }

    /// Total number of operations.
    pub fn operation_count(&self) -> usize {
        self.jobs.iter().map(Job::operation_count).sum()
    }
}
