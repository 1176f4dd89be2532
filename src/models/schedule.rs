//! Schedule (solution) model.
//!
//! A schedule places every operation on one machine instance during one
//! time interval, and carries the KPIs derived from those placements.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::Job;

/// A complete schedule returned by a successful solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Latest end time over all scheduled operations.
    pub makespan: i64,
    /// One entry per input operation.
    pub scheduled_operations: Vec<ScheduledOperation>,
    /// Machine instance ID → busy time / makespan, in [0, 1].
    pub machine_utilization: BTreeMap<String, f64>,
    /// Mean over jobs of (last end − first start).
    pub average_flow_time: f64,
    /// Σ priority × job completion time (the primary objective).
    pub weighted_completion_time: i64,
    /// Whether the engine proved this schedule optimal.
    pub proven_optimal: bool,
}

/// An operation placed on a machine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Owning job ID.
    pub job_id: String,
    /// Operation ID (unique within the job).
    pub operation_id: String,
    /// Machine group the instance belongs to.
    pub machine_group_id: String,
    /// Assigned machine instance ID.
    pub machine_instance_id: String,
    /// Start time.
    pub start_time: i64,
    /// End time (`start_time + processing_time`).
    pub end_time: i64,
}

/// An invariant violation found by [`Schedule::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (job/operation pair, instance, or schedule).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// An input operation has no placement.
    MissingOperation,
    /// An operation is placed more than once.
    DuplicateOperation,
    /// A placement refers to an operation not in the input.
    UnknownOperation,
    /// `end_time − start_time` differs from the processing time.
    DurationMismatch,
    /// An operation starts before one of its predecessors ends.
    PrecedenceViolation,
    /// Two operations overlap on the same machine instance.
    MachineOverlap,
    /// Stored makespan is not the latest end time.
    MakespanMismatch,
}

impl ScheduledOperation {
    /// Creates a placement.
    pub fn new(
        job_id: impl Into<String>,
        operation_id: impl Into<String>,
        machine_group_id: impl Into<String>,
        machine_instance_id: impl Into<String>,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            operation_id: operation_id.into(),
            machine_group_id: machine_group_id.into(),
            machine_instance_id: machine_instance_id.into(),
            start_time,
            end_time,
        }
    }

    /// Duration (end − start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Whether two placements share time (half-open intervals).
    #[inline]
    pub fn overlaps(&self, other: &ScheduledOperation) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement and keeps `makespan` current.
    pub fn add_operation(&mut self, op: ScheduledOperation) {
        self.makespan = self.makespan.max(op.end_time);
        self.scheduled_operations.push(op);
    }

    /// Latest end time over the placements (0 when empty).
    pub fn latest_end(&self) -> i64 {
        self.scheduled_operations
            .iter()
            .map(|o| o.end_time)
            .max()
            .unwrap_or(0)
    }

    /// Finds the placement of an operation.
    pub fn operation(&self, job_id: &str, operation_id: &str) -> Option<&ScheduledOperation> {
        self.scheduled_operations
            .iter()
            .find(|o| o.job_id == job_id && o.operation_id == operation_id)
    }

    /// Returns all placements of a job.
    pub fn operations_for_job(&self, job_id: &str) -> Vec<&ScheduledOperation> {
        self.scheduled_operations
            .iter()
            .filter(|o| o.job_id == job_id)
            .collect()
    }

    /// Returns all placements on a machine instance, sorted by start time.
    pub fn operations_for_instance(&self, instance_id: &str) -> Vec<&ScheduledOperation> {
        let mut ops: Vec<&ScheduledOperation> = self
            .scheduled_operations
            .iter()
            .filter(|o| o.machine_instance_id == instance_id)
            .collect();
        ops.sort_by_key(|o| (o.start_time, o.end_time));
        ops
    }

    /// Completion time of a job (latest end of its placements).
    pub fn job_completion_time(&self, job_id: &str) -> Option<i64> {
        self.operations_for_job(job_id)
            .iter()
            .map(|o| o.end_time)
            .max()
    }

    /// Number of placements.
    pub fn operation_count(&self) -> usize {
        self.scheduled_operations.len()
    }

    /// Audits the schedule against the jobs it was built from.
    ///
    /// Checks that every operation is placed exactly once with its exact
    /// processing time, that precedence holds, that no machine instance runs
    /// two operations at once, and that `makespan` is the latest end time.
    ///
    /// Returns an empty list for a valid schedule.
    pub fn check(&self, jobs: &[Job]) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut placed: HashMap<(&str, &str), &ScheduledOperation> = HashMap::new();
        for op in &self.scheduled_operations {
            let key = (op.job_id.as_str(), op.operation_id.as_str());
            if placed.insert(key, op).is_some() {
                violations.push(Violation::new(
                    ViolationType::DuplicateOperation,
                    format!("{}/{}", op.job_id, op.operation_id),
                    "operation placed more than once",
                ));
            }
        }

        let mut known: HashSet<(&str, &str)> = HashSet::new();
        for job in jobs {
            for operation in &job.operations {
                known.insert((job.id.as_str(), operation.id.as_str()));
                let entity = format!("{}/{}", job.id, operation.id);
                let Some(op) = placed.get(&(job.id.as_str(), operation.id.as_str())) else {
                    violations.push(Violation::new(
                        ViolationType::MissingOperation,
                        entity,
                        "operation has no placement",
                    ));
                    continue;
                };

                if op.duration() != operation.processing_time {
                    violations.push(Violation::new(
                        ViolationType::DurationMismatch,
                        entity.clone(),
                        format!(
                            "placed for {} units, needs {}",
                            op.duration(),
                            operation.processing_time
                        ),
                    ));
                }

                for pred in &operation.predecessors {
                    if let Some(p) = placed.get(&(job.id.as_str(), pred.as_str())) {
                        if op.start_time < p.end_time {
                            violations.push(Violation::new(
                                ViolationType::PrecedenceViolation,
                                entity.clone(),
                                format!(
                                    "starts at {} before predecessor '{}' ends at {}",
                                    op.start_time, pred, p.end_time
                                ),
                            ));
                        }
                    }
                }
            }
        }

        for op in &self.scheduled_operations {
            if !known.contains(&(op.job_id.as_str(), op.operation_id.as_str())) {
                violations.push(Violation::new(
                    ViolationType::UnknownOperation,
                    format!("{}/{}", op.job_id, op.operation_id),
                    "placement for an operation not in the input",
                ));
            }
        }

        let mut by_instance: BTreeMap<&str, Vec<&ScheduledOperation>> = BTreeMap::new();
        for op in &self.scheduled_operations {
            by_instance
                .entry(op.machine_instance_id.as_str())
                .or_default()
                .push(op);
        }
        for (instance, ops) in &by_instance {
            for i in 0..ops.len() {
                for j in (i + 1)..ops.len() {
                    if ops[i].overlaps(ops[j]) {
                        violations.push(Violation::new(
                            ViolationType::MachineOverlap,
                            *instance,
                            format!(
                                "{}/{} [{}, {}) overlaps {}/{} [{}, {})",
                                ops[i].job_id,
                                ops[i].operation_id,
                                ops[i].start_time,
                                ops[i].end_time,
                                ops[j].job_id,
                                ops[j].operation_id,
                                ops[j].start_time,
                                ops[j].end_time,
                            ),
                        ));
                    }
                }
            }
        }

        if self.makespan != self.latest_end() {
            violations.push(Violation::new(
                ViolationType::MakespanMismatch,
                "schedule",
                format!(
                    "makespan {} but latest end is {}",
                    self.makespan,
                    self.latest_end()
                ),
            ));
        }

        violations
    }
}
