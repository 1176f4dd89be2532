//! Input validation for scheduling problems.
//!
//! Checks structural integrity of jobs and machine groups before any
//! model construction. Detects:
//! - Duplicate IDs (jobs, machine groups, operations within a job)
//! - Unknown machine group references
//! - Non-positive processing times and priorities
//! - Empty jobs
//! - Unknown predecessors and circular precedence (DAG validation)
//! - Priorities and times too large for the scalarized objective
//!
//! A machine group with quantity 0 is legal input: it surfaces later as
//! an infeasible model, not as a validation error.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Job, MachineGroup};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An operation references a machine group that doesn't exist.
    InvalidMachineGroupReference,
    /// Processing time is zero or negative.
    NonPositiveProcessingTime,
    /// Job priority is zero or negative.
    NonPositivePriority,
    /// A job has no operations.
    EmptyJob,
    /// An operation references a predecessor that isn't in its job.
    InvalidPredecessor,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// Priorities and processing times are too large for the objective to fit in `i64`.
    ObjectiveOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a scheduling problem.
///
/// Checks:
/// 1. No duplicate machine group IDs
/// 2. No duplicate job IDs
/// 3. Every job has at least one operation and a positive priority
/// 4. No duplicate operation IDs within a job
/// 5. Every operation has a positive processing time
/// 6. Every machine group reference points to an existing group
/// 7. Every predecessor names an operation of the same job
/// 8. No circular precedence within a job
/// 9. `Σ priority · H · (H + 1) + H` fits in `i64`, where `H` is the sum of
///    all processing times
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], groups: &[MachineGroup]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut group_ids = HashSet::new();
    for g in groups {
        if !group_ids.insert(g.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate machine group ID: {}", g.id),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if job.operations.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job '{}' has no operations", job.id),
            ));
        }

        if job.priority <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositivePriority,
                format!("Job '{}' has non-positive priority {}", job.id, job.priority),
            ));
        }

        let mut operation_ids = HashSet::new();
        for op in &job.operations {
            if !operation_ids.insert(op.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate operation ID '{}' in job '{}'", op.id, job.id),
                ));
            }

            if op.processing_time <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveProcessingTime,
                    format!(
                        "Operation '{}' of job '{}' has non-positive processing time {}",
                        op.id, job.id, op.processing_time
                    ),
                ));
            }

            if !group_ids.contains(op.machine_group_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMachineGroupReference,
                    format!(
                        "Operation '{}' of job '{}' references unknown machine group '{}'",
                        op.id, job.id, op.machine_group_id
                    ),
                ));
            }
        }

        for op in &job.operations {
            for pred in &op.predecessors {
                if !operation_ids.contains(pred.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidPredecessor,
                        format!(
                            "Operation '{}' of job '{}' references unknown predecessor '{}'",
                            op.id, job.id, pred
                        ),
                    ));
                }
            }
        }

        if let Some(cycle_err) = detect_cycles(job) {
            errors.push(cycle_err);
        }
    }

    if let Some(overflow) = check_objective_range(jobs) {
        errors.push(overflow);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Bounds the largest objective value any schedule within the horizon can reach.
///
/// The objective is `(H + 1) · Σ priority · C + C_max` with every `C ≤ H`.
fn check_objective_range(jobs: &[Job]) -> Option<ValidationError> {
    let horizon: i128 = jobs
        .iter()
        .flat_map(|job| &job.operations)
        .map(|op| i128::from(op.processing_time.max(0)))
        .sum();
    let priorities: i128 = jobs.iter().map(|job| i128::from(job.priority.max(0))).sum();

    let bound = priorities
        .checked_mul(horizon)
        .and_then(|v| v.checked_mul(horizon + 1))
        .and_then(|v| v.checked_add(horizon));
    match bound {
        Some(b) if b <= i128::from(i64::MAX) => None,
        _ => Some(ValidationError::new(
            ValidationErrorKind::ObjectiveOverflow,
            format!(
                "Total priority {priorities} over horizon {horizon} overflows the objective range"
            ),
        )),
    }
}

/// Detects cycles in a job's precedence graph (Kahn's algorithm).
///
/// Predecessor lists never cross jobs, so each job is checked on its own.
/// Iterative, so route length is not bounded by the call stack.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(job: &Job) -> Option<ValidationError> {
    let index: HashMap<&str, usize> = job
        .operations
        .iter()
        .enumerate()
        .map(|(i, op)| (op.id.as_str(), i))
        .collect();

    let n = job.operations.len();
    let mut successors = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for (i, op) in job.operations.iter().enumerate() {
        for pred in &op.predecessors {
            if let Some(&p) = index.get(pred.as_str()) {
                successors[p].push(i);
                in_degree[i] += 1;
            }
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut removed = 0;
    while let Some(i) = ready.pop() {
        removed += 1;
        for &next in &successors[i] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(next);
            }
        }
    }
    if removed == n {
        return None;
    }

    // Route order keeps the reported operation stable.
    let node = job
        .operations
        .iter()
        .zip(&in_degree)
        .find(|&(_, &d)| d > 0)
        .map(|(op, _)| op.id.as_str())?;
    Some(ValidationError::new(
        ValidationErrorKind::CyclicDependency,
        format!(
            "Circular dependency in job '{}' involving operation '{node}'",
            job.id
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;

    fn sample_groups() -> Vec<MachineGroup> {
        vec![
            MachineGroup::new("MG-STAMP", 2).with_name("Stamping Presses"),
            MachineGroup::new("MG-WELD", 4).with_name("Body-Shop-Welding"),
        ]
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new("J1")
                .with_priority(5)
                .then(Operation::new("O1", "MG-STAMP", 2))
                .then(Operation::new("O2", "MG-WELD", 5)),
            Job::new("J2")
                .with_priority(8)
                .with_operation(Operation::new("O1", "MG-STAMP", 1)),
        ]
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        match result {
            Ok(()) => false,
            Err(errors) => errors.iter().any(|e| e.kind == kind),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_jobs(), &sample_groups()).is_ok());
    }

    #[test]
    fn test_operation_ids_only_unique_within_job() {
        // Both jobs use "O1"; that is allowed.
        let jobs = sample_jobs();
        assert_eq!(jobs[0].operations[0].id, jobs[1].operations[0].id);
        assert!(validate_input(&jobs, &sample_groups()).is_ok());
    }

    #[test]
    fn test_zero_quantity_group_is_valid() {
        let groups = vec![MachineGroup::new("MG-STAMP", 0), MachineGroup::new("MG-WELD", 1)];
        assert!(validate_input(&sample_jobs(), &groups).is_ok());
    }

    #[test]
    fn test_duplicate_job_id() {
        let jobs = vec![
            Job::new("J1").with_operation(Operation::new("O1", "MG-STAMP", 1)),
            Job::new("J1").with_operation(Operation::new("O2", "MG-STAMP", 1)),
        ];
        let errors = validate_input(&jobs, &sample_groups()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("job")));
    }

    #[test]
    fn test_duplicate_group_id() {
        let groups = vec![MachineGroup::single("MG-STAMP"), MachineGroup::single("MG-STAMP")];
        let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "MG-STAMP", 1))];
        let errors = validate_input(&jobs, &groups).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::DuplicateId
            && e.message.contains("machine group")));
    }

    #[test]
    fn test_duplicate_operation_id_within_job() {
        let jobs = vec![Job::new("J1")
            .with_operation(Operation::new("O1", "MG-STAMP", 1))
            .with_operation(Operation::new("O1", "MG-WELD", 1))];
        let errors = validate_input(&jobs, &sample_groups()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("operation")));
    }

    #[test]
    fn test_unknown_machine_group() {
        let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "MG-NOPE", 1))];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::InvalidMachineGroupReference
        ));
    }

    #[test]
    fn test_non_positive_processing_time() {
        for time in [0, -3] {
            let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "MG-STAMP", time))];
            assert!(has_kind(
                validate_input(&jobs, &sample_groups()),
                ValidationErrorKind::NonPositiveProcessingTime
            ));
        }
    }

    #[test]
    fn test_non_positive_priority() {
        let jobs = vec![Job::new("J1")
            .with_priority(0)
            .with_operation(Operation::new("O1", "MG-STAMP", 1))];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::NonPositivePriority
        ));
    }

    #[test]
    fn test_empty_job() {
        let jobs = vec![Job::new("empty")];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::EmptyJob
        ));
    }

    #[test]
    fn test_predecessor_from_other_job_rejected() {
        let jobs = vec![
            Job::new("J1").with_operation(Operation::new("A", "MG-STAMP", 1)),
            Job::new("J2").with_operation(Operation::new("B", "MG-STAMP", 1).with_predecessor("A")),
        ];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::InvalidPredecessor
        ));
    }

    #[test]
    fn test_cyclic_dependency() {
        // O1 → O2 → O3 → O1
        let jobs = vec![Job::new("J1")
            .with_operation(Operation::new("O1", "MG-STAMP", 1).with_predecessor("O3"))
            .with_operation(Operation::new("O2", "MG-STAMP", 1).with_predecessor("O1"))
            .with_operation(Operation::new("O3", "MG-STAMP", 1).with_predecessor("O2"))];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::CyclicDependency
        ));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let jobs = vec![Job::new("J1")
            .with_operation(Operation::new("O1", "MG-STAMP", 1).with_predecessor("O1"))];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::CyclicDependency
        ));
    }

    #[test]
    fn test_diamond_is_acyclic() {
        //   O1
        //  /  \
        // O2  O3
        //  \  /
        //   O4
        let jobs = vec![Job::new("J1")
            .with_operation(Operation::new("O1", "MG-STAMP", 1))
            .with_operation(Operation::new("O2", "MG-WELD", 1).with_predecessor("O1"))
            .with_operation(Operation::new("O3", "MG-WELD", 1).with_predecessor("O1"))
            .with_operation(
                Operation::new("O4", "MG-STAMP", 1)
                    .with_predecessor("O2")
                    .with_predecessor("O3"),
            )];
        assert!(validate_input(&jobs, &sample_groups()).is_ok());
    }

    fn long_chain(len: usize) -> Job {
        (0..len).fold(Job::new("J1"), |job, i| {
            job.then(Operation::new(format!("O{i}"), "MG-STAMP", 1))
        })
    }

    #[test]
    fn test_long_chain_validates_without_recursion() {
        let jobs = vec![long_chain(50_000)];
        assert!(validate_input(&jobs, &sample_groups()).is_ok());
    }

    #[test]
    fn test_cycle_closing_long_chain() {
        let mut job = long_chain(50_000);
        job.operations[0].predecessors.push("O49999".into());
        let errors = validate_input(&[job], &sample_groups()).unwrap_err();
        let cycle = errors
            .iter()
            .find(|e| e.kind == ValidationErrorKind::CyclicDependency)
            .unwrap();
        assert!(cycle.message.contains("'O0'"));
    }

    #[test]
    fn test_huge_priority_overflows_objective() {
        let jobs = vec![
            Job::new("HIGH")
                .with_priority(900_000_000_000_000_000)
                .then(Operation::new("O1", "MG-STAMP", 5)),
            Job::new("LOW").then(Operation::new("O1", "MG-STAMP", 5)),
        ];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::ObjectiveOverflow
        ));
    }

    #[test]
    fn test_large_priority_within_objective_range() {
        // (10^15 + 1) · 10 · 11 + 10 fits in i64.
        let jobs = vec![
            Job::new("HIGH")
                .with_priority(1_000_000_000_000_000)
                .then(Operation::new("O1", "MG-STAMP", 5)),
            Job::new("LOW").then(Operation::new("O1", "MG-STAMP", 5)),
        ];
        assert!(validate_input(&jobs, &sample_groups()).is_ok());
    }

    #[test]
    fn test_huge_processing_time_overflows_objective() {
        let jobs = vec![Job::new("J1").then(Operation::new("O1", "MG-STAMP", i64::MAX))];
        assert!(has_kind(
            validate_input(&jobs, &sample_groups()),
            ValidationErrorKind::ObjectiveOverflow
        ));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let jobs = vec![
            Job::new("empty"),
            Job::new("J1").with_operation(Operation::new("O1", "UNKNOWN", 0)),
        ];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
