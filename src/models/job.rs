//! Job and operation models.
//!
//! A job is an ordered chain of operations. Each operation needs one unit
//! of capacity from a machine group for a fixed processing time, and may
//! list predecessors from the same job.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

/// A job (production order) to be scheduled.
///
/// # Time Representation
/// Processing times are integer time units relative to t=0.
/// The consumer defines what a unit means (minutes, shifts, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Business priority (positive, higher = more urgent).
    pub priority: i64,
    /// Operations in route order.
    #[serde(alias = "operation_list")]
    pub operations: Vec<Operation>,
}

impl Job {
    /// Creates a new job with priority 1 and no operations.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            priority: 1,
            operations: Vec::new(),
        }
    }

    /// Sets the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Adds an operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Appends an operation that follows the current last operation.
    ///
    /// Shorthand for building simple routes without spelling out predecessors.
    pub fn then(self, operation: Operation) -> Self {
        let operation = match self.operations.last() {
            Some(prev) => operation.with_predecessor(prev.id.clone()),
            None => operation,
        };
        self.with_operation(operation)
    }

    /// Sum of processing times of all operations.
    pub fn total_processing_time(&self) -> i64 {
        self.operations.iter().map(|o| o.processing_time).sum()
    }

    /// Finds an operation by ID.
    pub fn operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.id == operation_id)
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}

/// A single processing step of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Identifier, unique within the owning job.
    pub id: String,
    /// Machine group that must supply one instance.
    pub machine_group_id: String,
    /// Processing time in time units (positive).
    pub processing_time: i64,
    /// IDs of operations of the same job that must finish first.
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl Operation {
    /// Creates an operation on a machine group.
    pub fn new(
        id: impl Into<String>,
        machine_group_id: impl Into<String>,
        processing_time: i64,
    ) -> Self {
        Self {
            id: id.into(),
            machine_group_id: machine_group_id.into(),
            processing_time,
            predecessors: Vec::new(),
        }
    }

    /// Adds a predecessor operation ID.
    pub fn with_predecessor(mut self, predecessor_id: impl Into<String>) -> Self {
        self.predecessors.push(predecessor_id.into());
        self
    }
}
