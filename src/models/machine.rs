//! Machine group (resource pool) model.
//!
//! A machine group is a named pool of interchangeable machine instances.
//! Operations request one unit of a group; the scheduler decides which
//! instance serves them.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pool of identical machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineGroup {
    /// Unique group identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Number of interchangeable instances (0 = currently unavailable).
    pub quantity: u32,
}

impl MachineGroup {
    /// Creates a group with the given number of instances.
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            quantity,
        }
    }

    /// Creates a single-machine group.
    pub fn single(id: impl Into<String>) -> Self {
        Self::new(id, 1)
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the group currently has no instances.
    pub fn is_unavailable(&self) -> bool {
        self.quantity == 0
    }

    /// Enumerates the group's instances (`0..quantity`).
    pub fn instances(&self) -> impl Iterator<Item = MachineInstance> + '_ {
        (0..self.quantity).map(move |index| MachineInstance::new(self.id.clone(), index))
    }
}

/// One concrete machine of a group. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineInstance {
    /// Owning group.
    pub group_id: String,
    /// Position within the group, `0..quantity`.
    pub index: u32,
}

impl MachineInstance {
    /// Creates an instance reference.
    pub fn new(group_id: impl Into<String>, index: u32) -> Self {
        Self {
            group_id: group_id.into(),
            index,
        }
    }

    /// Stable identifier, `"{group_id}-{index}"`.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MachineInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.group_id, self.index)
    }
}
