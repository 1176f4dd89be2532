//! Scheduling domain models.
//!
//! Input types describe jobs and machine pools; output types describe
//! the placements and KPIs of a solved schedule.
//!
//! # Domain Mappings
//!
//! | u-jobshop | Manufacturing | Healthcare |
//! |-----------|---------------|------------|
//! | Job | Production Order | Patient Case |
//! | Operation | Routing Step | Procedure |
//! | MachineGroup | Department / Work Center | Room Type |
//! | MachineInstance | Machine | Room |
//! | Schedule | Production Plan | OR Schedule |

mod job;
mod machine;
mod schedule;

pub use job::{Job, Operation};
pub use machine::{MachineGroup, MachineInstance};
pub use schedule::{Schedule, ScheduledOperation, Violation, ViolationType};
