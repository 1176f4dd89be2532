//! Schedule quality metrics (KPIs).
//!
//! Computes performance indicators purely from scheduled operations.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest end time |
//! | Utilization | Busy time / makespan, per machine instance with work |
//! | Avg Flow Time | Mean over jobs of (last end − first start) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::BTreeMap;

use crate::models::ScheduledOperation;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Latest end time.
    pub makespan: i64,
    /// Utilization per machine instance ID (0.0..1.0).
    ///
    /// Only instances with at least one operation appear.
    pub utilization_by_instance: BTreeMap<String, f64>,
    /// Mean flow time over jobs.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from scheduled operations.
    pub fn calculate(operations: &[ScheduledOperation]) -> Self {
        let makespan = operations.iter().map(|o| o.end_time).max().unwrap_or(0);

        let mut busy: BTreeMap<&str, i64> = BTreeMap::new();
        let mut spans: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for op in operations {
            *busy.entry(op.machine_instance_id.as_str()).or_insert(0) += op.duration();

            spans
                .entry(op.job_id.as_str())
                .and_modify(|(first, last)| {
                    *first = (*first).min(op.start_time);
                    *last = (*last).max(op.end_time);
                })
                .or_insert((op.start_time, op.end_time));
        }

        // Busy time / makespan
        let utilization_by_instance: BTreeMap<String, f64> = busy
            .into_iter()
            .map(|(id, time)| {
                let u = if makespan > 0 {
                    time as f64 / makespan as f64
                } else {
                    0.0
                };
                (id.to_string(), u)
            })
            .collect();

        let avg_flow_time = if spans.is_empty() {
            0.0
        } else {
            let total: i64 = spans.values().map(|(first, last)| last - first).sum();
            total as f64 / spans.len() as f64
        };

        Self {
            makespan,
            utilization_by_instance,
            avg_flow_time,
        }
    }
}
