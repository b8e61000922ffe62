// src/sched/mod.rs

//! Scheduling engine.
//!
//! - [`schedule`] holds per-processor timelines, the assignment table
//!   and report rendering.
//! - [`scheduler`] validates the graph and drives greedy list
//!   scheduling over a topological order.

pub mod schedule;
pub mod scheduler;

pub use schedule::{Assignment, Schedule, ScheduleReport, ScheduleRow};
pub use scheduler::Scheduler;
