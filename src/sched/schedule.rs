// src/sched/schedule.rs

//! Per-processor timelines and the task assignment table.
//!
//! A [`Schedule`] is created once per scheduling run with a fixed
//! processor count, filled in one task at a time by the scheduler, and
//! read-only afterwards for reporting.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::{Result, SchedagError};
use crate::graph::{TaskGraph, TaskId};

/// Committed placement of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// 0-based processor index.
    pub processor: usize,
    pub start: i64,
    pub finish: i64,
}

/// One row of the machine-readable schedule report.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub task: String,
    pub weight: i64,
    /// 1-based, matching the text rendering.
    pub processor: usize,
    pub start: i64,
    pub finish: i64,
    pub depends_on: Vec<String>,
}

/// Machine-readable schedule report.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub processors: usize,
    pub makespan: i64,
    pub tasks: Vec<ScheduleRow>,
}

/// Mutable scheduling state: one free-time cursor per processor plus the
/// assignment table.
#[derive(Debug, Clone)]
pub struct Schedule {
    cursors: Vec<i64>,
    assignments: HashMap<TaskId, Assignment>,
    /// Commit order, for stable reporting.
    commits: Vec<TaskId>,
}

impl Schedule {
    pub fn new(processors: usize) -> Self {
        Self {
            cursors: vec![0; processors],
            assignments: HashMap::new(),
            commits: Vec::new(),
        }
    }

    pub fn processors(&self) -> usize {
        self.cursors.len()
    }

    /// Free-time cursor of one processor: the finish time of the last
    /// task committed to it, 0 if none.
    pub fn cursor(&self, processor: usize) -> i64 {
        self.cursors[processor]
    }

    pub fn assignment(&self, task: TaskId) -> Option<Assignment> {
        self.assignments.get(&task).copied()
    }

    /// Committed tasks in commit order.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> {
        self.commits.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Finish time of the busiest processor.
    pub fn makespan(&self) -> i64 {
        self.cursors.iter().copied().max().unwrap_or(0)
    }

    /// Earliest time `task` could start on `processor`.
    ///
    /// Bounded below by the processor's free-time cursor and by each
    /// predecessor's finish time, increased by the edge's communication
    /// weight when the predecessor sits on a different processor.
    /// Returns `None` when some predecessor has no assignment yet; that
    /// is a sentinel, not a time.
    pub fn earliest_start_time(
        &self,
        graph: &TaskGraph,
        processor: usize,
        task: TaskId,
    ) -> Option<i64> {
        let mut start = self.cursors[processor];

        for (pred, dep) in graph.predecessors(task) {
            let assignment = self.assignment(pred)?;
            let mut available = assignment.finish;
            if assignment.processor != processor {
                available += graph.dep_weight(dep);
            }
            start = start.max(available);
        }

        Some(start)
    }

    /// Commit `task` to `processor` at `start`, advancing the processor's
    /// cursor to the task's finish time.
    pub fn assign(&mut self, graph: &TaskGraph, processor: usize, task: TaskId, start: i64) {
        let finish = start + graph.task(task).weight();
        self.cursors[processor] = finish;

        let assignment = Assignment {
            processor,
            start,
            finish,
        };
        if self.assignments.insert(task, assignment).is_none() {
            self.commits.push(task);
        }
    }

    /// Commit `task` to `processor` at that processor's earliest start
    /// time. Fails when a predecessor of `task` is still unassigned.
    pub fn assign_earliest(
        &mut self,
        graph: &TaskGraph,
        processor: usize,
        task: TaskId,
    ) -> Result<()> {
        let Some(start) = self.earliest_start_time(graph, processor, task) else {
            return Err(SchedagError::Unschedulable(graph.task(task).name.clone()));
        };
        self.assign(graph, processor, task, start);
        Ok(())
    }

    /// Human-readable rendering, one line per task in commit order.
    pub fn render(&self, graph: &TaskGraph) -> String {
        let mut out = format!("Number of processors: {}\n", self.processors());

        for task in self.tasks() {
            let Some(assignment) = self.assignment(task) else {
                continue;
            };
            let node = graph.task(task);

            let preds = graph.predecessors(task);
            let depends = if preds.is_empty() {
                String::new()
            } else {
                let names: Vec<&str> = preds
                    .iter()
                    .map(|&(pred, _)| graph.task(pred).name.as_str())
                    .collect();
                format!(" [Depends on {{{}}}]", names.join(", "))
            };

            out.push_str(&format!(
                "{} (Weight={}) scheduled on processor {} at time {}{}\n",
                node.name,
                node.weight(),
                assignment.processor + 1,
                assignment.start,
                depends
            ));
        }

        out
    }

    /// Report rows in commit order, for JSON output.
    pub fn report(&self, graph: &TaskGraph) -> ScheduleReport {
        let mut rows = Vec::with_capacity(self.len());

        for task in self.tasks() {
            let Some(assignment) = self.assignment(task) else {
                continue;
            };
            let node = graph.task(task);

            let depends_on = graph
                .predecessors(task)
                .iter()
                .map(|&(pred, _)| graph.task(pred).name.clone())
                .collect();

            rows.push(ScheduleRow {
                task: node.name.clone(),
                weight: node.weight(),
                processor: assignment.processor + 1,
                start: assignment.start,
                finish: assignment.finish,
                depends_on,
            });
        }

        ScheduleReport {
            processors: self.processors(),
            makespan: self.makespan(),
            tasks: rows,
        }
    }
}
