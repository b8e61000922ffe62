// src/sched/scheduler.rs

//! Greedy list scheduling over a topological order.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{Result, SchedagError};
use crate::graph::{TaskGraph, TaskId};
use crate::sched::schedule::Schedule;

/// Greedy list scheduler over a validated task graph.
///
/// Construction computes the topological order once and rejects cyclic
/// graphs immediately; a scheduler that exists can always produce a
/// schedule.
pub struct Scheduler<'g> {
    graph: &'g TaskGraph,
    processors: usize,
    topo_order: Vec<TaskId>,
}

impl<'g> Scheduler<'g> {
    /// Set up a scheduler for `processors` identical processors.
    ///
    /// Fails when `processors` is zero or when the graph contains a
    /// cycle.
    pub fn new(graph: &'g TaskGraph, processors: usize) -> Result<Self> {
        if processors == 0 {
            return Err(SchedagError::InvalidProcessorCount(processors));
        }

        let topo_order = graph.topological_order();
        if topo_order.len() != graph.task_count() {
            return Err(SchedagError::GraphCycle(cycle_member(graph, &topo_order)));
        }

        Ok(Self {
            graph,
            processors,
            topo_order,
        })
    }

    /// Tasks in the order they will be considered.
    pub fn topological_order(&self) -> &[TaskId] {
        &self.topo_order
    }

    /// Assign every task to a processor and a start time.
    ///
    /// Tasks are visited strictly in topological order, so every
    /// predecessor is committed before its dependents are considered.
    /// Each task goes to the processor with the minimum earliest start
    /// time; ties keep the lowest processor index, so processor 0 is
    /// displaced only by a strictly smaller start time.
    pub fn list_schedule(&self) -> Result<Schedule> {
        let mut schedule = Schedule::new(self.processors);

        for &task in &self.topo_order {
            let mut best_proc = 0;
            let mut best_start = schedule.earliest_start_time(self.graph, 0, task);

            for processor in 1..self.processors {
                let start = schedule.earliest_start_time(self.graph, processor, task);
                let better = match (start, best_start) {
                    (Some(start), Some(best)) => start < best,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if better {
                    best_proc = processor;
                    best_start = start;
                }
            }

            // Unreachable under topological traversal; kept as a hard
            // error rather than a silent skip.
            let Some(start) = best_start else {
                return Err(SchedagError::Unschedulable(
                    self.graph.task(task).name.clone(),
                ));
            };

            debug!(
                task = %self.graph.task(task).name,
                processor = best_proc,
                start,
                "committed task"
            );
            schedule.assign(self.graph, best_proc, task, start);
        }

        Ok(schedule)
    }
}

/// Name of a task lying on a directed cycle.
///
/// A task the topological pass never released keeps at least one
/// unreleased predecessor, so walking unreleased predecessors from the
/// first unreleased task in declaration order must revisit some task;
/// the revisited task is on a cycle. Tasks that are merely downstream
/// of a cycle get walked through, never reported.
fn cycle_member(graph: &TaskGraph, order: &[TaskId]) -> String {
    let ordered: HashSet<TaskId> = order.iter().copied().collect();
    let Some(start) = graph.task_ids().find(|id| !ordered.contains(id)) else {
        return String::new();
    };

    let mut seen = HashSet::new();
    let mut current = start;
    while seen.insert(current) {
        let Some((pred, _)) = graph
            .predecessors(current)
            .into_iter()
            .find(|(pred, _)| !ordered.contains(pred))
        else {
            break;
        };
        current = pred;
    }
    graph.task(current).name.clone()
}
