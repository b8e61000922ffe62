// src/graph/model.rs

use std::collections::{HashMap, VecDeque};

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::graph::attrs::AttrMap;

/// Handle to a task inside a [`TaskGraph`].
pub type TaskId = NodeIndex;

/// Handle to a dependency edge inside a [`TaskGraph`].
pub type DepId = EdgeIndex;

/// A unit of work. The `Weight` attribute is its execution cost.
#[derive(Debug, Clone)]
pub struct TaskNode {
    pub name: String,
    pub attrs: AttrMap,
}

impl TaskNode {
    pub fn weight(&self) -> i64 {
        self.attrs.weight()
    }
}

/// Resolved task graph.
///
/// Tasks and edges live in a petgraph arena and are addressed by stable
/// handles, so an edge's endpoints and a task's adjacency always name the
/// same underlying entities. Two side indices are kept: task name to
/// handle (names are unique), and ordered endpoint pair to the most
/// recent edge handle for that pair, giving strict-mode duplicate checks
/// O(1) lookups.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    name: String,
    strict: bool,
    graph: DiGraph<TaskNode, AttrMap>,
    by_name: HashMap<String, TaskId>,
    by_pair: HashMap<(TaskId, TaskId), DepId>,
    attrs: AttrMap,
}

impl TaskGraph {
    pub fn new(name: impl Into<String>, strict: bool) -> Self {
        Self {
            name: name.into(),
            strict,
            graph: DiGraph::new(),
            by_name: HashMap::new(),
            by_pair: HashMap::new(),
            attrs: AttrMap::new(),
        }
    }

    /// Graph name from the source, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Graph-level attributes from `graph [...]` statements.
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    pub fn merge_attrs(&mut self, attrs: AttrMap) {
        self.attrs.merge(attrs);
    }

    /// Add a task, or merge attributes into the task already registered
    /// under `name` (later values win per key).
    pub fn add_task(&mut self, name: impl Into<String>, attrs: AttrMap) -> TaskId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            self.graph[id].attrs.merge(attrs);
            return id;
        }
        let id = self.graph.add_node(TaskNode {
            name: name.clone(),
            attrs,
        });
        self.by_name.insert(name, id);
        id
    }

    /// Add a dependency edge from `from` to `to`.
    ///
    /// In a strict graph a second edge for the same ordered pair merges
    /// its attributes into the existing edge instead of creating a new
    /// one. In a non-strict graph every call creates a distinct edge,
    /// parallel edges included.
    pub fn add_dep(&mut self, from: TaskId, to: TaskId, attrs: AttrMap) -> DepId {
        if self.strict {
            if let Some(&existing) = self.by_pair.get(&(from, to)) {
                debug!(
                    from = %self.graph[from].name,
                    to = %self.graph[to].name,
                    "duplicate edge in strict graph; merging attributes"
                );
                self.graph[existing].merge(attrs);
                return existing;
            }
        }
        let id = self.graph.add_edge(from, to, attrs);
        self.by_pair.insert((from, to), id);
        id
    }

    pub fn task(&self, id: TaskId) -> &TaskNode {
        &self.graph[id]
    }

    /// Look up a task handle by name.
    pub fn task_id(&self, name: &str) -> Option<TaskId> {
        self.by_name.get(name).copied()
    }

    /// All task handles in declaration order.
    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> {
        self.graph.node_indices()
    }

    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn dep_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether at least one edge exists for the ordered pair.
    pub fn has_dep(&self, from: TaskId, to: TaskId) -> bool {
        self.by_pair.contains_key(&(from, to))
    }

    /// Incoming edges of `id` in declaration order, each paired with the
    /// predecessor task it comes from. Parallel edges appear once each.
    pub fn predecessors(&self, id: TaskId) -> Vec<(TaskId, DepId)> {
        // petgraph walks adjacency newest-first; reverse to get back to
        // declaration order.
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(id, Direction::Incoming)
            .map(|edge| (edge.source(), edge.id()))
            .collect();
        deps.reverse();
        deps
    }

    /// Outgoing edges of `id` in declaration order, each paired with the
    /// successor task it points at.
    pub fn successors(&self, id: TaskId) -> Vec<(TaskId, DepId)> {
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(id, Direction::Outgoing)
            .map(|edge| (edge.target(), edge.id()))
            .collect();
        deps.reverse();
        deps
    }

    pub fn dep_attrs(&self, id: DepId) -> &AttrMap {
        &self.graph[id]
    }

    /// Communication cost of the edge, paid only when its endpoints run
    /// on different processors.
    pub fn dep_weight(&self, id: DepId) -> i64 {
        self.graph[id].weight()
    }

    pub fn dep_endpoints(&self, id: DepId) -> Option<(TaskId, TaskId)> {
        self.graph.edge_endpoints(id)
    }

    /// Kahn's algorithm over the whole graph.
    ///
    /// Tasks with no predecessor edges are seeded into a FIFO queue in
    /// declaration order; dequeuing a task decrements each successor's
    /// remaining in-degree (parallel edges count individually) and
    /// enqueues it once that reaches zero. Ties among simultaneously
    /// ready tasks therefore resolve first-discovered-first.
    ///
    /// If the graph contains a cycle the returned order is shorter than
    /// [`TaskGraph::task_count`]; the cycle members never reach in-degree
    /// zero. Callers detect cycles by comparing lengths.
    pub fn topological_order(&self) -> Vec<TaskId> {
        let mut order = Vec::with_capacity(self.task_count());
        let mut in_degree: HashMap<TaskId, usize> = HashMap::new();
        let mut ready = VecDeque::new();

        for id in self.graph.node_indices() {
            let incoming = self
                .graph
                .edges_directed(id, Direction::Incoming)
                .count();
            if incoming == 0 {
                ready.push_back(id);
            } else {
                in_degree.insert(id, incoming);
            }
        }

        while let Some(id) = ready.pop_front() {
            order.push(id);

            for (succ, _) in self.successors(id) {
                if let Some(remaining) = in_degree.get_mut(&succ) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        in_degree.remove(&succ);
                        ready.push_back(succ);
                    }
                }
            }
        }

        debug!(
            ordered = order.len(),
            total = self.task_count(),
            "computed topological order"
        );

        order
    }
}
