//! Dependency graph builder using petgraph.
//!
//! This module builds the adjacency structure for one project snapshot.
//! Edges run dependency -> dependent so that forward traversal follows
//! the order in which work can actually happen.

use crate::{Error, GraphTask, Result};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// A node in the dependency graph.
#[derive(Debug, Clone)]
pub struct GraphNode<T> {
    /// Id of the task.
    pub id: String,
    /// The task data as supplied by the caller.
    pub task: T,
    /// Estimated duration in hours, clamped to a finite non-negative value.
    pub weight: f64,
    /// Direct dependency ids that resolved to known tasks, in declaration
    /// order with duplicates removed. Stale references are omitted here
    /// and recorded separately on the graph.
    pub dependencies: Vec<String>,
}

/// Dependency graph for one project's task snapshot.
///
/// The graph is an immutable derived structure: building it never fails
/// and never mutates the input. Stale dependency ids (references to tasks
/// not present in the snapshot) are skipped for edge purposes and kept
/// available through [`DependencyGraph::dangling_references`].
pub struct DependencyGraph<T: GraphTask> {
    /// The directed graph, edges dependency -> dependent.
    graph: DiGraph<GraphNode<T>, ()>,
    /// Map from task ids to node indices.
    id_to_node: HashMap<String, NodeIndex>,
    /// `(task, dependency)` pairs whose dependency did not resolve.
    dangling: Vec<(String, String)>,
}

impl<T: GraphTask> DependencyGraph<T> {
    /// Build the graph from a flat task snapshot.
    ///
    /// If two records share an id, the first one wins; callers are
    /// expected to de-duplicate upstream. Self-dependencies become real
    /// self-edges so that cycle detection sees them.
    #[must_use]
    pub fn from_tasks(tasks: &[T]) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_node: HashMap<String, NodeIndex> = HashMap::new();

        for task in tasks {
            if id_to_node.contains_key(task.id()) {
                debug!("Duplicate task id '{}', keeping first record", task.id());
                continue;
            }
            let node = GraphNode {
                id: task.id().to_string(),
                task: task.clone(),
                weight: clamp_weight(task.weight()),
                dependencies: Vec::new(),
            };
            let index = graph.add_node(node);
            id_to_node.insert(task.id().to_string(), index);
        }

        // Resolve edges once every node exists.
        let mut dangling = Vec::new();
        let mut edges_to_add = Vec::new();
        for index in graph.node_indices() {
            let node = &graph[index];
            let mut seen = HashSet::new();
            let mut resolved = Vec::new();
            for dep_id in node.task.dependency_ids() {
                if !seen.insert(dep_id.to_string()) {
                    continue;
                }
                if let Some(&dep_index) = id_to_node.get(dep_id) {
                    resolved.push(dep_id.to_string());
                    edges_to_add.push((dep_index, index));
                } else {
                    debug!(
                        "Task '{}' references unknown dependency '{}', skipping edge",
                        node.id, dep_id
                    );
                    dangling.push((node.id.clone(), dep_id.to_string()));
                }
            }
            graph[index].dependencies = resolved;
        }
        for (from, to) in edges_to_add {
            graph.add_edge(from, to, ());
        }

        debug!(
            "Built dependency graph: {} tasks, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self {
            graph,
            id_to_node,
            dangling,
        }
    }

    /// Get the number of tasks in the graph.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Check whether the graph holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check if a task exists in the graph.
    #[must_use]
    pub fn contains_task(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// Get a reference to a task node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode<T>> {
        self.id_to_node
            .get(id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    /// Iterate over all nodes in snapshot order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &GraphNode<T>> {
        self.graph.node_indices().map(|index| &self.graph[index])
    }

    /// Ids of the tasks that directly depend on `id`.
    #[must_use]
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        let Some(&index) = self.id_to_node.get(id) else {
            return Vec::new();
        };
        let mut dependents: Vec<&str> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .map(|dep_index| self.graph[dep_index].id.as_str())
            .collect();
        // petgraph yields neighbors in reverse insertion order
        dependents.reverse();
        dependents
    }

    /// `(task, dependency)` pairs whose dependency id resolved to no task
    /// in the snapshot. These are tolerated for analysis purposes but
    /// surfaced so the caller can report stale data.
    #[must_use]
    pub fn dangling_references(&self) -> &[(String, String)] {
        &self.dangling
    }

    /// Get a topological ordering of task ids, dependencies first.
    ///
    /// This is the strict variant for callers that treat a cyclic graph
    /// as a hard failure; analysis entry points report cycles as values
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the graph contains a cycle.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        match self.kahn() {
            Ok(order) => Ok(order
                .into_iter()
                .map(|index| self.graph[index].id.clone())
                .collect()),
            Err(stuck) => Err(Error::CycleDetected {
                cycle: stuck
                    .into_iter()
                    .map(|index| self.graph[index].id.clone())
                    .collect(),
            }),
        }
    }

    /// Kahn's algorithm over in-degree counts.
    ///
    /// Returns the full ordering, or the nodes left with unmet in-degree
    /// when a cycle prevents the sort from consuming everything.
    pub(crate) fn kahn(&self) -> std::result::Result<Vec<NodeIndex>, Vec<NodeIndex>> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|index| {
                (
                    index,
                    self.graph
                        .neighbors_directed(index, Direction::Incoming)
                        .count(),
                )
            })
            .collect();

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|index| in_degree[index] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(index) = queue.pop_front() {
            order.push(index);
            for dependent in self.graph.neighbors_directed(index, Direction::Outgoing) {
                if let Some(remaining) = in_degree.get_mut(&dependent) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if order.len() == self.graph.node_count() {
            Ok(order)
        } else {
            let stuck: Vec<NodeIndex> = self
                .graph
                .node_indices()
                .filter(|index| in_degree[index] > 0)
                .collect();
            Err(stuck)
        }
    }

    pub(crate) fn inner(&self) -> &DiGraph<GraphNode<T>, ()> {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }
}

/// Clamp an estimated duration to a usable weight. Negative and
/// non-finite inputs count as zero rather than poisoning the sums.
fn clamp_weight(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}
