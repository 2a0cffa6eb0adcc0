//! Cycle detection over the dependency graph.
//!
//! A cyclic dependency chain is expected user data (it can be configured
//! from the board UI), so detection reports a value rather than failing.
//! The walk is an iterative white/gray/black depth-first search; reaching
//! a gray node means an ancestor of the current walk is reachable again.

use crate::{DependencyGraph, GraphTask};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::debug;

/// Result of cycle detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Whether the dependency graph contains at least one cycle.
    pub has_cycle: bool,
    /// One witness cycle in walk order, empty when the graph is acyclic.
    /// Which cycle is reported is deterministic for a given snapshot but
    /// is otherwise unspecified when several exist.
    pub cycle: Vec<String>,
}

impl CycleReport {
    fn acyclic() -> Self {
        Self {
            has_cycle: false,
            cycle: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Detect whether the graph contains a dependency cycle.
///
/// Every node is tried as a fresh root so that disconnected cyclic
/// islands are found too. Runs in O(V + E) and terminates on any graph
/// shape, cyclic ones included.
#[must_use]
pub fn detect<T: GraphTask>(graph: &DependencyGraph<T>) -> CycleReport {
    let inner = graph.inner();
    let mut marks = vec![Mark::White; inner.node_count()];

    for root in inner.node_indices() {
        if marks[root.index()] != Mark::White {
            continue;
        }

        // Explicit stack of (node, pending successors, cursor); the gray
        // path doubles as the witness when a back edge shows up.
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();
        let mut path: Vec<NodeIndex> = Vec::new();

        marks[root.index()] = Mark::Gray;
        stack.push((root, successors(graph, root), 0));
        path.push(root);

        while let Some((_, succs, cursor)) = stack.last_mut() {
            if let Some(&next) = succs.get(*cursor) {
                *cursor += 1;
                match marks[next.index()] {
                    Mark::White => {
                        marks[next.index()] = Mark::Gray;
                        stack.push((next, successors(graph, next), 0));
                        path.push(next);
                    }
                    Mark::Gray => {
                        let witness = witness_cycle(graph, &path, next);
                        debug!("Dependency cycle found: {}", witness.join(" -> "));
                        return CycleReport {
                            has_cycle: true,
                            cycle: witness,
                        };
                    }
                    Mark::Black => {}
                }
            } else {
                let (done, _, _) = stack.pop().unwrap_or((root, Vec::new(), 0));
                marks[done.index()] = Mark::Black;
                path.pop();
            }
        }
    }

    CycleReport::acyclic()
}

/// Successors of a node in deterministic order.
fn successors<T: GraphTask>(graph: &DependencyGraph<T>, index: NodeIndex) -> Vec<NodeIndex> {
    let mut next: Vec<NodeIndex> = graph
        .inner()
        .neighbors_directed(index, Direction::Outgoing)
        .collect();
    // petgraph yields neighbors in reverse insertion order
    next.reverse();
    next
}

/// Slice the gray path from the first occurrence of `entry` to the top.
fn witness_cycle<T: GraphTask>(
    graph: &DependencyGraph<T>,
    path: &[NodeIndex],
    entry: NodeIndex,
) -> Vec<String> {
    let start = path.iter().position(|&n| n == entry).unwrap_or(0);
    path[start..]
        .iter()
        .map(|&n| graph.inner()[n].id.clone())
        .collect()
}
