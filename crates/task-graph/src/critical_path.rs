//! Critical path computation over an acyclic dependency graph.
//!
//! The critical path is the longest-duration chain of dependent tasks;
//! it is the minimum possible completion time under pure precedence
//! constraints. Computation is a dynamic program over a topological
//! order: each node's best value is its own weight plus the best value
//! among its direct dependencies, with a back-pointer kept for path
//! reconstruction.

use crate::{DependencyGraph, GraphTask};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// The critical path through an acyclic graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPath {
    /// Task ids along the path, source to sink.
    pub path: Vec<String>,
    /// Sum of the estimated hours along the path.
    pub total_hours: f64,
}

/// Result of critical path analysis.
///
/// A cyclic graph is a reportable data state, so it is a variant here
/// rather than an error; callers branch on it the same way they branch
/// on a [`crate::CycleReport`].
#[derive(Debug, Clone, PartialEq)]
pub enum CriticalPathAnalysis {
    /// The graph contains a cycle; no path can be computed. Carries the
    /// ids of the tasks the topological sort could not consume, every
    /// one of which sits on or downstream of a cycle.
    Cycle {
        /// Unconsumable task ids, in snapshot order.
        stuck: Vec<String>,
    },
    /// The graph is acyclic and the critical path was computed.
    Acyclic(CriticalPath),
}

impl CriticalPathAnalysis {
    /// Whether the analysis hit a cycle.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        matches!(self, Self::Cycle { .. })
    }
}

/// Compute the critical path of the graph.
///
/// The sort itself doubles as a cycle guard: when it cannot consume
/// every node the cycle variant is returned, so this function never
/// loops or panics on cyclic input even if the caller skipped
/// [`crate::cycle::detect`]. An empty graph yields an empty path with
/// zero hours.
///
/// Tie-break policy: when several predecessor paths have equal duration,
/// the first dependency in the task's declaration order wins; when
/// several end nodes have equal totals, the earliest task in snapshot
/// order wins. The result is therefore a pure function of the snapshot.
#[must_use]
pub fn analyze<T: GraphTask>(graph: &DependencyGraph<T>) -> CriticalPathAnalysis {
    let order = match graph.kahn() {
        Ok(order) => order,
        Err(stuck) => {
            debug!("Critical path skipped: {} tasks stuck on a cycle", stuck.len());
            return CriticalPathAnalysis::Cycle {
                stuck: stuck
                    .into_iter()
                    .map(|index| graph.inner()[index].id.clone())
                    .collect(),
            };
        }
    };

    if order.is_empty() {
        return CriticalPathAnalysis::Acyclic(CriticalPath {
            path: Vec::new(),
            total_hours: 0.0,
        });
    }

    // Longest path ending at each node, with the dependency that
    // produced it. Strict comparison keeps the first dependency in
    // declaration order on ties.
    let mut best: HashMap<NodeIndex, f64> = HashMap::with_capacity(order.len());
    let mut back: HashMap<NodeIndex, NodeIndex> = HashMap::new();

    for &index in &order {
        let node = &graph.inner()[index];
        let mut through: f64 = 0.0;
        let mut chosen: Option<NodeIndex> = None;
        for dep_id in &node.dependencies {
            if let Some(dep_index) = graph.index_of(dep_id) {
                let dep_best = best.get(&dep_index).copied().unwrap_or(0.0);
                if chosen.is_none() || dep_best > through {
                    through = dep_best;
                    chosen = Some(dep_index);
                }
            }
        }
        best.insert(index, node.weight + through);
        if let Some(dep_index) = chosen {
            back.insert(index, dep_index);
        }
    }

    // Earliest snapshot-order node among the maxima becomes the sink.
    let mut end: Option<(NodeIndex, f64)> = None;
    for index in graph.inner().node_indices() {
        let value = best.get(&index).copied().unwrap_or(0.0);
        match end {
            Some((_, current)) if value <= current => {}
            _ => end = Some((index, value)),
        }
    }

    let Some((sink, total_hours)) = end else {
        return CriticalPathAnalysis::Acyclic(CriticalPath {
            path: Vec::new(),
            total_hours: 0.0,
        });
    };

    // Walk back-pointers from the sink, then flip to source -> sink.
    let mut path_indices = vec![sink];
    let mut cursor = sink;
    while let Some(&prev) = back.get(&cursor) {
        path_indices.push(prev);
        cursor = prev;
    }
    path_indices.reverse();

    let path: Vec<String> = path_indices
        .into_iter()
        .map(|index| graph.inner()[index].id.clone())
        .collect();

    debug!(
        "Critical path: {} tasks, {} hours",
        path.len(),
        total_hours
    );

    CriticalPathAnalysis::Acyclic(CriticalPath { path, total_hours })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[derive(Clone, Debug)]
    struct TestTask {
        id: String,
        hours: f64,
        deps: Vec<String>,
    }

    impl TestTask {
        fn new(id: &str, hours: f64, deps: &[&str]) -> Self {
            Self {
                id: id.to_string(),
                hours,
                deps: deps.iter().map(|s| (*s).to_string()).collect(),
            }
        }
    }

    impl GraphTask for TestTask {
        fn id(&self) -> &str {
            &self.id
        }

        fn dependency_ids(&self) -> impl Iterator<Item = &str> {
            self.deps.iter().map(String::as_str)
        }

        fn weight(&self) -> f64 {
            self.hours
        }
    }

    fn run(tasks: &[TestTask]) -> CriticalPathAnalysis {
        analyze(&DependencyGraph::from_tasks(tasks))
    }

    fn expect_path(analysis: &CriticalPathAnalysis) -> &CriticalPath {
        match analysis {
            CriticalPathAnalysis::Acyclic(path) => path,
            CriticalPathAnalysis::Cycle { stuck } => {
                panic!("expected acyclic analysis, got cycle with {stuck:?}")
            }
        }
    }

    #[test]
    fn test_empty_snapshot_yields_zero() {
        let analysis = run(&[]);
        let path = expect_path(&analysis);
        assert!(path.path.is_empty());
        assert_eq!(path.total_hours, 0.0);
    }

    #[test]
    fn test_single_chain_sums_hours() {
        // A(5) -> B(10) -> C(3) must total 18 along [A, B, C].
        let tasks = vec![
            TestTask::new("a", 5.0, &[]),
            TestTask::new("b", 10.0, &["a"]),
            TestTask::new("c", 3.0, &["b"]),
        ];
        let analysis = run(&tasks);
        let path = expect_path(&analysis);
        assert_eq!(path.path, vec!["a", "b", "c"]);
        assert_eq!(path.total_hours, 18.0);
    }

    #[test]
    fn test_longer_branch_wins() {
        // a(5) and b(20) both feed c(3); the path must route through b.
        let tasks = vec![
            TestTask::new("a", 5.0, &[]),
            TestTask::new("b", 20.0, &[]),
            TestTask::new("c", 3.0, &["a", "b"]),
        ];
        let analysis = run(&tasks);
        let path = expect_path(&analysis);
        assert_eq!(path.path, vec!["b", "c"]);
        assert_eq!(path.total_hours, 23.0);
    }

    #[test]
    fn test_tie_breaks_on_first_declared_dependency() {
        // Both branches cost 4; "first" is declared before "second" on
        // the sink, so the path must route through "first".
        let tasks = vec![
            TestTask::new("first", 4.0, &[]),
            TestTask::new("second", 4.0, &[]),
            TestTask::new("sink", 1.0, &["first", "second"]),
        ];
        let analysis = run(&tasks);
        let path = expect_path(&analysis);
        assert_eq!(path.path, vec!["first", "sink"]);
        assert_eq!(path.total_hours, 5.0);
    }

    #[test]
    fn test_cycle_returns_cycle_variant() {
        let tasks = vec![
            TestTask::new("a", 1.0, &["b"]),
            TestTask::new("b", 1.0, &["a"]),
        ];
        assert!(run(&tasks).has_cycle());
    }

    #[test]
    fn test_partial_cycle_reports_stuck_tasks() {
        let tasks = vec![
            TestTask::new("free", 1.0, &[]),
            TestTask::new("x", 1.0, &["y"]),
            TestTask::new("y", 1.0, &["x"]),
        ];
        match run(&tasks) {
            CriticalPathAnalysis::Cycle { stuck } => {
                assert_eq!(stuck, vec!["x", "y"]);
            }
            CriticalPathAnalysis::Acyclic(_) => panic!("expected cycle"),
        }
    }

    #[test]
    fn test_dangling_dependency_counts_as_satisfied() {
        let tasks = vec![
            TestTask::new("a", 2.0, &["deleted"]),
            TestTask::new("b", 3.0, &["a"]),
        ];
        let analysis = run(&tasks);
        let path = expect_path(&analysis);
        assert_eq!(path.path, vec!["a", "b"]);
        assert_eq!(path.total_hours, 5.0);
    }

    #[test]
    fn test_zero_weight_nodes_still_form_a_path() {
        let tasks = vec![
            TestTask::new("a", 0.0, &[]),
            TestTask::new("b", 0.0, &["a"]),
        ];
        let analysis = run(&tasks);
        let path = expect_path(&analysis);
        assert_eq!(path.total_hours, 0.0);
        assert!(!path.path.is_empty());
    }

    #[test]
    fn test_isolated_heavy_node_is_its_own_path() {
        let tasks = vec![
            TestTask::new("light1", 1.0, &[]),
            TestTask::new("light2", 2.0, &["light1"]),
            TestTask::new("heavy", 40.0, &[]),
        ];
        let analysis = run(&tasks);
        let path = expect_path(&analysis);
        assert_eq!(path.path, vec!["heavy"]);
        assert_eq!(path.total_hours, 40.0);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let tasks = vec![
            TestTask::new("a", 5.0, &[]),
            TestTask::new("b", 5.0, &[]),
            TestTask::new("c", 2.0, &["a", "b"]),
            TestTask::new("d", 1.0, &["c"]),
        ];
        let first = run(&tasks);
        let second = run(&tasks);
        assert_eq!(first, second);
    }
}
