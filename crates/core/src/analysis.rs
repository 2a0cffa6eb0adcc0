//! Project-wide dependency analysis.
//!
//! This is the entry point behind the project "Dependencies" view: one
//! call per snapshot, cycle detection first (cheap), critical path only
//! when the graph is clean. The report carries titles and statuses per
//! path step so the web layer can render it without a second lookup.

use crate::{TaskRecord, TaskStatus};
use serde::Serialize;
use tracing::debug;
use worklane_task_graph::{CriticalPathAnalysis, DependencyGraph, critical_path, cycle};

/// One step of the critical path, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    /// Task id.
    pub id: String,
    /// Display title as supplied in the snapshot.
    pub title: String,
    /// Estimated hours after clamping, as summed into the total.
    pub estimated_hours: f64,
    /// Status at snapshot time, for the badge.
    pub status: TaskStatus,
}

/// Dependency analysis report for one project snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyReport {
    /// Whether the dependency graph contains a cycle. When true, `path`
    /// is empty and `total_hours` is zero.
    pub has_cycle: bool,
    /// One witness cycle, for the "cycle detected" banner.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<String>,
    /// Critical path, source to sink.
    pub path: Vec<PathStep>,
    /// Total estimated hours along the path.
    pub total_hours: f64,
    /// Dependency ids that resolved to no task in the snapshot. These
    /// are skipped for analysis but surfaced so stale references can be
    /// cleaned up.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl DependencyReport {
    fn cyclic(cycle: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            has_cycle: true,
            cycle,
            path: Vec::new(),
            total_hours: 0.0,
            warnings,
        }
    }
}

/// Analyze one project's task snapshot.
///
/// Pure function of the snapshot: no caching, no stored state, same
/// input gives the identical report. Cycles and stale references are
/// reportable data states, never errors.
#[must_use]
pub fn analyze_project(tasks: &[TaskRecord]) -> DependencyReport {
    debug!("Analyzing dependency graph for {} tasks", tasks.len());
    let graph = DependencyGraph::from_tasks(tasks);
    let warnings = stale_dependency_ids(&graph);

    let report = cycle::detect(&graph);
    if report.has_cycle {
        return DependencyReport::cyclic(report.cycle, warnings);
    }

    match critical_path::analyze(&graph) {
        // The detector just cleared the graph; this arm is kept so a
        // disagreement between the two walks can never panic the caller.
        CriticalPathAnalysis::Cycle { stuck } => DependencyReport::cyclic(stuck, warnings),
        CriticalPathAnalysis::Acyclic(found) => {
            let path = found
                .path
                .iter()
                .filter_map(|id| graph.node(id))
                .map(|node| PathStep {
                    id: node.id.clone(),
                    title: node.task.title.clone(),
                    estimated_hours: node.weight,
                    status: node.task.status,
                })
                .collect();
            DependencyReport {
                has_cycle: false,
                cycle: Vec::new(),
                path,
                total_hours: found.total_hours,
                warnings,
            }
        }
    }
}

/// Unresolved dependency ids in snapshot order, deduplicated.
fn stale_dependency_ids(graph: &DependencyGraph<TaskRecord>) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();
    for (_, dependency) in graph.dangling_references() {
        if !warnings.contains(dependency) {
            warnings.push(dependency.clone());
        }
    }
    warnings
}
