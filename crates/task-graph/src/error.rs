//! Error types for dependency graph operations.
//!
//! Note that a cyclic graph is ordinarily reported as a result value
//! ([`crate::CycleReport`], [`crate::CriticalPathAnalysis::Cycle`]) rather
//! than an error. The variants here exist for the strict entry points
//! (`topological_order`, `validate`) used by callers that treat a broken
//! graph as a hard failure.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for dependency graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during dependency graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    /// A dependency cycle was detected in the graph.
    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    #[diagnostic(code(worklane_task_graph::cycle_detected))]
    CycleDetected {
        /// Ids of the tasks on one witness cycle, in walk order.
        cycle: Vec<String>,
    },

    /// A task references a dependency id that resolves to no known task.
    #[error("task '{task}' references unknown dependency '{dependency}'")]
    #[diagnostic(code(worklane_task_graph::unknown_dependency))]
    UnknownDependency {
        /// The task that holds the stale reference.
        task: String,
        /// The id that did not resolve.
        dependency: String,
    },
}
