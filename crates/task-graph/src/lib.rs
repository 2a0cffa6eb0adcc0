//! Dependency graph algorithms for worklane projects.
//!
//! This crate provides the graph engine behind the project "Dependencies"
//! view and the board's move-blocking rule: building a dependency graph
//! from a flat snapshot of tasks, detecting dependency cycles, and
//! computing the critical path (the longest chain of dependent work).
//!
//! # Key Types
//!
//! - [`DependencyGraph`]: the adjacency structure built from a task snapshot
//! - [`GraphTask`]: trait that task types implement to be stored in the graph
//! - [`CycleReport`]: result of cycle detection
//! - [`CriticalPathAnalysis`]: result of critical path analysis
//!
//! # Example
//!
//! ```ignore
//! use worklane_task_graph::{DependencyGraph, GraphTask, cycle, critical_path};
//!
//! // Define a simple task type
//! #[derive(Clone)]
//! struct MyTask {
//!     id: String,
//!     hours: f64,
//!     depends_on: Vec<String>,
//! }
//!
//! impl GraphTask for MyTask {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn dependency_ids(&self) -> impl Iterator<Item = &str> {
//!         self.depends_on.iter().map(String::as_str)
//!     }
//!
//!     fn weight(&self) -> f64 {
//!         self.hours
//!     }
//! }
//!
//! // Build a graph from a project snapshot and analyze it
//! let graph = DependencyGraph::from_tasks(&tasks);
//! if !cycle::detect(&graph).has_cycle {
//!     let analysis = critical_path::analyze(&graph);
//! }
//! ```

pub mod critical_path;
pub mod cycle;
mod error;
mod graph;
mod validation;

pub use critical_path::{CriticalPath, CriticalPathAnalysis};
pub use cycle::CycleReport;
pub use error::{Error, Result};
pub use graph::{DependencyGraph, GraphNode};
pub use validation::ValidationResult;

/// Trait for task data that can be stored in a [`DependencyGraph`].
///
/// Implement this trait for your task type to enable it to participate
/// in cycle detection and critical path analysis.
pub trait GraphTask: Clone {
    /// Returns the unique id of this task, stable within one analysis run.
    fn id(&self) -> &str;

    /// Returns the ids of tasks this task depends on, in declaration order.
    ///
    /// Declaration order matters: it is the tie-break used when several
    /// predecessor paths have equal duration.
    fn dependency_ids(&self) -> impl Iterator<Item = &str>;

    /// Returns the estimated duration of this task in hours.
    ///
    /// Negative or non-finite values are clamped to zero when the graph
    /// is built. The default is a zero-cost task.
    fn weight(&self) -> f64 {
        0.0
    }
}
