//! The task record shape supplied by the storage layer.

use crate::TaskStatus;
use serde::{Deserialize, Serialize};
use worklane_task_graph::GraphTask;

/// One task as loaded from a project snapshot.
///
/// This is the narrow contract between the engine and whatever the host
/// application persists: nothing beyond this shape is assumed. The
/// record is treated as an immutable point-in-time read; analysis never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Opaque unique id, stable within one analysis run.
    pub id: String,
    /// Display label, passed through for reporting only.
    #[serde(default)]
    pub title: String,
    /// Estimated duration in hours. Missing counts as zero, never as an
    /// error; negative values are clamped at graph-build time.
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Ids of tasks that must complete before this one can move forward.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl GraphTask for TaskRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }

    fn weight(&self) -> f64 {
        self.estimated_hours.unwrap_or(0.0)
    }
}
