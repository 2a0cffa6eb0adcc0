//! Task status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// The set is closed on purpose: status used to travel as a free-form
/// string, which let typos slip through as unhandled states. Only
/// [`TaskStatus::Completed`] satisfies a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Work finished, awaiting review.
    Review,
    /// Done. The only status that satisfies a dependency.
    Completed,
    /// Parked; not counted as progress.
    Blocked,
}

impl TaskStatus {
    /// Whether this status satisfies a dependency on the task.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether moving *to* this status requires every dependency to be
    /// completed. Moving back to `Todo` or parking as `Blocked` is never
    /// gated.
    #[must_use]
    pub const fn requires_completed_dependencies(self) -> bool {
        matches!(self, Self::InProgress | Self::Review | Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        };
        write!(f, "{label}")
    }
}
