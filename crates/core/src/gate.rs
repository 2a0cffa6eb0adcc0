//! Dependency gating for single-task status transitions.
//!
//! This is the hot path: it runs on every status-change request, needs
//! only the task's direct dependency statuses, and never touches the
//! full graph. The project-wide analysis in [`crate::analysis`] is the
//! cold path behind the "Dependencies" tab.

use crate::TaskStatus;
use serde::Serialize;

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    /// Whether the transition may proceed.
    pub allowed: bool,
    /// Number of direct dependencies not yet completed. Reported even
    /// when the transition is allowed, so the caller can always phrase
    /// "N incomplete dependencies".
    pub blocking_count: usize,
}

/// Decide whether a task may transition to `target`.
///
/// Forward moves (`in_progress`, `review`, `completed`) require every
/// direct dependency to be exactly completed. Moving back to `todo` or
/// parking as `blocked` is always allowed.
///
/// The check is a pure function: it cannot see storage, so two racing
/// updates can both pass before either commits. Callers mitigate that
/// with a conditional write, not here.
#[must_use]
pub fn can_transition(target: TaskStatus, dependency_statuses: &[TaskStatus]) -> GateDecision {
    let blocking_count = dependency_statuses
        .iter()
        .filter(|status| !status.is_completed())
        .count();

    GateDecision {
        allowed: !target.requires_completed_dependencies() || blocking_count == 0,
        blocking_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_move_blocked_by_incomplete_dependency() {
        let decision = can_transition(
            TaskStatus::InProgress,
            &[TaskStatus::Todo, TaskStatus::Completed],
        );
        assert!(!decision.allowed);
        assert_eq!(decision.blocking_count, 1);
    }

    #[test]
    fn test_backward_move_is_never_gated() {
        let decision = can_transition(
            TaskStatus::Blocked,
            &[TaskStatus::Todo, TaskStatus::InProgress],
        );
        assert!(decision.allowed);

        let decision = can_transition(TaskStatus::Todo, &[TaskStatus::Review]);
        assert!(decision.allowed);
    }

    #[test]
    fn test_forward_move_allowed_when_all_completed() {
        let decision = can_transition(
            TaskStatus::Completed,
            &[TaskStatus::Completed, TaskStatus::Completed],
        );
        assert!(decision.allowed);
        assert_eq!(decision.blocking_count, 0);
    }

    #[test]
    fn test_no_dependencies_is_always_allowed() {
        for target in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Completed,
            TaskStatus::Blocked,
        ] {
            assert!(can_transition(target, &[]).allowed);
        }
    }

    #[test]
    fn test_review_counts_every_incomplete_dependency() {
        let decision = can_transition(
            TaskStatus::Review,
            &[TaskStatus::Todo, TaskStatus::Blocked, TaskStatus::Completed],
        );
        assert!(!decision.allowed);
        assert_eq!(decision.blocking_count, 2);
    }
}
