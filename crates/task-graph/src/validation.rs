//! Validation utilities for dependency graphs.

use crate::{DependencyGraph, Error, GraphTask, cycle};

/// Result of graph validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the graph is valid (no cycles, no stale references).
    pub is_valid: bool,
    /// List of validation errors, if any.
    pub errors: Vec<Error>,
}

impl ValidationResult {
    /// Create a valid result.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// Create an invalid result with errors.
    #[must_use]
    pub fn invalid(errors: Vec<Error>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

impl<T: GraphTask> DependencyGraph<T> {
    /// Validate the graph structure.
    ///
    /// Checks for dependency cycles and for dangling references. Analysis
    /// tolerates both (cycles become result values, stale references are
    /// skipped); this stricter check is for callers that want to reject a
    /// snapshot outright before persisting an edit.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        let report = cycle::detect(self);
        if report.has_cycle {
            errors.push(Error::CycleDetected {
                cycle: report.cycle,
            });
        }

        for (task, dependency) in self.dangling_references() {
            errors.push(Error::UnknownDependency {
                task: task.clone(),
                dependency: dependency.clone(),
            });
        }

        if errors.is_empty() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(errors)
        }
    }
}
