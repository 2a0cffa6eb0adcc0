//! Core task types and dependency rules for worklane.
//!
//! This crate wraps the generic [`worklane_task_graph`] engine with the
//! concrete task shape the application stores, and adds the two rules
//! the board and the "Dependencies" view are built on:
//!
//! - [`analysis::analyze_project`]: cycle detection plus critical path
//!   over one project's task snapshot, producing the serializable report
//!   the web layer renders.
//! - [`gate::can_transition`]: the per-update predicate that blocks a
//!   task from moving forward while any of its direct dependencies is
//!   incomplete.
//!
//! The engine is stateless and side-effect-free: every call takes an
//! immutable snapshot and returns a value, so concurrent requests need
//! no coordination inside this crate. Snapshot consistency and
//! write-time races are the storage layer's concern.

pub mod analysis;
pub mod gate;
mod status;
mod task;

pub use analysis::{DependencyReport, PathStep, analyze_project};
pub use gate::{GateDecision, can_transition};
pub use status::TaskStatus;
pub use task::TaskRecord;
