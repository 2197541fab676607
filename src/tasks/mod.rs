//! # Task entity and duration menu.
//!
//! This module provides the core task-related types:
//! - [`Task`] - a simulated unit of work (pure data + synchronized state)
//! - [`TaskId`] - opaque, process-unique identifier
//! - [`TaskStatus`] - lifecycle states with terminal-state semantics
//! - [`TaskView`] - immutable point-in-time copy for snapshot readers
//! - [`DURATION_MENU_SECS`] - the fixed menu estimates are drawn from

mod estimate;
mod task;

pub use estimate::DURATION_MENU_SECS;
pub use task::{Task, TaskId, TaskStatus, TaskView};
