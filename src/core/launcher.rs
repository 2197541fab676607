//! # Parallel launcher.
//!
//! Creates a batch of independent tasks that all start immediately, each on
//! its own tokio task. No ordering is guaranteed between them; any subset may
//! complete or be cancelled independently.
//!
//! A count of zero is substituted with one rather than rejected, matching the
//! permissive input handling of the task-creation dialog this mirrors.

use std::sync::Arc;

use crate::core::registry::Registry;
use crate::tasks::Task;

/// Creates `count` independent tasks with the same description, registering
/// and starting each immediately.
///
/// Returns the created handles in creation order so the caller can report a
/// representative estimate (conventionally the last-created task's).
pub(crate) async fn launch_parallel(
    registry: &Registry,
    description: &str,
    count: usize,
) -> Vec<Arc<Task>> {
    let count = count.max(1);
    let mut spawned = Vec::with_capacity(count);
    for _ in 0..count {
        spawned.push(registry.spawn(description).await);
    }
    spawned
}
