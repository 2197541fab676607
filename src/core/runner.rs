//! # Run one task's simulated delay to a terminal state.
//!
//! [`drive`] owns the concurrent execution of a single [`Task`]: it performs
//! the Pending → Running transition, races the simulated delay against the
//! task's cancellation token, applies the terminal transition, and publishes
//! lifecycle events.
//!
//! ## Event flow
//! ```text
//! Natural expiry:
//!   sleep(estimated) elapses → Completed → publish TaskCompleted
//!                                        → publish RegistryChanged
//! Interruption:
//!   cancel token fires       → Cancelled → publish TaskCancelled
//!                                          (no completion notification,
//!                                           no refresh signal)
//! ```
//!
//! ## Rules
//! - Exactly one terminal event per task: `TaskCompleted` or `TaskCancelled`.
//! - The done latch trips **after** the terminal events are published, so a
//!   coordinator resuming from `wait_terminal` never overtakes the
//!   completion notification.
//! - A task that is not Pending when the runner starts is left untouched.

use std::sync::Arc;

use tokio::time;

use crate::events::{Bus, Event, EventKind};
use crate::tasks::Task;

/// Drives `task` from Pending to a terminal state, publishing to `bus`.
///
/// Spawned by the registry on its own tokio task, one per task. The simulated
/// delay is a single cancellable sleep of the task's estimate.
pub(crate) async fn drive(task: Arc<Task>, bus: Bus) {
    if !task.mark_running() {
        return;
    }
    bus.publish(
        Event::new(EventKind::TaskStarting)
            .with_task(Arc::clone(task.description()))
            .with_id(task.id())
            .with_estimate(task.estimated()),
    );

    let sleep = time::sleep(task.estimated());
    tokio::pin!(sleep);

    tokio::select! {
        _ = &mut sleep => {
            let elapsed = task.mark_completed();
            bus.publish(
                Event::new(EventKind::TaskCompleted)
                    .with_task(Arc::clone(task.description()))
                    .with_id(task.id())
                    .with_estimate(task.estimated())
                    .with_elapsed(elapsed),
            );
            bus.publish(Event::new(EventKind::RegistryChanged));
        }
        _ = task.cancel_requested().cancelled() => {
            let elapsed = task.mark_cancelled();
            bus.publish(
                Event::new(EventKind::TaskCancelled)
                    .with_task(Arc::clone(task.description()))
                    .with_id(task.id())
                    .with_elapsed(elapsed),
            );
        }
    }

    task.settle();
}
