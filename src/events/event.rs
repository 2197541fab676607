//! # Runtime events emitted by the registry, runner, and coordinator.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Lifecycle events**: task execution flow (added, starting, completed, cancelled, removed)
//! - **Refresh events**: the registry changed and observers should re-read a snapshot
//! - **Batch events**: turn-based coordination (turn starting, batch finished/aborted)
//! - **Shutdown events**: runtime termination progress
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task
//! descriptions, ids, estimates, and measured elapsed times.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use worksim::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskCompleted)
//!     .with_task("Wash dishes")
//!     .with_estimate(Duration::from_secs(5))
//!     .with_elapsed(Duration::from_millis(5003));
//!
//! assert_eq!(ev.kind, EventKind::TaskCompleted);
//! assert_eq!(ev.task.as_deref(), Some("Wash dishes"));
//! assert_eq!(ev.estimate_s, Some(5));
//! assert_eq!(ev.elapsed_ms, Some(5003));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::core::BatchSummary;
use crate::tasks::TaskId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Task lifecycle events ===
    /// Task was created and appended to the registry (still pending).
    ///
    /// Sets:
    /// - `task`: task description
    /// - `id`: task id
    /// - `estimate_s`: drawn estimate in whole seconds
    TaskAdded,

    /// Task transitioned to running; its simulated delay has begun.
    ///
    /// Sets:
    /// - `task`: task description
    /// - `id`: task id
    /// - `estimate_s`: drawn estimate in whole seconds
    TaskStarting,

    /// Task ran its full delay and completed naturally.
    ///
    /// Published exactly once per naturally-completed task; this is the
    /// completion notification consumed by the completion log. Never
    /// published for cancelled tasks.
    ///
    /// Sets:
    /// - `task`: task description
    /// - `id`: task id
    /// - `estimate_s`: drawn estimate in whole seconds
    /// - `elapsed_ms`: measured wall time of the run
    TaskCompleted,

    /// Task was cancelled while running; its delay was interrupted.
    ///
    /// Sets:
    /// - `task`: task description
    /// - `id`: task id
    /// - `elapsed_ms`: measured wall time up to the interruption
    TaskCancelled,

    /// Task was removed from the registry by explicit caller request.
    ///
    /// Removal never stops a running task; its delay continues off-registry.
    ///
    /// Sets:
    /// - `task`: task description
    /// - `id`: task id
    TaskRemoved,

    // === Refresh events ===
    /// The registry changed; observers should re-read a snapshot.
    ///
    /// Published after add, remove, and natural completion. Carries no
    /// metadata on purpose: it is a parameterless refresh signal.
    RegistryChanged,

    // === Batch events ===
    /// The turn-based coordinator is starting the next worker.
    ///
    /// Sets:
    /// - `task`: worker task description (`"<batch> - Worker <i>"`)
    /// - `turn`: 1-based worker index
    TurnStarting,

    /// A turn-based run finished all its workers.
    ///
    /// Sets:
    /// - `summary`: ordered per-worker outcomes plus the aggregate total
    BatchFinished,

    /// A turn-based run was interrupted; remaining turns were not started
    /// and the partial summary was discarded.
    ///
    /// Sets:
    /// - `turn`: number of turns that had completed before the abort
    /// - `reason`: abort reason
    BatchAborted,

    // === Shutdown events ===
    /// Shutdown requested; all running tasks are being cancelled.
    ShutdownRequested,

    /// All task runners stopped within the configured grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some tasks were still not terminal.
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Description of the task, if applicable.
    pub task: Option<Arc<str>>,
    /// Id of the task, if applicable.
    pub id: Option<TaskId>,
    /// Estimated duration in whole seconds (the menu is whole seconds).
    pub estimate_s: Option<u64>,
    /// Measured elapsed time in milliseconds (compact).
    pub elapsed_ms: Option<u64>,
    /// 1-based turn index for batch events.
    pub turn: Option<u32>,
    /// Human-readable reason (aborts, faults).
    pub reason: Option<Arc<str>>,
    /// Batch summary payload (only for `BatchFinished`).
    pub summary: Option<Arc<BatchSummary>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            id: None,
            estimate_s: None,
            elapsed_ms: None,
            turn: None,
            reason: None,
            summary: None,
        }
    }

    /// Attaches a task description.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task id.
    #[inline]
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attaches an estimated duration (stored as whole seconds).
    #[inline]
    pub fn with_estimate(mut self, d: Duration) -> Self {
        self.estimate_s = Some(d.as_secs());
        self
    }

    /// Attaches a measured elapsed time (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u64::MAX)) as u64;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches a 1-based turn index.
    #[inline]
    pub fn with_turn(mut self, n: u32) -> Self {
        self.turn = Some(n);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a batch summary.
    #[inline]
    pub fn with_summary(mut self, summary: Arc<BatchSummary>) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Returns the measured elapsed time as fractional seconds, if present.
    #[inline]
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.elapsed_ms.map(|ms| ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::TaskAdded);
        let b = Event::new(EventKind::TaskStarting);
        let c = Event::new(EventKind::TaskCompleted);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::new(EventKind::TaskCancelled)
            .with_task("Paint fence")
            .with_elapsed(Duration::from_millis(2250))
            .with_reason("user request");

        assert_eq!(ev.task.as_deref(), Some("Paint fence"));
        assert_eq!(ev.elapsed_ms, Some(2250));
        assert_eq!(ev.elapsed_secs(), Some(2.25));
        assert_eq!(ev.reason.as_deref(), Some("user request"));
        assert!(ev.summary.is_none());
    }

    #[test]
    fn test_estimate_stored_as_whole_seconds() {
        let ev = Event::new(EventKind::TaskAdded).with_estimate(Duration::from_secs(30));
        assert_eq!(ev.estimate_s, Some(30));
    }
}
