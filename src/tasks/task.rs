//! # Task: a simulated unit of work.
//!
//! A [`Task`] is pure data plus a synchronized state record; it is **not** a
//! thread. The concurrent execution of its simulated delay belongs to the
//! runner (`core::runner`), which drives the state machine:
//!
//! ```text
//! Pending ──(start)──► Running ──(delay elapses)──► Completed   [terminal]
//!                         │
//!                         └──(cancel)─────────────► Cancelled   [terminal]
//! ```
//!
//! ## Rules
//! - `id`, `description`, and `estimated` are immutable after creation.
//! - `elapsed` is computed once, on the terminal transition, and is only
//!   meaningful in a terminal state.
//! - Status, start timestamps, and elapsed live behind a single mutex so a
//!   reader never observes status and elapsed out of sync.
//! - Cancelling interrupts the delay only while Running; a Pending or
//!   terminal task ignores the request.
//! - The done latch trips after the terminal transition is published, so a
//!   waiter resuming from [`Task::wait_terminal`] observes final state.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::estimate::draw_estimate;

/// Global counter for task id assignment.
static TASK_SEQ: AtomicU64 = AtomicU64::new(1);

/// Opaque task identifier, unique within the process, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        TaskId(TASK_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a task. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Created and registered, delay not started yet.
    Pending,
    /// The simulated delay is in progress.
    Running,
    /// The delay ran to its natural end.
    Completed,
    /// The delay was interrupted before its natural end.
    Cancelled,
}

impl TaskStatus {
    /// Returns true for `Completed` and `Cancelled`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Mutable portion of a task, guarded as one record.
struct State {
    status: TaskStatus,
    started_at: Option<SystemTime>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

/// Immutable point-in-time copy of a task, safe to hold while the task keeps
/// running. Produced by [`Task::view`] and registry snapshots.
#[derive(Debug, Clone)]
pub struct TaskView {
    /// Task id.
    pub id: TaskId,
    /// Task description.
    pub description: Arc<str>,
    /// Current lifecycle state at snapshot time.
    pub status: TaskStatus,
    /// The immutable estimate drawn at creation.
    pub estimated: Duration,
    /// Wall-clock start time, set on the transition to Running.
    pub started_at: Option<SystemTime>,
    /// Measured run time; present only once the status is terminal.
    pub elapsed: Option<Duration>,
}

/// A simulated unit of work with a random fixed duration and a
/// terminal-state lifecycle.
///
/// Shared as `Arc<Task>`; the runner mutates state through the crate-private
/// transition methods, external callers observe through [`Task::view`] /
/// [`Task::status`] and may request cancellation at any time.
pub struct Task {
    id: TaskId,
    description: Arc<str>,
    estimated: Duration,
    state: Mutex<State>,
    cancel: CancellationToken,
    done: CancellationToken,
}

impl Task {
    /// Creates a pending task with a freshly drawn estimate.
    ///
    /// `cancel` is the runner-facing interruption token, normally a child of
    /// the runtime token so shutdown reaches every running task.
    pub(crate) fn create(description: &str, cancel: CancellationToken) -> Arc<Self> {
        Arc::new(Self {
            id: TaskId::next(),
            description: Arc::from(description),
            estimated: draw_estimate(),
            state: Mutex::new(State {
                status: TaskStatus::Pending,
                started_at: None,
                started: None,
                elapsed: None,
            }),
            cancel,
            done: CancellationToken::new(),
        })
    }

    /// Returns the task id.
    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[inline]
    pub fn description(&self) -> &Arc<str> {
        &self.description
    }

    /// Returns the estimate drawn at creation. Never changes.
    #[inline]
    pub fn estimated(&self) -> Duration {
        self.estimated
    }

    /// Returns the current lifecycle state.
    pub fn status(&self) -> TaskStatus {
        self.lock().status
    }

    /// Returns the measured run time, present only in a terminal state.
    pub fn elapsed(&self) -> Option<Duration> {
        self.lock().elapsed
    }

    /// Produces an immutable point-in-time copy of the task.
    pub fn view(&self) -> TaskView {
        let state = self.lock();
        TaskView {
            id: self.id,
            description: Arc::clone(&self.description),
            status: state.status,
            estimated: self.estimated,
            started_at: state.started_at,
            elapsed: state.elapsed,
        }
    }

    /// Requests early termination.
    ///
    /// Interrupts the simulated delay if the task is Running and returns
    /// `true`. A Pending or terminal task ignores the request (`false`);
    /// a Pending task will still run when started.
    pub fn cancel(&self) -> bool {
        let running = self.lock().status == TaskStatus::Running;
        if running {
            self.cancel.cancel();
        }
        running
    }

    /// Resolves once the task reaches a terminal state.
    ///
    /// Level-triggered: returns immediately if the task is already terminal.
    pub async fn wait_terminal(&self) {
        self.done.cancelled().await;
    }

    /// Token the runner races against the simulated delay.
    #[inline]
    pub(crate) fn cancel_requested(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Pending → Running. Records start timestamps.
    ///
    /// Returns `false` without touching state when the task is not Pending,
    /// making a double start a no-op.
    pub(crate) fn mark_running(&self) -> bool {
        let mut state = self.lock();
        if state.status != TaskStatus::Pending {
            return false;
        }
        state.status = TaskStatus::Running;
        state.started_at = Some(SystemTime::now());
        state.started = Some(Instant::now());
        true
    }

    /// Running → Completed. Computes and returns the measured run time.
    pub(crate) fn mark_completed(&self) -> Duration {
        self.finish(TaskStatus::Completed)
    }

    /// Running → Cancelled. Computes and returns the measured run time,
    /// which is shorter than the estimate.
    pub(crate) fn mark_cancelled(&self) -> Duration {
        self.finish(TaskStatus::Cancelled)
    }

    /// Trips the done latch. Called by the runner after the terminal events
    /// are published, so waiters resume only once notification is out.
    pub(crate) fn settle(&self) {
        self.done.cancel();
    }

    fn finish(&self, terminal: TaskStatus) -> Duration {
        let mut state = self.lock();
        if state.status != TaskStatus::Running {
            return state.elapsed.unwrap_or(Duration::ZERO);
        }
        let elapsed = state
            .started
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO);
        state.status = terminal;
        state.elapsed = Some(elapsed);
        elapsed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("task state mutex poisoned")
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("estimated", &self.estimated)
            .field("status", &state.status)
            .field("elapsed", &state.elapsed)
            .finish()
    }
}
