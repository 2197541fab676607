//! # worksim
//!
//! **worksim** is a simulated-work task runtime for Rust.
//!
//! It models independent units of work ("tasks") that run concurrently, each
//! with a randomly assigned duration from a fixed menu, and supports two
//! execution disciplines: fully parallel (every task starts immediately) and
//! turn-based (tasks run strictly one at a time with a mandatory pause
//! between turns). Nothing real is computed: a task's work is a cancellable
//! delay, which makes the crate a compact playground for supervision,
//! cancellation, and observer plumbing.
//!
//! ## Architecture
//! ```text
//!     add_task("…")      launch_parallel("…", n)      run_turns("…", n)
//!          │                       │                         │
//!          ▼                       ▼                         ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor (runtime façade)                                      │
//! │  - Bus (broadcast events)                                         │
//! │  - Registry (ordered, synchronized source of truth)               │
//! │  - SubscriberSet (fans out to subscribers)                        │
//! │  - runtime CancellationToken (shutdown reaches every task)        │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌──────────┐      ┌──────────┐      ┌─────────────────┐
//!   │  runner  │      │  runner  │ ...  │   coordinator   │
//!   │ (task 1) │      │ (task 2) │      │ (one per batch, │
//!   └────┬─────┘      └────┬─────┘      │  workers serial)│
//!        │                 │            └──────┬──────────┘
//!        │ Publishes:      │                   │ Publishes:
//!        │ - TaskStarting  │                   │ - TurnStarting
//!        │ - TaskCompleted │                   │ - BatchFinished
//!        │ - TaskCancelled │                   │ - BatchAborted
//!        ▼                 ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                         supervisor listener
//!                                   ▼
//!                             SubscriberSet
//!                        ┌─────────┼─────────┐
//!                        ▼         ▼         ▼
//!                 completion-log console   custom
//! ```
//!
//! ## Task lifecycle
//! ```text
//! Pending ──(start)──► Running ──(delay elapses)──► Completed   [terminal]
//!                         │                              │
//!                         │                              └─► TaskCompleted
//!                         │                                  (exactly once,
//!                         │                                   never for a
//!                         │                                   cancelled task)
//!                         └──(cancel)─────────────► Cancelled  [terminal]
//! ```
//!
//! - Estimates are drawn uniformly from a fixed menu ({3, 5, 10, 30} s) at
//!   creation and never change.
//! - Elapsed time is measured on the terminal transition; a cancelled task's
//!   elapsed time is shorter than its estimate.
//! - Removal from the registry never stops a running task.
//!
//! ## Turn-based hand-off
//! The coordinator runs on its own tokio task and blocks on each worker's
//! completion latch before creating the next worker, with a fixed pause
//! between turns. The batch summary sums the workers' **estimates**.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use worksim::{CompletionLog, Config, ConsoleWriter, Subscribe, Supervisor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), worksim::RuntimeError> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![
//!         Arc::new(CompletionLog::default()),
//!         Arc::new(ConsoleWriter),
//!     ];
//!     let sup = Supervisor::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     // Parallel: all three run at once.
//!     let tasks = sup.launch_parallel("Wash dishes", 3).await;
//!     println!("estimate: {}s", tasks.last().unwrap().estimated().as_secs());
//!
//!     // Turn-based: one worker at a time, 1s pause between turns.
//!     let summary = sup.run_turns("Paint fence", 2).await.unwrap()?;
//!     println!("total: {}s", summary.total_estimated.as_secs());
//!
//!     // Cancel whatever is still running and exit.
//!     sup.shutdown().await
//! }
//! ```

mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{BatchSummary, Config, Registry, Supervisor, SupervisorBuilder, TurnOutcome};
pub use error::RuntimeError;
pub use events::{Bus, Event, EventKind};
pub use subscribers::{CompletionLog, ConsoleWriter, Subscribe, SubscriberSet, DEFAULT_LOG_PATH};
pub use tasks::{Task, TaskId, TaskStatus, TaskView, DURATION_MENU_SECS};
