//! # Supervisor: the runtime façade.
//!
//! The [`Supervisor`] owns the event bus, the task [`Registry`], the
//! subscriber fan-out, and the runtime cancellation token. It is the single
//! entry point for creating tasks (parallel or turn-based), cancelling and
//! removing them, reading snapshots, and shutting the runtime down.
//!
//! ## High-level architecture
//! ```text
//!   add_task / launch_parallel ──► Registry ──► runner per task
//!   run_turns ──────────────────► coordinator (own tokio task)
//!                                      │ strictly sequential workers
//!                                      ▼
//!   Registry / runners / coordinator ── publish(Event) ──► Bus
//!                                                           │
//!                                     supervisor listener ──┘
//!                                              ▼
//!                                       SubscriberSet
//!                                  ┌─────────┼─────────┐
//!                                  ▼         ▼         ▼
//!                            completion-log console   custom
//!
//! Shutdown path:
//!   shutdown()
//!     ├─► publish ShutdownRequested
//!     ├─► runtime_token.cancel()  → propagates to every task's child token
//!     └─► wait for runners within cfg.grace:
//!            ├─ all joined  → publish AllStoppedWithin
//!            └─ overrun     → publish GraceExceeded + RuntimeError
//! ```
//!
//! ## Example
//! ```no_run
//! use worksim::{Config, Supervisor, ConsoleWriter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), worksim::RuntimeError> {
//!     let sup = Supervisor::builder(Config::default())
//!         .with_subscriber(Arc::new(ConsoleWriter))
//!         .build();
//!
//!     // Three independent tasks, all running at once.
//!     let tasks = sup.launch_parallel("Wash dishes", 3).await;
//!     println!("last estimate: {:?}", tasks.last().unwrap().estimated());
//!
//!     // Two workers, strictly one at a time, 1s pause in between.
//!     let batch = sup.run_turns("Paint fence", 2);
//!     let summary = batch.await.expect("coordinator panicked")?;
//!     println!("batch total: {:?}", summary.total_estimated);
//!
//!     sup.shutdown().await
//! }
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::builder::SupervisorBuilder;
use crate::core::config::Config;
use crate::core::coordinator::{self, BatchSummary};
use crate::core::launcher;
use crate::core::registry::Registry;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::SubscriberSet;
use crate::tasks::{Task, TaskId, TaskView};

/// Coordinates task creation, cancellation, event delivery, and shutdown.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    #[allow(dead_code)]
    subs: Arc<SubscriberSet>,
    registry: Arc<Registry>,
    runtime_token: CancellationToken,
}

impl Supervisor {
    /// Returns a builder for constructing a supervisor.
    pub fn builder(cfg: Config) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        registry: Arc<Registry>,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            registry,
            runtime_token,
        }
    }

    /// Creates and starts a single task.
    ///
    /// Returns the handle so the caller can report the drawn estimate.
    pub async fn add_task(&self, description: &str) -> Arc<Task> {
        self.registry.spawn(description).await
    }

    /// Creates and starts `count` independent tasks with the same
    /// description. A count of zero is substituted with one.
    ///
    /// No ordering is guaranteed between the tasks; any subset may complete
    /// or be cancelled independently. Handles are returned in creation order.
    pub async fn launch_parallel(&self, description: &str, count: usize) -> Vec<Arc<Task>> {
        launcher::launch_parallel(&self.registry, description, count).await
    }

    /// Runs `workers` tasks strictly one at a time on a dedicated tokio
    /// task; the caller is never blocked.
    ///
    /// Workers are labeled `"<description> - Worker <i>"`. Worker i+1 is
    /// created only after worker i reached a terminal state, with the
    /// configured pause between turns. The returned handle resolves to the
    /// batch summary (also published as a `BatchFinished` event), or to
    /// [`RuntimeError::BatchInterrupted`] if shutdown interrupted the run.
    pub fn run_turns(
        &self,
        description: &str,
        workers: usize,
    ) -> JoinHandle<Result<BatchSummary, RuntimeError>> {
        tokio::spawn(coordinator::run_turns(
            Arc::clone(&self.registry),
            self.bus.clone(),
            self.runtime_token.clone(),
            description.to_string(),
            workers,
            self.cfg.turn_pause,
        ))
    }

    /// Requests cancellation of a task by id.
    ///
    /// Returns `true` when an interruption was actually requested; Pending,
    /// terminal, and unknown tasks yield `false`.
    pub async fn cancel(&self, id: TaskId) -> bool {
        self.registry.cancel(id).await
    }

    /// Removes a task from the registry by id. No-op (`false`) if absent.
    ///
    /// A still-running task keeps executing until natural completion or
    /// explicit cancel.
    pub async fn remove(&self, id: TaskId) -> bool {
        self.registry.remove(id).await
    }

    /// Returns an immutable point-in-time copy of every tracked task, in
    /// insertion order.
    pub async fn snapshot(&self) -> Vec<TaskView> {
        self.registry.snapshot().await
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Subscribes a raw receiver directly to the event bus.
    ///
    /// Useful for tests and UIs that want the stream without implementing
    /// [`Subscribe`](crate::Subscribe).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Cancels every running task and waits for their runners to finish.
    ///
    /// Mirrors application exit: all running delays are interrupted, the
    /// affected tasks end up Cancelled. Waits up to `cfg.grace`; overrunning
    /// the window yields [`RuntimeError::GraceExceeded`] listing the tasks
    /// that were still not terminal.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.runtime_token.cancel();

        let joins = self.registry.take_joins();
        let drain = async {
            for join in joins {
                let _ = join.await;
            }
        };

        match tokio::time::timeout(self.cfg.grace, drain).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_) => {
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                let stuck = self
                    .registry
                    .snapshot()
                    .await
                    .into_iter()
                    .filter(|v| !v.status.is_terminal())
                    .map(|v| v.description.to_string())
                    .collect();
                Err(RuntimeError::GraceExceeded {
                    grace: self.cfg.grace,
                    stuck,
                })
            }
        }
    }
}
