//! # Task registry: the synchronized single source of truth.
//!
//! [`Registry`] owns the ordered collection of all currently tracked tasks.
//! Creation, removal, and snapshot reads are serialized through one
//! `RwLock`; critical sections are short (copy-and-release, never
//! hold-and-render), so readers never block writers for long.
//!
//! ## Architecture
//! ```text
//! spawn(description)
//!   ├─► Task::create (Pending, estimate drawn, child cancel token)
//!   ├─► append to ordered entries          (write lock, short)
//!   ├─► publish TaskAdded + RegistryChanged
//!   └─► tokio::spawn(runner::drive)        (Pending → Running → terminal)
//! ```
//!
//! ## Rules
//! - Insertion order is preserved; snapshots reproduce it.
//! - A snapshot never observes a task mid-mutation and never misses an add
//!   that has already returned.
//! - Removal is by identity, a no-op if absent, and **never** stops a running
//!   task: the runner keeps its own `Arc<Task>` and runs to a terminal state
//!   off-registry.
//! - Runner join handles are retained so shutdown can wait for them.

use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::runner;
use crate::events::{Bus, Event, EventKind};
use crate::tasks::{Task, TaskId, TaskView};

/// Ordered, synchronized collection of tasks.
pub struct Registry {
    entries: RwLock<Vec<Arc<Task>>>,
    joins: Mutex<Vec<JoinHandle<()>>>,
    bus: Bus,
    runtime_token: CancellationToken,
}

impl Registry {
    /// Creates an empty registry.
    pub(crate) fn new(bus: Bus, runtime_token: CancellationToken) -> Arc<Self> {
        Arc::new(Self {
            entries: RwLock::new(Vec::new()),
            joins: Mutex::new(Vec::new()),
            bus,
            runtime_token,
        })
    }

    /// Creates a task, registers it, and starts it.
    ///
    /// The task is appended to the registry **before** its runner is spawned,
    /// so a snapshot taken right after `spawn` returns always contains it.
    /// The task's cancel token is a child of the runtime token: shutdown
    /// reaches every running task.
    pub async fn spawn(&self, description: &str) -> Arc<Task> {
        let task = Task::create(description, self.runtime_token.child_token());

        {
            let mut entries = self.entries.write().await;
            entries.push(Arc::clone(&task));
        }
        self.bus.publish(
            Event::new(EventKind::TaskAdded)
                .with_task(Arc::clone(task.description()))
                .with_id(task.id())
                .with_estimate(task.estimated()),
        );
        self.bus.publish(Event::new(EventKind::RegistryChanged));

        let join = tokio::spawn(runner::drive(Arc::clone(&task), self.bus.clone()));
        self.joins
            .lock()
            .expect("registry joins mutex poisoned")
            .push(join);

        task
    }

    /// Removes a task by id. No-op (`false`) if absent.
    ///
    /// Removal does not affect a still-running task's execution; it continues
    /// until natural completion or explicit cancel.
    pub async fn remove(&self, id: TaskId) -> bool {
        let removed = {
            let mut entries = self.entries.write().await;
            match entries.iter().position(|t| t.id() == id) {
                Some(idx) => Some(entries.remove(idx)),
                None => None,
            }
        };

        match removed {
            Some(task) => {
                self.bus.publish(
                    Event::new(EventKind::TaskRemoved)
                        .with_task(Arc::clone(task.description()))
                        .with_id(task.id()),
                );
                self.bus.publish(Event::new(EventKind::RegistryChanged));
                true
            }
            None => false,
        }
    }

    /// Requests cancellation of a task by id.
    ///
    /// Returns `true` when an interruption was actually requested (the task
    /// existed and was Running); Pending, terminal, and unknown tasks yield
    /// `false`.
    pub async fn cancel(&self, id: TaskId) -> bool {
        match self.get(id).await {
            Some(task) => task.cancel(),
            None => false,
        }
    }

    /// Looks up a task by id.
    pub async fn get(&self, id: TaskId) -> Option<Arc<Task>> {
        let entries = self.entries.read().await;
        entries.iter().find(|t| t.id() == id).cloned()
    }

    /// Returns an immutable point-in-time copy of every tracked task, in
    /// insertion order.
    pub async fn snapshot(&self) -> Vec<TaskView> {
        let entries = self.entries.read().await;
        entries.iter().map(|t| t.view()).collect()
    }

    /// Number of tracked tasks.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when no tasks are tracked.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drains the retained runner join handles for a shutdown wait.
    ///
    /// Handles of already-finished runners resolve immediately when awaited.
    pub(crate) fn take_joins(&self) -> Vec<JoinHandle<()>> {
        let mut joins = self.joins.lock().expect("registry joins mutex poisoned");
        std::mem::take(&mut *joins)
    }
}
