//! # Turn-based coordinator: one worker at a time.
//!
//! Runs a bounded sequence of worker tasks strictly in order. Each worker is
//! created only after the previous one reached a terminal state, with a fixed
//! pause between turns. The hand-off is a blocking rendezvous on the task's
//! completion latch, not a poll loop.
//!
//! ## Flow
//! ```text
//! for i in 1..=workers {
//!   ├─► publish TurnStarting(i)
//!   ├─► registry.spawn("<description> - Worker i")
//!   ├─► await worker terminal state        (cancellable wait)
//!   ├─► total += worker estimate
//!   └─► sleep(turn_pause) unless last      (cancellable wait)
//! }
//! publish BatchFinished(summary) + RegistryChanged
//! ```
//!
//! ## Rules
//! - Worker i reaches a terminal state strictly before worker i+1 is created.
//! - The running total accumulates each worker's **estimate**, not its
//!   measured time; a cancelled worker still contributes its estimate.
//! - Interruption (runtime shutdown) aborts the remaining turns and discards
//!   the partial summary: a `BatchAborted` event is published instead and
//!   the caller gets `RuntimeError::BatchInterrupted`.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::core::registry::Registry;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};

/// Outcome of a single turn: the worker's task description and its estimate.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Worker task description (`"<description> - Worker <i>"`).
    pub label: String,
    /// The worker task's estimate drawn at creation.
    pub estimated: Duration,
}

/// Aggregated result of a completed turn-based run.
///
/// Published once, at the end of the run, inside a
/// [`EventKind::BatchFinished`] event, and returned to the caller.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// The batch description the workers were derived from.
    pub description: String,
    /// Per-worker outcomes, in execution order.
    pub turns: Vec<TurnOutcome>,
    /// Sum of the workers' estimates.
    pub total_estimated: Duration,
}

/// Runs `workers` tasks strictly one at a time.
///
/// Executed on a dedicated tokio task (spawned by the supervisor) so the
/// requesting caller is never blocked; only this coordinator suspends while
/// waiting on each worker and during the inter-turn pause.
///
/// A worker count of zero is substituted with one.
pub(crate) async fn run_turns(
    registry: Arc<Registry>,
    bus: Bus,
    runtime_token: CancellationToken,
    description: String,
    workers: usize,
    pause: Duration,
) -> Result<BatchSummary, RuntimeError> {
    let workers = workers.max(1);
    let mut turns: Vec<TurnOutcome> = Vec::with_capacity(workers);
    let mut total = Duration::ZERO;

    for i in 1..=workers {
        let label = format!("{description} - Worker {i}");
        bus.publish(
            Event::new(EventKind::TurnStarting)
                .with_task(label.as_str())
                .with_turn(i as u32),
        );

        let task = registry.spawn(&label).await;
        tokio::select! {
            _ = task.wait_terminal() => {}
            _ = runtime_token.cancelled() => {
                return Err(abort(&bus, turns.len(), "interrupted while waiting on worker"));
            }
        }

        total += task.estimated();
        turns.push(TurnOutcome {
            label,
            estimated: task.estimated(),
        });

        if i < workers {
            let sleep = time::sleep(pause);
            tokio::pin!(sleep);
            tokio::select! {
                _ = &mut sleep => {}
                _ = runtime_token.cancelled() => {
                    return Err(abort(&bus, turns.len(), "interrupted during inter-turn pause"));
                }
            }
        }
    }

    let summary = BatchSummary {
        description,
        turns,
        total_estimated: total,
    };
    bus.publish(
        Event::new(EventKind::BatchFinished).with_summary(Arc::new(summary.clone())),
    );
    bus.publish(Event::new(EventKind::RegistryChanged));
    Ok(summary)
}

/// Publishes the abort event and builds the matching error. The partial
/// summary is dropped; no `BatchFinished` is ever published for this run.
fn abort(bus: &Bus, completed_turns: usize, reason: &'static str) -> RuntimeError {
    bus.publish(
        Event::new(EventKind::BatchAborted)
            .with_turn(completed_turns as u32)
            .with_reason(reason),
    );
    RuntimeError::BatchInterrupted { completed_turns }
}
