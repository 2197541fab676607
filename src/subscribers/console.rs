//! # Console subscriber for debugging and demos.
//!
//! [`ConsoleWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [added] task=Wash dishes id=#3 estimate=5s
//! [starting] task=Wash dishes id=#3
//! [completed] task=Wash dishes id=#3 elapsed=5.002s estimate=5s
//! [cancelled] task=Wash dishes id=#4 elapsed=1.514s
//! [removed] task=Wash dishes id=#4
//! [turn] task=Paint fence - Worker 2 n=2
//! [batch-finished] description=Paint fence turns=2 total=8s
//! [batch-aborted] completed=1 reason=interrupted while waiting on worker
//! [shutdown-requested]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout subscriber.
///
/// Intended for development and demos; implement a custom
/// [`Subscribe`] for structured logging or metrics collection.
pub struct ConsoleWriter;

#[async_trait]
impl Subscribe for ConsoleWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::TaskAdded => {
                if let (Some(task), Some(id)) = (&e.task, e.id) {
                    println!(
                        "[added] task={task} id={id} estimate={}s",
                        e.estimate_s.unwrap_or(0)
                    );
                }
            }
            EventKind::TaskStarting => {
                if let (Some(task), Some(id)) = (&e.task, e.id) {
                    println!("[starting] task={task} id={id}");
                }
            }
            EventKind::TaskCompleted => {
                if let (Some(task), Some(id)) = (&e.task, e.id) {
                    println!(
                        "[completed] task={task} id={id} elapsed={:.3}s estimate={}s",
                        e.elapsed_secs().unwrap_or(0.0),
                        e.estimate_s.unwrap_or(0)
                    );
                }
            }
            EventKind::TaskCancelled => {
                if let (Some(task), Some(id)) = (&e.task, e.id) {
                    println!(
                        "[cancelled] task={task} id={id} elapsed={:.3}s",
                        e.elapsed_secs().unwrap_or(0.0)
                    );
                }
            }
            EventKind::TaskRemoved => {
                if let (Some(task), Some(id)) = (&e.task, e.id) {
                    println!("[removed] task={task} id={id}");
                }
            }
            EventKind::RegistryChanged => {
                println!("[registry-changed]");
            }
            EventKind::TurnStarting => {
                if let (Some(task), Some(n)) = (&e.task, e.turn) {
                    println!("[turn] task={task} n={n}");
                }
            }
            EventKind::BatchFinished => {
                if let Some(summary) = &e.summary {
                    println!(
                        "[batch-finished] description={} turns={} total={}s",
                        summary.description,
                        summary.turns.len(),
                        summary.total_estimated.as_secs()
                    );
                }
            }
            EventKind::BatchAborted => {
                println!(
                    "[batch-aborted] completed={} reason={}",
                    e.turn.unwrap_or(0),
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStoppedWithin => {
                println!("[all-stopped-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
