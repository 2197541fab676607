//! # Append-only completion log.
//!
//! [`CompletionLog`] appends one line per naturally-completed task to a file:
//!
//! ```text
//! Tarea completada: <description> - Tiempo: <elapsed> s
//! ```
//!
//! Cancelled tasks never reach this log: the runner publishes no
//! `TaskCompleted` event for them.
//!
//! Writes are best-effort: a failed append is reported to stderr and the
//! completing task is unaffected. No retry.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Default log file name, kept from the application this runtime mirrors.
pub const DEFAULT_LOG_PATH: &str = "registro_tareas.txt";

/// Subscriber that appends a line per naturally-completed task.
pub struct CompletionLog {
    path: PathBuf,
}

impl CompletionLog {
    /// Creates a log writer appending to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

impl Default for CompletionLog {
    /// Appends to `registro_tareas.txt` in the working directory.
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

#[async_trait]
impl Subscribe for CompletionLog {
    async fn on_event(&self, event: &Event) {
        if event.kind != EventKind::TaskCompleted {
            return;
        }
        let (Some(task), Some(secs)) = (&event.task, event.elapsed_secs()) else {
            return;
        };

        let line = format!("Tarea completada: {task} - Tiempo: {secs:.3} s\n");
        if let Err(err) = self.append(&line).await {
            eprintln!(
                "[worksim] completion log append to {:?} failed: {err}",
                self.path
            );
        }
    }

    fn name(&self) -> &'static str {
        "completion-log"
    }
}
