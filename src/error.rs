//! Error types used by the worksim runtime.
//!
//! A single enum, [`RuntimeError`], covers faults of the orchestration layer
//! itself. Simulated tasks cannot fail: they either run their delay to the end
//! or get cancelled, and both outcomes are ordinary state transitions, not
//! errors. Invalid inputs (a worker count of zero) are substituted with
//! defaults rather than rejected.
//!
//! Helper methods (`as_label`, `as_message`) provide stable snake_case labels
//! and human-readable messages for logs.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the worksim runtime.
///
/// These represent failures of the coordination machinery, never of an
/// individual simulated task.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The turn-based coordinator was interrupted while waiting on a worker
    /// or during the inter-turn pause. Remaining turns are not started and
    /// the partial summary is discarded.
    #[error("turn batch interrupted after {completed_turns} completed turn(s); remaining turns aborted")]
    BatchInterrupted {
        /// Number of workers that reached a terminal state before the abort.
        completed_turns: usize,
    },

    /// Shutdown grace period was exceeded; some tasks were still not terminal
    /// when the window closed.
    #[error("shutdown grace {grace:?} exceeded; still running: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Descriptions of tasks that were not terminal in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::BatchInterrupted { .. } => "batch_interrupted",
            RuntimeError::GraceExceeded { .. } => "grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::BatchInterrupted { completed_turns } => {
                format!("batch interrupted; completed turns={completed_turns}")
            }
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck tasks={stuck:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let batch = RuntimeError::BatchInterrupted { completed_turns: 2 };
        assert_eq!(batch.as_label(), "batch_interrupted");

        let grace = RuntimeError::GraceExceeded {
            grace: Duration::from_secs(5),
            stuck: vec!["Worker 1".into()],
        };
        assert_eq!(grace.as_label(), "grace_exceeded");
    }

    #[test]
    fn test_messages_carry_details() {
        let batch = RuntimeError::BatchInterrupted { completed_turns: 3 };
        assert!(batch.as_message().contains("completed turns=3"));

        let grace = RuntimeError::GraceExceeded {
            grace: Duration::from_secs(5),
            stuck: vec!["Paint fence - Worker 2".into()],
        };
        assert!(grace.as_message().contains("Paint fence - Worker 2"));
    }
}
