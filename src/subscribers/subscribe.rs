//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for plugging observers into
//! the runtime. This is the seam external collaborators attach to: a UI
//! refreshing its table on `RegistryChanged`, a log writer appending on
//! `TaskCompleted`, metrics, anything.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (a panicking subscriber never takes the runtime down)
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the event **for this subscriber only**; other
//!   subscribers are unaffected.
//! - Events are processed sequentially (FIFO) per subscriber.
//! - Subscribers do not block publishers or each other.
//! - `on_event` may be invoked from any worker thread; a consumer that needs
//!   single-threaded affinity (a UI thread) does its own marshalling.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use worksim::{Event, EventKind, Subscribe};
//!
//! struct RefreshCounter;
//!
//! #[async_trait]
//! impl Subscribe for RefreshCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::RegistryChanged) {
//!             // re-read a snapshot, repaint, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "refresh" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for runtime observability.
///
/// Each subscriber runs in isolation:
/// - **Bounded queue** buffers events (capacity via [`Self::queue_capacity`]).
/// - **Dedicated worker task** processes events sequentially (FIFO).
/// - **Panic isolation**: panics are caught and reported to stderr.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, not in the publisher context.
    /// Events are delivered in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in overflow/panic reports.
    ///
    /// Prefer short, descriptive names (e.g., "completion-log", "console").
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// On overflow the new event is dropped for this subscriber only and a
    /// report goes to stderr. The runtime clamps capacity to a minimum of 1.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
