//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the registry, task runners,
//! the turn-based coordinator, and the supervisor.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Registry` (add/remove), `runner::drive` (start,
//!   completion, cancellation), the coordinator (turns, batch summary),
//!   `Supervisor` (shutdown progress).
//! - **Consumers**: the supervisor's fan-out listener (feeds the
//!   `SubscriberSet`) and any direct `Bus::subscribe` receiver.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
