//! # Event subscribers for the worksim runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`]
//! fan-out, and built-in subscribers for the two external collaborators the
//! runtime notifies:
//!
//! - [`CompletionLog`] — append-only file log, one line per naturally
//!   completed task;
//! - [`ConsoleWriter`] — stdout printer for demos and debugging.
//!
//! ## Architecture
//! ```text
//! Bus ──► supervisor listener ──► SubscriberSet::emit(&Event)
//!                                   ├──► [queue] ─► worker ─► CompletionLog
//!                                   ├──► [queue] ─► worker ─► ConsoleWriter
//!                                   └──► [queue] ─► worker ─► custom
//! ```

mod completion_log;
mod console;
mod set;
mod subscribe;

pub use completion_log::{CompletionLog, DEFAULT_LOG_PATH};
pub use console::ConsoleWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
