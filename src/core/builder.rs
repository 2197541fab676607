//! # SupervisorBuilder: wires the runtime together.
//!
//! Construction order matters: the bus comes first, the subscriber fan-out
//! attaches to it, then the registry and supervisor share the runtime token.
//! `build()` spawns the fan-out listener, so it must be called within a
//! tokio runtime.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::registry::Registry;
use crate::core::supervisor::Supervisor;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing a [`Supervisor`].
pub struct SupervisorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (task lifecycle, refresh signals,
    /// batch summaries) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds a single subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds and returns the supervisor.
    ///
    /// Initializes the event bus, the subscriber workers, and the registry,
    /// and spawns the bus → subscriber-set forwarding listener. Must be
    /// called within a tokio runtime.
    pub fn build(self) -> Arc<Supervisor> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers));
        let runtime_token = CancellationToken::new();
        let registry = Registry::new(bus.clone(), runtime_token.clone());

        spawn_listener(&bus, Arc::clone(&subs));

        Arc::new(Supervisor::new_internal(
            self.cfg,
            bus,
            subs,
            registry,
            runtime_token,
        ))
    }
}

/// Forwards bus events to the subscriber set until the channel closes.
///
/// A lagged receiver skips the missed items and keeps going; only a closed
/// channel (all senders dropped) ends the listener.
fn spawn_listener(bus: &Bus, subs: Arc<SubscriberSet>) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(missed)) => {
                    eprintln!("[worksim] subscriber listener lagged, skipped {missed} event(s)");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
