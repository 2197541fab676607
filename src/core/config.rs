//! # Global runtime configuration.
//!
//! Provides [`Config`], centralized settings for the supervisor runtime.
//!
//! Config is used at supervisor construction:
//! `Supervisor::builder(config).with_subscribers(...).build()`.

use std::time::Duration;

/// Global configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `turn_pause`: mandatory pause inserted between turn-based workers
/// - `grace`: maximum wait for runners to stop during shutdown
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Pause inserted after each turn-based worker terminates, before the
    /// next worker is created. Not applied after the last worker.
    pub turn_pause: Duration,

    /// Maximum time to wait for task runners to finish during shutdown.
    ///
    /// When `Supervisor::shutdown` is called:
    /// - running tasks are cancelled via the runtime token
    /// - the supervisor waits up to `grace` for runners to exit
    /// - overrunning the window yields `RuntimeError::GraceExceeded`
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages
    /// will receive `Lagged` and skip older items. Minimum value is 1.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `turn_pause = 1s` (the fixed inter-turn hand-off pause)
    /// - `grace = 5s` (cancelled runners exit promptly; 5s is generous)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            turn_pause: Duration::from_secs(1),
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}
