//! # Simulated duration menu.
//!
//! Every task gets its duration from a fixed menu of whole-second values,
//! drawn uniformly at random at creation time. The draw happens once; the
//! estimate never changes afterwards.

use std::time::Duration;

use rand::Rng;

/// The fixed menu of simulated durations, in seconds.
pub const DURATION_MENU_SECS: [u64; 4] = [3, 5, 10, 30];

/// Draws an estimate uniformly from [`DURATION_MENU_SECS`].
pub(crate) fn draw_estimate() -> Duration {
    let mut rng = rand::rng();
    let idx = rng.random_range(0..DURATION_MENU_SECS.len());
    Duration::from_secs(DURATION_MENU_SECS[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_draws_stay_on_the_menu() {
        for _ in 0..256 {
            let est = draw_estimate();
            assert!(
                DURATION_MENU_SECS.contains(&est.as_secs()),
                "estimate {est:?} not on the menu"
            );
        }
    }

    #[test]
    fn test_every_menu_value_is_reachable() {
        let mut seen = HashSet::new();
        for _ in 0..512 {
            seen.insert(draw_estimate().as_secs());
        }
        for secs in DURATION_MENU_SECS {
            assert!(seen.contains(&secs), "{secs}s never drawn in 512 tries");
        }
    }
}
