/*!
 * Runtime Configuration
 *
 * Tunable policies for flag-acquisition backoff and harness stress runs
 */

use std::thread;
use std::time::Duration;

/// Escalation policy for a contended flag acquisition
///
/// Failed attempts escalate in three tiers: stay hot on the CPU for the
/// first `spin_limit` attempts, issue a spin-loop hint up to
/// `hinted_limit`, then sleep between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Attempts below this retry immediately
    pub spin_limit: u32,
    /// Attempts below this issue a spin-loop hint between retries
    pub hinted_limit: u32,
    /// Sleep between attempts once past `hinted_limit`
    pub sleep: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            spin_limit: 100,
            hinted_limit: 1_000,
            sleep: Duration::from_millis(1),
        }
    }
}

impl BackoffConfig {
    /// Policy for short expected waits: burn CPU longer before sleeping
    pub const fn low_latency() -> Self {
        Self {
            spin_limit: 500,
            hinted_limit: 5_000,
            sleep: Duration::from_micros(100),
        }
    }

    /// Policy for long expected waits: give the core up early
    pub const fn long_wait() -> Self {
        Self {
            spin_limit: 10,
            hinted_limit: 50,
            sleep: Duration::from_millis(5),
        }
    }

    /// Apply the escalation tier for a failed acquisition attempt
    #[inline]
    pub fn back_off(&self, attempt: u32) {
        if attempt < self.spin_limit {
            // Hot retry; the flag is expected to clear within a few cycles
        } else if attempt < self.hinted_limit {
            std::hint::spin_loop();
        } else {
            thread::sleep(self.sleep);
        }
    }

    /// Whether the given attempt count has reached the sleeping tier
    #[inline(always)]
    pub fn is_sleeping_tier(&self, attempt: u32) -> bool {
        attempt >= self.hinted_limit
    }
}

/// Knobs for a contended harness run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressConfig {
    /// Worker threads released together by the start barrier
    pub workers: usize,
    /// Passes over the input values per worker
    pub rounds: usize,
    /// Pause before and after each add, widening interleavings
    pub op_pause: Option<Duration>,
    /// Artificial latency injected into every append of the backing store
    pub store_latency: Option<Duration>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            rounds: 100,
            op_pause: None,
            store_latency: None,
        }
    }
}

impl StressConfig {
    /// The heavy same-values interleaving scenario: many workers racing
    /// over a tiny value set with pauses around each add
    pub const fn contention() -> Self {
        Self {
            workers: 100,
            rounds: 100,
            op_pause: Some(Duration::from_millis(1)),
            store_latency: None,
        }
    }

    /// The disjoint no-lost-update scenario: few workers, slow store,
    /// every worker contributing values nobody else contributes
    pub const fn disjoint() -> Self {
        Self {
            workers: 10,
            rounds: 10,
            op_pause: None,
            store_latency: Some(Duration::from_millis(10)),
        }
    }

    /// Scaled-down settings for fast test runs
    pub const fn quick() -> Self {
        Self {
            workers: 8,
            rounds: 50,
            op_pause: None,
            store_latency: None,
        }
    }

    /// Total add calls a run of this shape performs
    #[inline]
    pub fn total_ops(&self, values_per_round: usize) -> usize {
        self.workers * self.rounds * values_per_round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_backoff_defaults() {
        let config = BackoffConfig::default();
        assert_eq!(config.spin_limit, 100);
        assert_eq!(config.hinted_limit, 1_000);
        assert_eq!(config.sleep, Duration::from_millis(1));
    }

    #[test]
    fn test_backoff_tiers() {
        let config = BackoffConfig::default();
        assert!(!config.is_sleeping_tier(0));
        assert!(!config.is_sleeping_tier(999));
        assert!(config.is_sleeping_tier(1_000));
    }

    #[test]
    fn test_spin_tiers_do_not_sleep() {
        let config = BackoffConfig::default();
        let start = Instant::now();
        for attempt in 0..1_000 {
            config.back_off(attempt);
        }
        // Spin and hint tiers must complete far below one sleep quantum
        assert!(start.elapsed() < config.sleep * 10);
    }

    #[test]
    fn test_stress_presets() {
        let contention = StressConfig::contention();
        assert_eq!(contention.workers, 100);
        assert_eq!(contention.rounds, 100);
        assert!(contention.op_pause.is_some());

        let disjoint = StressConfig::disjoint();
        assert_eq!(disjoint.total_ops(1), 100);
        assert!(disjoint.store_latency.is_some());
    }
}
