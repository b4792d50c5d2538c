/*!
 * Adaptive Flag Lock
 *
 * The corrected flag acquisition with an escalating wait between failed
 * attempts: stay hot for the first attempts, then hint the CPU, then
 * sleep, retrying without bound. Same guarantee as the other correct
 * strategies; only the scheduling behavior differs.
 */

use super::{Attempt, Exclusivity, FlagRelease};
use crate::core::config::BackoffConfig;
use crate::core::sequence::StoreMonitor;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Protected test-and-set flag with spin/hint/sleep escalation
///
/// # Performance
///
/// - Short contention: won within the hot-spin tier, no syscall
/// - Long contention: parked in millisecond sleeps, near-zero CPU
///
/// Acquisition loops inside [`enter`] until won, so the caller's outer
/// loop runs exactly once per add.
///
/// [`enter`]: Exclusivity::enter
#[derive(Debug)]
pub struct AdaptiveFlag {
    flag: AtomicBool,
    backoff: BackoffConfig,
}

impl AdaptiveFlag {
    /// Create with a custom escalation policy
    pub fn with_backoff(backoff: BackoffConfig) -> Self {
        Self {
            flag: AtomicBool::new(false),
            backoff,
        }
    }

    /// The active escalation policy
    #[inline]
    pub fn backoff(&self) -> BackoffConfig {
        self.backoff
    }

    /// One protected test-and-set attempt
    ///
    /// The monitor makes the clear-to-set transition exclusive; a read
    /// outside it rejects cheaply while the flag is visibly held.
    #[inline]
    fn try_acquire(&self, monitor: &StoreMonitor) -> bool {
        if self.flag.load(Ordering::Acquire) {
            return false;
        }
        let _held = monitor.lock();
        if self.flag.load(Ordering::Acquire) {
            return false;
        }
        self.flag.store(true, Ordering::Release);
        true
    }
}

impl Default for AdaptiveFlag {
    fn default() -> Self {
        Self::with_backoff(BackoffConfig::default())
    }
}

impl Exclusivity for AdaptiveFlag {
    const CHECK_FIRST: bool = true;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "adaptive-flag";

    fn enter<R>(&self, monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        let mut attempt: u32 = 0;
        while !self.try_acquire(monitor) {
            if attempt == self.backoff.hinted_limit {
                trace!(
                    attempts = attempt,
                    "flag still contended, escalating to timed sleep"
                );
            }
            self.backoff.back_off(attempt);
            attempt = attempt.saturating_add(1);
        }

        let _release = FlagRelease::armed(&self.flag);
        Attempt::Ran(body())
    }
}
