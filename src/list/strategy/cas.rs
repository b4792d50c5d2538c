/*!
 * CAS Spin-Flag
 *
 * An atomic boolean won by compare-and-set. Admission failure sends the
 * caller straight back around its outer loop with no backoff at all, so
 * contention burns CPU. The adaptive strategy exists to improve on
 * exactly that trade.
 */

use super::{Attempt, Exclusivity, FlagRelease};
use crate::core::sequence::StoreMonitor;
use std::sync::atomic::{AtomicBool, Ordering};

/// Spin on `compare_exchange(false -> true)` until won
///
/// The relaxed pre-read keeps a contended flag from bouncing the cache
/// line on every attempt; the compare-exchange still decides admission.
#[derive(Debug, Default)]
pub struct CasSpin {
    flag: AtomicBool,
}

impl Exclusivity for CasSpin {
    const CHECK_FIRST: bool = true;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "cas-spin";

    #[inline]
    fn enter<R>(&self, _monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        if self.flag.load(Ordering::Relaxed) {
            return Attempt::Contended;
        }
        if self
            .flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Attempt::Contended;
        }

        let _release = FlagRelease::armed(&self.flag);
        Attempt::Ran(body())
    }
}
