/*!
 * Double-Checked Flag Strategies
 *
 * A single visible-across-threads boolean used as the gate, in two
 * renditions:
 * - [`NaiveFlag`]: the classic broken form. The flag is read outside any
 *   protection and only its *write* happens under the monitor, so the
 *   read-then-branch is not atomic with the write that follows it.
 * - [`CheckedFlag`]: the one-line fix. The flag is read a second time
 *   under the monitor before being set, so exactly one thread wins the
 *   clear-to-set transition.
 *
 * The pair demonstrates that visibility alone (publish a flag) is not
 * exclusivity: the flag's read-modify-write still needs mutual exclusion.
 * `NaiveFlag` is a negative control and must keep its bug: the flag is
 * read and written with plain loads and stores, never an atomic
 * test-and-set, since an atomic upgrade would erase the race under study.
 */

use super::{Attempt, Exclusivity, FlagRelease};
use crate::core::sequence::StoreMonitor;
use std::sync::atomic::{AtomicBool, Ordering};

/// Broken double-checked flag: unprotected read, protected write only
///
/// Two failure modes follow from the unprotected read-then-branch:
/// duplicate admission (two threads both observe the flag clear before
/// either stores it, then both run the body) and silent abandonment (a
/// thread that observes the flag set gives up the attempt entirely
/// instead of retrying).
#[derive(Debug, Default)]
pub struct NaiveFlag {
    flag: AtomicBool,
}

impl Exclusivity for NaiveFlag {
    const CHECK_FIRST: bool = false;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "naive-flag";

    fn enter<R>(&self, monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        // Unprotected read-then-branch: the decision to proceed is made
        // here and nothing ties it to the write below.
        if self.flag.load(Ordering::Acquire) {
            return Attempt::Abandoned;
        }
        {
            let _held = monitor.lock();
            // The flag is not read again under the monitor. Threads that
            // observed it clear above pass through here one at a time and
            // each leaves convinced it owns the section.
            self.flag.store(true, Ordering::Release);
        }
        // The body runs outside the monitor, guarded only by the flag.
        let _release = FlagRelease::armed(&self.flag);
        Attempt::Ran(body())
    }
}

/// Corrected double-checked flag: the read under the monitor decides
///
/// Identical to [`NaiveFlag`] except for the second flag read inside the
/// monitor, which makes the clear-to-set transition exclusive, and the
/// contended outcome, which retries instead of abandoning.
#[derive(Debug, Default)]
pub struct CheckedFlag {
    flag: AtomicBool,
}

impl Exclusivity for CheckedFlag {
    const CHECK_FIRST: bool = true;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "checked-flag";

    fn enter<R>(&self, monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        // Cheap unprotected read first; the monitor section decides.
        if self.flag.load(Ordering::Acquire) {
            return Attempt::Contended;
        }
        {
            let _held = monitor.lock();
            if self.flag.load(Ordering::Acquire) {
                return Attempt::Contended;
            }
            self.flag.store(true, Ordering::Release);
        }
        let _release = FlagRelease::armed(&self.flag);
        Attempt::Ran(body())
    }
}
