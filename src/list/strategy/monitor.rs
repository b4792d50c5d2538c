/*!
 * Block-Level Store Lock
 *
 * Critical section held on the shared backing store's own monitor rather
 * than a lock private to the strategy.
 */

use super::{Attempt, Exclusivity};
use crate::core::sequence::StoreMonitor;

/// Lock the store itself around the check-then-append block
///
/// Equivalent safety to [`WholeOpMutex`] with a narrower critical
/// section: only the check-and-insert block excludes, and the lock
/// object is the store, so whoever else coordinates on that store's
/// monitor excludes against this discipline too.
///
/// [`WholeOpMutex`]: super::WholeOpMutex
#[derive(Debug, Default)]
pub struct StoreLock;

impl Exclusivity for StoreLock {
    const CHECK_FIRST: bool = false;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "store-lock";

    #[inline]
    fn enter<R>(&self, monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        let _held = monitor.lock();
        Attempt::Ran(body())
    }
}
