/*!
 * Unguarded Baseline
 *
 * No exclusivity at all. Kept as the negative control every harness run
 * is validated against: if the harness cannot catch this one, it cannot
 * catch anything.
 */

use super::{Attempt, Exclusivity};
use crate::core::sequence::StoreMonitor;

/// No synchronization: the body runs immediately on the calling thread
///
/// The race is the textbook check-then-act: two threads both pass the
/// containment check while neither has appended yet, then both append.
/// Nothing here even tries to prevent that.
#[derive(Debug, Default)]
pub struct Unguarded;

impl Exclusivity for Unguarded {
    const CHECK_FIRST: bool = true;
    const CHECK_HELD: bool = false;
    const NAME: &'static str = "unguarded";

    #[inline(always)]
    fn enter<R>(&self, _monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        Attempt::Ran(body())
    }
}
