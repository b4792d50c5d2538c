/*!
 * Exclusivity Strategies
 *
 * The pluggable capability behind every unique-list discipline: how a
 * thread gains the right to run the check-then-append critical section.
 *
 * # Design: One Algorithm, Many Gates
 *
 * Every discipline shares the shape *check containment, acquire
 * exclusivity, re-check containment, append if absent, release*. Rather
 * than one list type per discipline, `UniqueList` is generic over an
 * [`Exclusivity`] and the strategies differ only in how [`enter`] admits
 * the critical section and in which containment checks the shape keeps.
 * The two broken strategies are negative controls; their race windows
 * are documented where they are opened, and nothing here repairs them.
 *
 * [`enter`]: Exclusivity::enter
 */

use crate::core::sequence::StoreMonitor;
use std::sync::atomic::{AtomicBool, Ordering};

mod adaptive;
mod cas;
mod flag;
mod monitor;
mod mutex;
mod unguarded;

pub use adaptive::AdaptiveFlag;
pub use cas::CasSpin;
pub use flag::{CheckedFlag, NaiveFlag};
pub use monitor::StoreLock;
pub use mutex::{ReentrantBlocking, ReentrantYield, WholeOpMutex};
pub use unguarded::Unguarded;

/// Outcome of one admission attempt
///
/// Compact representation for efficient returns from the hot loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt<R> {
    /// The critical section ran; carries its result
    Ran(R),
    /// Exclusivity was unavailable; the caller retries its outer loop.
    /// Any politeness between attempts (yield, hint, sleep) has already
    /// happened inside the strategy.
    Contended,
    /// The gate was observed held and this strategy gives up instead of
    /// retrying. Only the naive flag does this; it is part of its bug.
    Abandoned,
}

/// Strategy for admitting one thread at a time to a critical section
///
/// Implementations must be:
/// - **Thread-safe**: `enter` is called from many threads at once
/// - **Balanced**: every successful admission releases on all exit
///   paths, including a panicking body
/// - **Self-contained**: lock state never escapes the strategy
///
/// # Shape Knobs
///
/// `CHECK_FIRST` runs an unguarded containment check before each
/// admission attempt (cheap rejection of known duplicates without
/// touching the gate). `CHECK_HELD` re-checks containment inside the
/// critical section, closing the window between the first check and the
/// acquisition. Which knobs a strategy sets is part of its discipline,
/// not an optimization choice.
pub trait Exclusivity: Default + Send + Sync + 'static {
    /// Run an unguarded containment check before each admission attempt
    const CHECK_FIRST: bool;
    /// Re-check containment inside the critical section
    const CHECK_HELD: bool;
    /// Strategy name for diagnostics and reports
    const NAME: &'static str;

    /// Attempt to run `body` under this strategy's exclusivity
    ///
    /// `monitor` is the backing store's own monitor; strategies that
    /// lock "the store itself" or guard their flag writes take it,
    /// everyone else ignores it.
    ///
    /// # Performance
    ///
    /// Hot path. Admission failure must be cheap; the caller loops.
    fn enter<R>(&self, monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R>;
}

/// Clears an acquisition flag on drop
///
/// Flag-based strategies arm one of these immediately after winning the
/// flag so release happens on every exit path out of the critical
/// section, including a panic unwinding through `enter`.
pub(crate) struct FlagRelease<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlagRelease<'a> {
    #[inline(always)]
    pub(crate) fn armed(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Drop for FlagRelease<'_> {
    #[inline]
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
