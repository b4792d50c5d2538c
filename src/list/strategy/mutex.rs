/*!
 * Mutex-Backed Strategies
 *
 * Three disciplines over mutual-exclusion primitives:
 * - [`WholeOpMutex`]: one plain mutex serializing the entire operation
 * - [`ReentrantBlocking`]: a reentrant lock acquired blocking, single attempt
 * - [`ReentrantYield`]: the same reentrant primitive via try-acquire,
 *   yielding the processor between attempts
 *
 * The two reentrant disciplines share their primitive: the contrast
 * under study is blocking versus yielding acquisition, not the lock
 * type.
 */

use super::{Attempt, Exclusivity};
use crate::core::sequence::StoreMonitor;
use parking_lot::{Mutex, ReentrantMutex};
use std::thread;

/// One mutex guarding the entire add body
///
/// Every call serializes, conflicting or not. The simplest correct
/// discipline and the throughput floor the others are measured against.
#[derive(Debug, Default)]
pub struct WholeOpMutex {
    gate: Mutex<()>,
}

impl Exclusivity for WholeOpMutex {
    const CHECK_FIRST: bool = false;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "whole-op-mutex";

    #[inline]
    fn enter<R>(&self, _monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        let _held = self.gate.lock();
        Attempt::Ran(body())
    }
}

/// Reentrant lock, blocking acquisition, single attempt
///
/// Blocks the caller until the lock is available, runs the guarded
/// check-then-append once, releases via the guard. No outer retry loop
/// exists because admission cannot fail.
#[derive(Debug, Default)]
pub struct ReentrantBlocking {
    gate: ReentrantMutex<()>,
}

impl Exclusivity for ReentrantBlocking {
    const CHECK_FIRST: bool = false;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "reentrant-blocking";

    #[inline]
    fn enter<R>(&self, _monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        let _held = self.gate.lock();
        Attempt::Ran(body())
    }
}

/// Reentrant lock, try-acquire in a retry loop, yielding between attempts
///
/// Behaves like the CAS spin-flag but backed by a real lock, and gives
/// the processor up on every failed attempt instead of spinning hot.
#[derive(Debug, Default)]
pub struct ReentrantYield {
    gate: ReentrantMutex<()>,
}

impl Exclusivity for ReentrantYield {
    const CHECK_FIRST: bool = true;
    const CHECK_HELD: bool = true;
    const NAME: &'static str = "reentrant-yield";

    #[inline]
    fn enter<R>(&self, _monitor: &StoreMonitor, body: impl FnOnce() -> R) -> Attempt<R> {
        match self.gate.try_lock() {
            Some(_held) => Attempt::Ran(body()),
            None => {
                thread::yield_now();
                Attempt::Contended
            }
        }
    }
}
