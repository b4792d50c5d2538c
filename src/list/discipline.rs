/*!
 * Discipline Registry
 *
 * Enumerated constructors for every concurrency-control discipline, so a
 * harness iterates and builds variants explicitly instead of resolving
 * implementation names at runtime.
 */

use super::strategy::{
    AdaptiveFlag, CasSpin, CheckedFlag, Exclusivity, NaiveFlag, ReentrantBlocking, ReentrantYield,
    StoreLock, Unguarded, WholeOpMutex,
};
use super::{ConcurrentAdd, UniqueList};
use crate::core::sequence::Sequence;
use std::sync::Arc;

/// Every unique-list discipline, in the order they are usually compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// No synchronization; negative control
    Unguarded,
    /// One mutex serializing the whole operation
    WholeOpMutex,
    /// Block-level lock on the backing store's own monitor
    StoreLock,
    /// Compare-and-set spin flag, no backoff
    CasSpin,
    /// Reentrant lock, blocking acquisition
    ReentrantBlocking,
    /// Reentrant lock, try-acquire loop with yields
    ReentrantYield,
    /// Broken double-checked flag; negative control
    NaiveFlag,
    /// Corrected double-checked flag
    CheckedFlag,
    /// Protected flag with spin/hint/sleep escalation
    AdaptiveFlag,
}

impl Discipline {
    /// All disciplines, comparison order
    pub const ALL: [Discipline; 9] = [
        Discipline::Unguarded,
        Discipline::WholeOpMutex,
        Discipline::StoreLock,
        Discipline::CasSpin,
        Discipline::ReentrantBlocking,
        Discipline::ReentrantYield,
        Discipline::NaiveFlag,
        Discipline::CheckedFlag,
        Discipline::AdaptiveFlag,
    ];

    /// Stable name, identical to the strategy's own
    pub const fn name(self) -> &'static str {
        match self {
            Discipline::Unguarded => Unguarded::NAME,
            Discipline::WholeOpMutex => WholeOpMutex::NAME,
            Discipline::StoreLock => StoreLock::NAME,
            Discipline::CasSpin => CasSpin::NAME,
            Discipline::ReentrantBlocking => ReentrantBlocking::NAME,
            Discipline::ReentrantYield => ReentrantYield::NAME,
            Discipline::NaiveFlag => NaiveFlag::NAME,
            Discipline::CheckedFlag => CheckedFlag::NAME,
            Discipline::AdaptiveFlag => AdaptiveFlag::NAME,
        }
    }

    /// Whether this discipline is expected to preserve uniqueness under
    /// contention; the two negative controls answer false
    pub const fn is_sound(self) -> bool {
        !matches!(self, Discipline::Unguarded | Discipline::NaiveFlag)
    }

    /// Build a list with a fresh empty backing store
    pub fn build<T>(self) -> Arc<dyn ConcurrentAdd<T>>
    where
        T: PartialEq + Clone + Send + Sync + 'static,
    {
        self.build_over(Sequence::new())
    }

    /// Build a list over a caller-supplied backing store
    pub fn build_over<T>(self, store: Sequence<T>) -> Arc<dyn ConcurrentAdd<T>>
    where
        T: PartialEq + Clone + Send + Sync + 'static,
    {
        match self {
            Discipline::Unguarded => Arc::new(UniqueList::<T, Unguarded>::over(store)),
            Discipline::WholeOpMutex => Arc::new(UniqueList::<T, WholeOpMutex>::over(store)),
            Discipline::StoreLock => Arc::new(UniqueList::<T, StoreLock>::over(store)),
            Discipline::CasSpin => Arc::new(UniqueList::<T, CasSpin>::over(store)),
            Discipline::ReentrantBlocking => {
                Arc::new(UniqueList::<T, ReentrantBlocking>::over(store))
            }
            Discipline::ReentrantYield => Arc::new(UniqueList::<T, ReentrantYield>::over(store)),
            Discipline::NaiveFlag => Arc::new(UniqueList::<T, NaiveFlag>::over(store)),
            Discipline::CheckedFlag => Arc::new(UniqueList::<T, CheckedFlag>::over(store)),
            Discipline::AdaptiveFlag => Arc::new(UniqueList::<T, AdaptiveFlag>::over(store)),
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
