/*!
 * Unique List
 *
 * Insert-if-absent over an ordered backing store, one generic algorithm
 * parameterized over how exclusivity is gained.
 *
 * # Design: One Generic Algorithm
 *
 * Every discipline runs the same loop: optionally check containment
 * unguarded, attempt admission through the [`Exclusivity`] gate, re-check
 * containment inside the critical section when the discipline says to,
 * append if absent. Contended attempts go back around the loop, so the
 * unguarded pre-check repeats per retry; abandoned attempts return false
 * without inserting (only the broken naive flag does that). The nine
 * disciplines are configurations of this loop, not nine list types.
 */

use crate::core::errors::ListResult;
use crate::core::sequence::Sequence;

pub mod discipline;
pub mod strategy;

pub use discipline::Discipline;
pub use strategy::{
    AdaptiveFlag, Attempt, CasSpin, CheckedFlag, Exclusivity, NaiveFlag, ReentrantBlocking,
    ReentrantYield, StoreLock, Unguarded, WholeOpMutex,
};

/// The contract every discipline serves, object-safe for harness use
///
/// `add` inserts iff no equal element is present and reports whether this
/// call inserted. It may block, spin, or return immediately depending on
/// the discipline behind it.
pub trait ConcurrentAdd<T>: Send + Sync {
    /// Insert `element` if absent; true iff this call inserted it
    fn add(&self, element: T) -> bool;

    /// Current entry count
    fn len(&self) -> usize;

    /// Whether no entries are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or an out-of-range error
    fn get(&self, index: usize) -> ListResult<T>;

    /// Copy of the current contents, in insertion order
    fn snapshot(&self) -> Vec<T>;

    /// Name of the discipline answering these calls
    fn discipline_name(&self) -> &'static str;
}

/// Unique ordered list over a pluggable exclusivity strategy
///
/// Wraps exactly one [`Sequence`] and upholds: at every quiescent point,
/// no two entries at distinct indices are equal. Whether that invariant
/// also survives contention is precisely what the type parameter decides;
/// the two negative-control strategies are expected to break it.
///
/// # Type Parameters
///
/// - `T`: element type, equality-comparable and cloneable
/// - `X`: the exclusivity strategy gating the check-then-append section
///
/// # Examples
///
/// ```
/// use uniq_list::{UniqueList, WholeOpMutex};
///
/// let list = UniqueList::<_, WholeOpMutex>::new();
/// assert!(list.add("one"));
/// assert!(list.add("two"));
/// assert!(!list.add("one"));
/// assert_eq!(list.len(), 2);
/// ```
pub struct UniqueList<T, X> {
    store: Sequence<T>,
    gate: X,
}

impl<T, X> UniqueList<T, X>
where
    T: PartialEq + Clone,
    X: Exclusivity,
{
    /// Create over a fresh empty backing store
    pub fn new() -> Self {
        Self::over(Sequence::new())
    }

    /// Wrap a caller-supplied backing store
    ///
    /// The harness uses this to inject latency-carrying stores without
    /// the list code changing.
    pub fn over(store: Sequence<T>) -> Self {
        Self {
            store,
            gate: X::default(),
        }
    }

    /// Wrap a caller-supplied store with a non-default gate
    pub fn with_gate(store: Sequence<T>, gate: X) -> Self {
        Self { store, gate }
    }

    /// Insert `element` if no equal element is present
    ///
    /// Returns true iff this call performed the insertion. A false
    /// return means an equal element was already present (or, for the
    /// naive flag discipline, that the attempt was dropped).
    ///
    /// # Performance
    ///
    /// Hot path. Containment scans are O(n); how often they repeat is
    /// the strategy's retry discipline.
    pub fn add(&self, element: T) -> bool {
        loop {
            if X::CHECK_FIRST && self.store.contains(&element) {
                return false;
            }

            let outcome = self.gate.enter(self.store.monitor(), || {
                if X::CHECK_HELD && self.store.contains(&element) {
                    false
                } else {
                    self.store.append(element.clone())
                }
            });

            match outcome {
                Attempt::Ran(inserted) => return inserted,
                Attempt::Contended => continue,
                Attempt::Abandoned => return false,
            }
        }
    }

    /// Current entry count
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no entries are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Element at `index`, or an out-of-range error
    ///
    /// Entries are stable once written; an index that was valid stays
    /// valid and keeps its element.
    #[inline]
    pub fn get(&self, index: usize) -> ListResult<T> {
        self.store.get(index)
    }

    /// Copy of the current contents, in insertion order
    pub fn snapshot(&self) -> Vec<T> {
        self.store.snapshot()
    }

    /// Name of the active exclusivity strategy
    #[inline]
    pub fn discipline_name(&self) -> &'static str {
        X::NAME
    }
}

impl<T, X> Default for UniqueList<T, X>
where
    T: PartialEq + Clone,
    X: Exclusivity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, X> ConcurrentAdd<T> for UniqueList<T, X>
where
    T: PartialEq + Clone + Send + Sync + 'static,
    X: Exclusivity,
{
    #[inline]
    fn add(&self, element: T) -> bool {
        UniqueList::add(self, element)
    }

    #[inline]
    fn len(&self) -> usize {
        UniqueList::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> ListResult<T> {
        UniqueList::get(self, index)
    }

    fn snapshot(&self) -> Vec<T> {
        UniqueList::snapshot(self)
    }

    fn discipline_name(&self) -> &'static str {
        UniqueList::discipline_name(self)
    }
}
