/*!
 * Backing Sequence
 *
 * Ordered, growable, insertion-order-preserving store with no uniqueness
 * invariant of its own. Callers own all uniqueness reasoning.
 *
 * # Design: Primitive Atomicity Only
 *
 * Each operation takes a short read/write lock so a single `contains`,
 * `append` or `get` is internally consistent (no torn length-vs-contents
 * reads). Nothing here makes *compound* sequences atomic: two threads can
 * both observe "absent" and both append. That check-then-act window is
 * exactly what the disciplines layered on top either close or fail to
 * close, so it must stay open at this level.
 *
 * # Performance
 *
 * `contains` is a deliberate O(n) equality scan. The scan cost is what
 * widens the race window enough to observe, and what forces protected
 * disciplines to re-check containment after acquiring exclusivity.
 */

use crate::core::errors::{ListError, ListResult};
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::thread;
use std::time::Duration;

/// Per-store monitor usable as a block-level lock object
///
/// The analogue of locking "the store itself": disciplines that guard a
/// critical section on the shared store take this monitor rather than a
/// lock of their own.
#[derive(Debug, Default)]
pub struct StoreMonitor {
    inner: Mutex<()>,
}

impl StoreMonitor {
    /// Block until the monitor is held
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock()
    }

    /// Acquire without blocking; `None` when another thread holds it
    #[inline]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.inner.try_lock()
    }
}

/// Ordered backing store for a unique list
///
/// # Type Parameters
///
/// - `T`: element type; equality-comparable, no ordering or hashing needed
pub struct Sequence<T> {
    cells: RwLock<Vec<T>>,
    monitor: StoreMonitor,
    append_latency: Option<Duration>,
}

impl<T: PartialEq + Clone> Sequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self {
            cells: RwLock::new(Vec::new()),
            monitor: StoreMonitor::default(),
            append_latency: None,
        }
    }

    /// Create an empty sequence whose `append` sleeps before writing
    ///
    /// Harness stress runs inject latency here to hold races open long
    /// enough to observe, and to verify exclusivity spans the entire
    /// append rather than just the containment check.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            cells: RwLock::new(Vec::new()),
            monitor: StoreMonitor::default(),
            append_latency: Some(latency),
        }
    }

    /// Whether an equal element is already stored
    ///
    /// # Performance
    ///
    /// O(n) equality scan by construction; see module docs.
    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.cells.read().iter().any(|cell| cell == element)
    }

    /// Append unconditionally; always reports true
    ///
    /// Uniqueness is not this container's concern. The injected latency,
    /// when configured, elapses before the write lands, matching a slow
    /// store whose mutation takes real time.
    #[inline]
    pub fn append(&self, element: T) -> bool {
        if let Some(latency) = self.append_latency {
            thread::sleep(latency);
        }
        self.cells.write().push(element);
        true
    }

    /// Element at `index`, or an out-of-range error
    ///
    /// Written entries are stable: once an index is readable its element
    /// never changes.
    pub fn get(&self, index: usize) -> ListResult<T> {
        let cells = self.cells.read();
        cells.get(index).cloned().ok_or(ListError::IndexOutOfRange {
            index,
            len: cells.len(),
        })
    }

    /// Current entry count
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    /// Whether the sequence holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }

    /// Copy of the current contents, in insertion order
    pub fn snapshot(&self) -> Vec<T> {
        self.cells.read().clone()
    }

    /// The store's own monitor, for block-level locking disciplines
    #[inline(always)]
    pub fn monitor(&self) -> &StoreMonitor {
        &self.monitor
    }

    /// Configured artificial append latency, if any
    #[inline]
    pub fn latency(&self) -> Option<Duration> {
        self.append_latency
    }
}

impl<T: PartialEq + Clone> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_append_preserves_order() {
        let seq = Sequence::new();
        assert!(seq.is_empty());

        assert!(seq.append("one"));
        assert!(seq.append("two"));
        assert!(seq.append("one")); // no uniqueness at this level

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.snapshot(), vec!["one", "two", "one"]);
    }

    #[test]
    fn test_contains_scans_by_equality() {
        let seq = Sequence::new();
        seq.append(10u32);
        seq.append(20);

        assert!(seq.contains(&10));
        assert!(seq.contains(&20));
        assert!(!seq.contains(&30));
    }

    #[test]
    fn test_get_in_and_out_of_range() {
        let seq = Sequence::new();
        seq.append("alpha");

        assert_eq!(seq.get(0), Ok("alpha"));
        assert_eq!(
            seq.get(3),
            Err(ListError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_latency_applies_to_append_only() {
        let seq = Sequence::with_latency(Duration::from_millis(20));
        assert_eq!(seq.latency(), Some(Duration::from_millis(20)));

        let start = Instant::now();
        seq.append(1u32);
        assert!(start.elapsed() >= Duration::from_millis(20));

        // Reads stay fast
        let start = Instant::now();
        assert!(seq.contains(&1));
        assert_eq!(seq.get(0), Ok(1));
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[test]
    fn test_monitor_excludes_and_releases() {
        let seq = Sequence::<u32>::new();

        let held = seq.monitor().lock();
        assert!(seq.monitor().try_lock().is_none());
        drop(held);
        assert!(seq.monitor().try_lock().is_some());
    }

    #[test]
    fn test_concurrent_appends_all_land() {
        let seq = Arc::new(Sequence::new());
        let mut handles = vec![];

        for worker in 0..8u32 {
            let seq = seq.clone();
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    seq.append(worker * 100 + j);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // Per-op atomicity: every push lands exactly once
        assert_eq!(seq.len(), 800);
    }
}
