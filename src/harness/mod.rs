/*!
 * Stress Harness
 *
 * Drives disciplines through sequential and contended scenarios and
 * verifies what came out: final count, pairwise distinctness, and
 * whether any worker crashed instead of miscounting.
 *
 * # Architecture
 *
 * - [`correctness`]: scenario runners producing a verifiable [`RunReport`]
 * - [`throughput`]: timed contended runs with a mandatory duplicate scan
 * - [`observe`]: tracing setup and the drop-timed run span
 *
 * The harness's own shared state (failure queue, barriers) leans on
 * primitives whose correctness is taken as given; the disciplines under
 * test are the only place that question is open.
 *
 * [`RunReport`]: correctness::RunReport
 */

use std::any::Any;

pub mod correctness;
pub mod observe;
pub mod throughput;

pub use correctness::{demonstrate_broken, run_contended, run_disjoint, run_sequential, RunReport};
pub use observe::{init_tracing, RunSpan};
pub use throughput::{measure, profile, ThroughputSample};

/// A worker that crashed during a run, with the captured panic text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFailure {
    /// Index of the crashed worker
    pub worker: usize,
    /// Stringified panic payload
    pub detail: String,
}

/// Count pairs of equal elements at distinct indices
///
/// Elements promise equality and nothing else, so the scan is pairwise
/// and O(n^2). Post-run populations are small.
pub fn duplicate_pairs<T: PartialEq>(items: &[T]) -> usize {
    let mut pairs = 0;
    for (i, left) in items.iter().enumerate() {
        for right in &items[i + 1..] {
            if left == right {
                pairs += 1;
            }
        }
    }
    pairs
}

/// Number of distinct values in `values`, by pairwise equality
pub fn distinct_count<T: PartialEq>(values: &[T]) -> usize {
    let mut distinct = 0;
    for (i, value) in values.iter().enumerate() {
        if !values[..i].contains(value) {
            distinct += 1;
        }
    }
    distinct
}

/// Render a panic payload into something reportable
pub(crate) fn panic_detail(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
