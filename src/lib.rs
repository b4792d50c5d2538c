/*!
 * uniq-list Library
 *
 * A unique list (insert-if-absent over an ordered store) built once and
 * gated nine different ways, from no exclusion at all to adaptive
 * flag-based locking, plus the harnesses that show which gates hold up
 * under contention and at what cost.
 */

pub mod core;
pub mod harness;
pub mod list;

// Re-exports
pub use crate::core::{
    BackoffConfig, HarnessError, HarnessResult, ListError, ListResult, Sequence, StoreMonitor,
    StressConfig,
};
pub use crate::harness::{
    demonstrate_broken, distinct_count, duplicate_pairs, init_tracing, measure, profile,
    run_contended, run_disjoint, run_sequential, RunReport, RunSpan, ThroughputSample,
    WorkerFailure,
};
pub use crate::list::{
    AdaptiveFlag, Attempt, CasSpin, CheckedFlag, ConcurrentAdd, Discipline, Exclusivity, NaiveFlag,
    ReentrantBlocking, ReentrantYield, StoreLock, Unguarded, UniqueList, WholeOpMutex,
};
