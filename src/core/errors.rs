/*!
 * Error Types
 * Centralized error handling with thiserror and miette diagnostics
 */

use miette::Diagnostic;
use thiserror::Error;

/// List access errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ListError {
    #[error("index {index} out of range for list of length {len}")]
    #[diagnostic(
        code(list::index_out_of_range),
        help("Indices are valid in 0..len() at call time. Under concurrent inserts, read len() immediately before get().")
    )]
    IndexOutOfRange { index: usize, len: usize },
}

/// Harness verification errors
///
/// Distinguishes the three ways a stress run can go wrong: a worker
/// crashed, the store holds equal elements at distinct indices, or the
/// final count disagrees with the distinct-input count.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum HarnessError {
    #[error("{discipline}: {count} worker(s) panicked during the run: {detail}")]
    #[diagnostic(
        code(harness::worker_panicked),
        help("A synchronization defect raised instead of corrupting the count. Inspect the captured panic detail.")
    )]
    WorkerPanicked {
        discipline: &'static str,
        count: usize,
        detail: String,
    },

    #[error("{discipline}: {count} duplicate pair(s) stored after the run")]
    #[diagnostic(
        code(harness::duplicate_entries),
        help("Two threads won the check-then-append race for the same value. Expected for the negative-control disciplines only.")
    )]
    DuplicateEntries {
        discipline: &'static str,
        count: usize,
    },

    #[error("{discipline}: expected {expected} distinct elements, final length is {actual}")]
    #[diagnostic(
        code(harness::count_mismatch),
        help("An undercount means unique inserts were silently dropped; an overcount means duplicates slipped in.")
    )]
    CountMismatch {
        discipline: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for list operations
pub type ListResult<T> = std::result::Result<T, ListError>;

/// Result type for harness verification
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;
