/*!
 * Correctness Scenarios
 *
 * The runs that prove or disprove a discipline: sequential insertion,
 * same-values contention, and disjoint-values contention against a slow
 * store. Every run ends in a [`RunReport`] whose `verify` distinguishes
 * a crashed worker from stored duplicates from a wrong final count.
 */

use super::observe::RunSpan;
use super::{distinct_count, duplicate_pairs, panic_detail, WorkerFailure};
use crate::core::config::StressConfig;
use crate::core::errors::{HarnessError, HarnessResult};
use crate::core::sequence::Sequence;
use crate::list::{ConcurrentAdd, Discipline};
use crossbeam_queue::SegQueue;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;
use tracing::debug;

/// What a stress run left behind
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Discipline that served the run
    pub discipline: &'static str,
    /// Distinct values the inputs could have produced
    pub expected_distinct: usize,
    /// `len()` observed after all workers joined
    pub final_len: usize,
    /// Equal-element pairs found in the post-run snapshot
    pub duplicate_pairs: usize,
    /// Workers that panicked instead of finishing
    pub failures: Vec<WorkerFailure>,
}

impl RunReport {
    /// Pass the run or name its failure class
    ///
    /// Worker crashes outrank stored duplicates, which outrank a bare
    /// count mismatch: each earlier class makes the later ones moot.
    pub fn verify(&self) -> HarnessResult<()> {
        if let Some(first) = self.failures.first() {
            return Err(HarnessError::WorkerPanicked {
                discipline: self.discipline,
                count: self.failures.len(),
                detail: first.detail.clone(),
            });
        }
        if self.duplicate_pairs > 0 {
            return Err(HarnessError::DuplicateEntries {
                discipline: self.discipline,
                count: self.duplicate_pairs,
            });
        }
        if self.final_len != self.expected_distinct {
            return Err(HarnessError::CountMismatch {
                discipline: self.discipline,
                expected: self.expected_distinct,
                actual: self.final_len,
            });
        }
        Ok(())
    }

    /// Whether `verify` passes
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.verify().is_ok()
    }

    /// Whether the run miscounted or stored duplicates
    ///
    /// The signal the negative controls are expected to raise; worker
    /// crashes are deliberately not part of it.
    #[inline]
    pub fn miscounted(&self) -> bool {
        self.final_len != self.expected_distinct || self.duplicate_pairs > 0
    }
}

/// Apply `inputs` one by one on the calling thread
///
/// Returns each call's reported insertion. Sequentially, every
/// discipline, broken ones included, must match a plain set's behavior;
/// concurrency bugs need concurrency.
pub fn run_sequential<T>(list: &dyn ConcurrentAdd<T>, inputs: &[T]) -> Vec<bool>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    inputs.iter().map(|value| list.add(value.clone())).collect()
}

/// Race every worker over the same values, all released together
///
/// Workers start behind one barrier, then make `rounds` passes over
/// `values` with the configured pauses around each add. The store
/// carries the configured append latency. Worker panics are captured
/// per worker and reported, never swallowed.
pub fn run_contended<T>(discipline: Discipline, config: &StressConfig, values: &[T]) -> RunReport
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    let expected = distinct_count(values);
    let shared = Arc::new(values.to_vec());

    run_workers(discipline, config, expected, move |list, worker_config, _worker| {
        for _ in 0..worker_config.rounds {
            for value in shared.iter() {
                if let Some(pause) = worker_config.op_pause {
                    thread::sleep(pause);
                }
                list.add(value.clone());
                if let Some(pause) = worker_config.op_pause {
                    thread::sleep(pause);
                }
            }
        }
    })
}

/// Race workers over values nobody else contributes
///
/// Worker `w` adds `make(w, j)` for `j` in `0..rounds`: pure lock
/// contention with no duplicate-detection races. Every sound discipline
/// must land exactly `workers * rounds` entries.
pub fn run_disjoint<T, F>(discipline: Discipline, config: &StressConfig, make: F) -> RunReport
where
    T: PartialEq + Clone + Send + Sync + 'static,
    F: Fn(usize, usize) -> T + Send + Sync + 'static,
{
    let expected = config.workers * config.rounds;
    let make = Arc::new(make);

    run_workers(discipline, config, expected, move |list, worker_config, worker| {
        for j in 0..worker_config.rounds {
            list.add(make(worker, j));
        }
    })
}

/// Repeat a contended run until a negative control misbehaves
///
/// Broken disciplines are *permitted* to miscount, not required to on
/// every run; this retries up to `trials` times and reports whether any
/// trial miscounted or stored duplicates. Worker crashes do not count
/// as a demonstration.
pub fn demonstrate_broken<T>(
    discipline: Discipline,
    config: &StressConfig,
    values: &[T],
    trials: usize,
) -> bool
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    for trial in 0..trials {
        let report = run_contended(discipline, config, values);
        if report.miscounted() {
            debug!(
                discipline = report.discipline,
                trial,
                final_len = report.final_len,
                expected = report.expected_distinct,
                duplicates = report.duplicate_pairs,
                "negative control reproduced its race"
            );
            return true;
        }
    }
    false
}

/// Spawn, synchronize, drive, join, and report one worker crowd
fn run_workers<T, W>(
    discipline: Discipline,
    config: &StressConfig,
    expected: usize,
    work: W,
) -> RunReport
where
    T: PartialEq + Clone + Send + Sync + 'static,
    W: Fn(&dyn ConcurrentAdd<T>, &StressConfig, usize) + Send + Sync + 'static,
{
    let _span = RunSpan::new("correctness", discipline.name(), config.workers);

    let store = match config.store_latency {
        Some(latency) => Sequence::with_latency(latency),
        None => Sequence::new(),
    };
    let list = discipline.build_over(store);

    let barrier = Arc::new(Barrier::new(config.workers));
    let failures = Arc::new(SegQueue::new());
    let work = Arc::new(work);

    let mut handles = Vec::with_capacity(config.workers);
    for worker in 0..config.workers {
        let list = Arc::clone(&list);
        let barrier = Arc::clone(&barrier);
        let failures = Arc::clone(&failures);
        let work = Arc::clone(&work);
        let worker_config = *config;

        handles.push(thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                barrier.wait();
                work(&*list, &worker_config, worker);
            }));
            if let Err(payload) = outcome {
                failures.push(WorkerFailure {
                    worker,
                    detail: panic_detail(payload),
                });
            }
        }));
    }

    for (worker, handle) in handles.into_iter().enumerate() {
        // Panics are caught inside the worker; a join error would mean
        // the harness itself escaped its guard
        if let Err(payload) = handle.join() {
            failures.push(WorkerFailure {
                worker,
                detail: panic_detail(payload),
            });
        }
    }

    let snapshot = list.snapshot();
    let mut collected = Vec::new();
    while let Some(failure) = failures.pop() {
        collected.push(failure);
    }

    RunReport {
        discipline: discipline.name(),
        expected_distinct: expected,
        final_len: list.len(),
        duplicate_pairs: duplicate_pairs(&snapshot),
        failures: collected,
    }
}
