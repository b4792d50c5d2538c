/*!
 * Throughput Measurement
 *
 * Times each discipline under escalating worker counts. Speed alone is
 * a trap here: the broken disciplines often post the best numbers, so
 * every sample carries the same post-run duplicate scan and failure
 * tally the correctness runs use. A fast run that stored duplicates is
 * a disqualified run.
 */

use super::correctness::RunReport;
use super::observe::RunSpan;
use super::{distinct_count, duplicate_pairs, panic_detail, WorkerFailure};
use crate::core::config::StressConfig;
use crate::core::errors::HarnessResult;
use crate::core::sequence::Sequence;
use crate::list::Discipline;
use crossbeam_queue::SegQueue;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// One timed run of one discipline at one worker count
#[derive(Debug, Clone)]
pub struct ThroughputSample {
    /// Discipline that served the run
    pub discipline: &'static str,
    /// Workers that raced
    pub workers: usize,
    /// Adds attempted across all workers
    pub total_ops: usize,
    /// Wall time from the start barrier to the last join
    pub elapsed: Duration,
    /// Distinct values the inputs could have produced
    pub expected_distinct: usize,
    /// `len()` observed after the run
    pub final_len: usize,
    /// Equal-element pairs found in the post-run snapshot
    pub duplicate_pairs: usize,
    /// Workers that panicked instead of finishing
    pub failures: Vec<WorkerFailure>,
}

impl ThroughputSample {
    /// Attempted adds per second of wall time
    #[inline]
    pub fn ops_per_sec(&self) -> f64 {
        self.total_ops as f64 / self.elapsed.as_secs_f64()
    }

    /// The sample viewed as a correctness report
    pub fn as_report(&self) -> RunReport {
        RunReport {
            discipline: self.discipline,
            expected_distinct: self.expected_distinct,
            final_len: self.final_len,
            duplicate_pairs: self.duplicate_pairs,
            failures: self.failures.clone(),
        }
    }

    /// Pass the run or name its failure class, same rules as a
    /// correctness run
    pub fn verify(&self) -> HarnessResult<()> {
        self.as_report().verify()
    }
}

/// Time `workers` threads racing `rounds` passes over `values`
///
/// The clock starts when the last participant reaches the barrier and
/// stops at the last join, so spawn overhead stays outside the number.
/// Pauses and store latency from `config` apply exactly as they do in
/// the correctness runs; `config.workers` is ignored in favor of the
/// explicit count.
pub fn measure<T>(
    discipline: Discipline,
    workers: usize,
    config: &StressConfig,
    values: &[T],
) -> ThroughputSample
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    let _span = RunSpan::new("throughput", discipline.name(), workers);

    let store = match config.store_latency {
        Some(latency) => Sequence::with_latency(latency),
        None => Sequence::new(),
    };
    let list = discipline.build_over(store);

    let shared = Arc::new(values.to_vec());
    let barrier = Arc::new(Barrier::new(workers + 1));
    let failures = Arc::new(SegQueue::new());

    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let list = Arc::clone(&list);
        let shared = Arc::clone(&shared);
        let barrier = Arc::clone(&barrier);
        let failures = Arc::clone(&failures);
        let worker_config = *config;

        handles.push(thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                barrier.wait();
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
            }));
            if let Err(payload) = outcome {
                failures.push(WorkerFailure {
                    worker,
                    detail: panic_detail(payload),
                });
            }
        }));
    }

    // The timing thread is the (workers + 1)th barrier participant
    barrier.wait();
    let start = Instant::now();
    for (worker, handle) in handles.into_iter().enumerate() {
        if let Err(payload) = handle.join() {
            failures.push(WorkerFailure {
                worker,
                detail: panic_detail(payload),
            });
        }
    }
    let elapsed = start.elapsed();

    let snapshot = list.snapshot();
    let mut collected = Vec::new();
    while let Some(failure) = failures.pop() {
        collected.push(failure);
    }

    ThroughputSample {
        discipline: discipline.name(),
        workers,
        total_ops: workers * config.rounds * values.len(),
        elapsed,
        expected_distinct: distinct_count(values),
        final_len: list.len(),
        duplicate_pairs: duplicate_pairs(&snapshot),
        failures: collected,
    }
}

/// Measure one discipline across escalating worker counts
pub fn profile<T>(
    discipline: Discipline,
    worker_counts: &[usize],
    config: &StressConfig,
    values: &[T],
) -> Vec<ThroughputSample>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    worker_counts
        .iter()
        .map(|&workers| {
            let sample = measure(discipline, workers, config, values);
            debug!(
                discipline = sample.discipline,
                workers,
                ops_per_sec = sample.ops_per_sec() as u64,
                final_len = sample.final_len,
                duplicates = sample.duplicate_pairs,
                "throughput sample"
            );
            sample
        })
        .collect()
}
