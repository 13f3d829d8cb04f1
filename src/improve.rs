//! Multi-threaded counter search
//!
//! Finds the smallest counter at or after a starting point whose
//! difficulty reaches a target. The counter space is split across worker
//! threads by stride; each worker scores a batch, then checks whether a
//! smaller hit has already been published and stops if so.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tsdiff_core::its_until_slow_phase;

use crate::algorithm::{Algorithm, Engine};
use crate::config::ImproveConfig;
use crate::ProverError;

/// Result of a successful search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImproveOutcome {
    /// Smallest counter meeting the target
    pub counter: u64,
    pub difficulty: u32,
    /// Candidates scored across all threads
    pub searched: u64,
    pub elapsed: Duration,
}

impl ImproveOutcome {
    pub fn hashrate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.searched as f64 / secs
    }
}

/// Shared search progress
struct SearchState {
    hit: AtomicBool,
    best: AtomicU64,
    searched: AtomicU64,
}

impl SearchState {
    fn new() -> Self {
        Self {
            hit: AtomicBool::new(false),
            best: AtomicU64::new(u64::MAX),
            searched: AtomicU64::new(0),
        }
    }

    fn publish(&self, counter: u64) {
        self.best.fetch_min(counter, Ordering::AcqRel);
        self.hit.store(true, Ordering::Release);
    }

    /// Whether a hit below `counter` is already known
    fn beaten_before(&self, counter: u64) -> bool {
        self.hit.load(Ordering::Acquire) && self.best.load(Ordering::Acquire) < counter
    }

    fn result(&self) -> Option<u64> {
        self.hit
            .load(Ordering::Acquire)
            .then(|| self.best.load(Ordering::Acquire))
    }
}

/// Last counter (inclusive) the search may examine
fn search_limit(
    identity_len: usize,
    start: u64,
    config: &ImproveConfig,
) -> Result<Option<u64>, ProverError> {
    let mut last = u64::MAX;

    if let Some(max_iterations) = config.max_iterations {
        if max_iterations == 0 {
            return Ok(None);
        }
        last = last.min(start.saturating_add(max_iterations - 1));
    }

    if config.stop_at_slow_phase {
        let remaining = its_until_slow_phase(identity_len, start)?;
        if remaining == 0 {
            return Ok(None);
        }
        last = last.min(start.saturating_add(remaining - 1));
    } else if let Ok(remaining) = its_until_slow_phase(identity_len, start) {
        if remaining != u64::MAX {
            if let Some(first_slow) = start.checked_add(remaining).filter(|c| *c <= last) {
                tracing::info!(first_slow, "search range crosses into the slow phase");
            }
        }
    }

    Ok(Some(last))
}

/// Search `start..` for the smallest counter with difficulty >= `target`
pub fn improve(
    identity: &[u8],
    algorithm: Algorithm,
    start: u64,
    target: u32,
    config: &ImproveConfig,
) -> Result<ImproveOutcome, ProverError> {
    config.validate()?;

    let max = algorithm.max_difficulty();
    if target > max {
        return Err(ProverError::UnreachableTarget {
            target,
            max,
            algorithm: algorithm.name(),
        });
    }

    let began = Instant::now();
    let Some(last) = search_limit(identity.len(), start, config)? else {
        return Err(ProverError::NotFound { searched: 0 });
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    let num_threads = pool.current_num_threads().max(1);

    tracing::info!(
        algorithm = algorithm.name(),
        target,
        start,
        last,
        threads = num_threads,
        "starting counter search"
    );

    let engine = algorithm.engine(identity);
    let state = SearchState::new();
    let report_interval = Duration::from_secs(config.report_interval_secs.max(1));

    pool.install(|| {
        (0..num_threads).into_par_iter().for_each(|thread_id| {
            search_stride(
                &engine,
                &state,
                start,
                last,
                thread_id as u64,
                num_threads as u64,
                target,
                config.batch_size,
                (thread_id == 0).then_some((began, report_interval)),
            );
        });
    });

    let searched = state.searched.load(Ordering::Acquire);
    let elapsed = began.elapsed();

    match state.result() {
        Some(counter) => {
            let outcome = ImproveOutcome {
                counter,
                difficulty: engine.difficulty(counter),
                searched,
                elapsed,
            };
            tracing::info!(
                counter,
                difficulty = outcome.difficulty,
                searched,
                elapsed_ms = elapsed.as_millis() as u64,
                "counter search finished"
            );
            Ok(outcome)
        }
        None => {
            tracing::info!(searched, "counter search exhausted its range");
            Err(ProverError::NotFound { searched })
        }
    }
}

/// Score `start + offset, start + offset + stride, ...` up to `last`
#[allow(clippy::too_many_arguments)]
fn search_stride(
    engine: &Engine,
    state: &SearchState,
    start: u64,
    last: u64,
    offset: u64,
    stride: u64,
    target: u32,
    batch_size: u64,
    reporter: Option<(Instant, Duration)>,
) {
    let Some(mut counter) = start.checked_add(offset).filter(|c| *c <= last) else {
        return;
    };
    let mut last_report = Instant::now();

    loop {
        if state.beaten_before(counter) {
            return;
        }

        let mut scored = 0u64;
        let mut exhausted = false;
        while scored < batch_size {
            scored += 1;
            if engine.difficulty(counter) >= target {
                state.searched.fetch_add(scored, Ordering::AcqRel);
                state.publish(counter);
                return;
            }
            match counter.checked_add(stride).filter(|c| *c <= last) {
                Some(next) => counter = next,
                None => {
                    exhausted = true;
                    break;
                }
            }
        }
        let total = state.searched.fetch_add(scored, Ordering::AcqRel) + scored;

        if exhausted {
            return;
        }

        if let Some((began, interval)) = reporter {
            if last_report.elapsed() >= interval {
                let secs = began.elapsed().as_secs_f64();
                tracing::info!(
                    searched = total,
                    counter,
                    hashrate = total as f64 / secs,
                    "search progress"
                );
                last_report = Instant::now();
            }
        }
    }
}
