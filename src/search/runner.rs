//! Parallel seed search execution.
//!
//! [`SearchRunner`] splits the seed range across workers. Each worker runs
//! its seeds in order: shuffle → match → score → keep the best. Worker
//! results are returned by value and merged after all workers join.

use super::config::SearchConfig;
use super::types::SeedCandidate;
use crate::engine::{EngineConfig, Matching, MatchingEngine};
use crate::error::{MatchError, Result};
use crate::model::{AgentId, Instance};
use crate::random::{create_rng, shuffle};
use crate::score::score;
use crate::validate::{validate, ValidationReport};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a seed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Global best seed, `None` if no trial ran (cancelled before start).
    pub best: Option<SeedCandidate>,

    /// The matching produced by the best seed.
    pub best_matching: Option<Matching>,

    /// Validation of [`best_matching`](Self::best_matching).
    pub report: Option<ValidationReport>,

    /// Each worker's local best, best first.
    pub worker_bests: Vec<SeedCandidate>,

    /// Trials executed across all workers.
    pub trials: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes the seed search.
///
/// # Usage
///
/// ```
/// use u_matching::model::{AgentRecord, Instance, SlotRecord};
/// use u_matching::search::{SearchConfig, SearchRunner};
///
/// let instance = Instance::new(
///     vec![
///         AgentRecord::new("A1", ["S1", "S2"]),
///         AgentRecord::new("A2", ["S1", "S2"]),
///         AgentRecord::new("A3", ["S2", "S1"]),
///     ],
///     vec![SlotRecord::new("S1", 1), SlotRecord::new("S2", 2)],
/// )
/// .unwrap();
///
/// let config = SearchConfig::default().with_seeds(0..64).with_workers(4);
/// let result = SearchRunner::run(&instance, &config).unwrap();
/// let best = result.best.unwrap();
/// assert_eq!(best.unmatched, 0);
/// assert_eq!(result.trials, 64);
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search over `config.seeds`.
    pub fn run(instance: &Instance, config: &SearchConfig) -> Result<SearchResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// Workers check the flag before each seed and stop early when it is
    /// set; the best found so far is still merged and returned.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] for an invalid config and
    /// [`MatchError::ThreadPool`] if the worker pool cannot be created.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        config.validate()?;

        let partitions = partition_seeds(config.seeds.clone(), config.workers);
        info!(
            agents = instance.num_agents(),
            slots = instance.num_slots(),
            capacity = instance.total_capacity(),
            seeds = config.seed_count(),
            workers = partitions.len(),
            protocol = ?config.engine.protocol,
            "starting seed search"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(partitions.len())
            .build()
            .map_err(|e| MatchError::ThreadPool(e.to_string()))?;

        let flag = cancel.as_deref();
        let outcomes: Vec<WorkerOutcome> = pool.install(|| {
            partitions
                .par_iter()
                .enumerate()
                .map(|(worker, seeds)| {
                    search_range(instance, &config.engine, worker, seeds.clone(), flag)
                })
                .collect()
        });

        let mut trials = 0;
        let mut cancelled = false;
        let mut bests: Vec<(SeedCandidate, Matching)> = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            trials += outcome.trials;
            cancelled |= outcome.cancelled;
            bests.extend(outcome.best);
        }

        bests.sort_by(|a, b| a.0.cmp_quality(&b.0));
        let worker_bests: Vec<SeedCandidate> = bests.iter().map(|(c, _)| *c).collect();
        let global = bests.into_iter().next();

        let (best, best_matching, report) = match global {
            Some((candidate, matching)) => {
                info!(
                    seed = candidate.seed,
                    unmatched = candidate.unmatched,
                    empty_slots = candidate.empty_slots,
                    score = candidate.score,
                    trials,
                    cancelled,
                    "seed search finished"
                );
                let report = validate(instance, &matching);
                report.log();
                (Some(candidate), Some(matching), Some(report))
            }
            None => {
                info!(trials, cancelled, "seed search finished without a candidate");
                (None, None, None)
            }
        };

        Ok(SearchResult {
            best,
            best_matching,
            report,
            worker_bests,
            trials,
            cancelled,
        })
    }

    /// Runs a single seed: shuffle agents with an RNG built from `seed`,
    /// match, and score.
    ///
    /// Deterministic, so the best seed of a search can be replayed.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] for an invalid engine config.
    pub fn run_trial(
        instance: &Instance,
        engine: &EngineConfig,
        seed: u64,
    ) -> Result<(SeedCandidate, Matching)> {
        engine.validate()?;
        Ok(trial(instance, engine, seed))
    }
}

/// One seed with an already validated engine config. The shuffled order is
/// a permutation of `instance.agent_ids()` by construction.
fn trial(instance: &Instance, engine: &EngineConfig, seed: u64) -> (SeedCandidate, Matching) {
    let mut order: Vec<AgentId> = instance.agent_ids().collect();
    shuffle(&mut order, &mut create_rng(seed));

    let matching = MatchingEngine::resolve(instance, &order, engine);
    let candidate = SeedCandidate {
        seed,
        unmatched: matching.unmatched_count(),
        empty_slots: matching.empty_slot_count(instance),
        score: score(&matching),
    };
    (candidate, matching)
}

/// Splits `seeds` into at most `workers` contiguous, non-empty, disjoint
/// ranges covering the whole input. Earlier ranges get the remainder.
///
/// # Examples
///
/// ```
/// use u_matching::search::partition_seeds;
///
/// assert_eq!(partition_seeds(0..10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(partition_seeds(0..2, 8), vec![0..1, 1..2]);
/// ```
pub fn partition_seeds(seeds: Range<u64>, workers: usize) -> Vec<Range<u64>> {
    let len = seeds.end.saturating_sub(seeds.start);
    if len == 0 || workers == 0 {
        return Vec::new();
    }

    let parts = (workers as u64).min(len);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = seeds.start;
    for i in 0..parts {
        let size = base + u64::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// One worker's contribution.
struct WorkerOutcome {
    best: Option<(SeedCandidate, Matching)>,
    trials: usize,
    cancelled: bool,
}

fn search_range(
    instance: &Instance,
    engine: &EngineConfig,
    worker: usize,
    seeds: Range<u64>,
    cancel: Option<&AtomicBool>,
) -> WorkerOutcome {
    let mut best: Option<(SeedCandidate, Matching)> = None;
    let mut trials = 0usize;
    let mut cancelled = false;

    for seed in seeds.clone() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            cancelled = true;
            break;
        }

        let (candidate, matching) = trial(instance, engine, seed);
        trials += 1;

        let accept = match &best {
            None => true,
            Some((current, _)) => candidate.replaces(current),
        };
        if accept {
            debug!(
                worker,
                seed,
                unmatched = candidate.unmatched,
                empty_slots = candidate.empty_slots,
                score = candidate.score,
                "new best seed"
            );
            best = Some((candidate, matching));
        }
    }

    debug!(
        worker,
        start = seeds.start,
        end = seeds.end,
        trials,
        cancelled,
        "worker finished"
    );

    WorkerOutcome {
        best,
        trials,
        cancelled,
    }
}
