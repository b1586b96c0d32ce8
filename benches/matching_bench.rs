//! Criterion benchmarks for the matching engine and the seed search.
//!
//! Uses synthetic cohorts: every agent ranks a random subset of slots,
//! total capacity slightly below the number of agents.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_matching::engine::{EngineConfig, MatchingEngine, Protocol};
use u_matching::model::{AgentRecord, Instance, SlotRecord};
use u_matching::random::{create_rng, shuffle};
use u_matching::search::{SearchConfig, SearchRunner};

// ===========================================================================
// Synthetic cohort
// ===========================================================================

fn cohort(agents: usize, slots: usize, prefs: usize) -> Instance {
    let mut rng = create_rng(42);

    let slot_records: Vec<SlotRecord> = (0..slots)
        .map(|i| SlotRecord::new(format!("S{i}"), rng.random_range(0..=2 * agents / slots)))
        .collect();

    let agent_records: Vec<AgentRecord> = (0..agents)
        .map(|i| {
            let mut ids: Vec<usize> = (0..slots).collect();
            shuffle(&mut ids, &mut rng);
            AgentRecord::new(
                format!("A{i}"),
                ids.into_iter().take(prefs).map(|s| format!("S{s}")),
            )
        })
        .collect();

    Instance::new(agent_records, slot_records).expect("synthetic cohort is consistent")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(20);

    for (agents, slots) in [(50usize, 10usize), (200, 40), (1_000, 150)] {
        let instance = cohort(agents, slots, 5);
        for protocol in [Protocol::AgentProposing, Protocol::SlotProposing] {
            let config = EngineConfig::default().with_protocol(protocol);
            group.bench_with_input(
                BenchmarkId::new(format!("{protocol:?}"), agents),
                &(&instance, config),
                |b, (inst, cfg)| {
                    b.iter(|| {
                        let m = MatchingEngine::run_in_input_order(black_box(inst), black_box(cfg));
                        black_box(m)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed_search");
    group.sample_size(10);

    let instance = cohort(200, 40, 5);
    for &workers in &[1usize, 4, 8] {
        let config = SearchConfig::default().with_seeds(0..256).with_workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &config, |b, cfg| {
            b.iter(|| {
                let result = SearchRunner::run(black_box(&instance), black_box(cfg));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine, bench_search);
criterion_main!(benches);
