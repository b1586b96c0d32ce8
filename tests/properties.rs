// Property-based tests for the matching engine, scorer and validator.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use u_matching::engine::{EngineConfig, Protocol};
use u_matching::model::{AgentRecord, Instance, SlotRecord};
use u_matching::score::score_ranks;
use u_matching::search::SearchRunner;
use u_matching::validate::validate;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Random instance: 1-5 slots with capacity 0-3, 0-11 agents each listing
/// a random prefix of a random permutation of the slots.
fn arb_instance() -> impl Strategy<Value = Instance> {
    (1usize..6)
        .prop_flat_map(|m| {
            let capacities = prop::collection::vec(0usize..4, m);
            let preference = (Just((0..m).collect::<Vec<usize>>()).prop_shuffle(), 0..=m)
                .prop_map(|(perm, k)| perm[..k].to_vec());
            let agents = prop::collection::vec(preference, 0..12);
            (capacities, agents)
        })
        .prop_map(|(capacities, agents)| {
            let slots = capacities
                .iter()
                .enumerate()
                .map(|(i, &c)| SlotRecord::new(format!("S{i}"), c))
                .collect();
            let agents = agents
                .iter()
                .enumerate()
                .map(|(i, prefs)| {
                    AgentRecord::new(format!("A{i}"), prefs.iter().map(|s| format!("S{s}")))
                })
                .collect();
            Instance::new(agents, slots).expect("generated instance is consistent")
        })
}

fn arb_protocol() -> impl Strategy<Value = Protocol> {
    prop_oneof![Just(Protocol::AgentProposing), Just(Protocol::SlotProposing)]
}

fn arb_engine() -> impl Strategy<Value = EngineConfig> {
    (arb_protocol(), prop::option::of(1usize..5)).prop_map(|(protocol, max_preferences)| {
        EngineConfig {
            protocol,
            max_preferences,
            max_rounds: None,
        }
    })
}

/// Pairs of rank vectors where the first dominates the second agent-wise:
/// every agent matched in the second is matched at least as well in the first.
fn arb_dominating_ranks() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    prop::collection::vec(0usize..7, 0..20).prop_flat_map(|worse| {
        let better: Vec<BoxedStrategy<usize>> = worse
            .iter()
            .map(|&r| {
                if r == 0 {
                    (0usize..7).boxed()
                } else {
                    (1usize..=r).boxed()
                }
            })
            .collect();
        (better, Just(worse))
    })
}

// ---------------------------------------------------------------------------
// Engine invariants
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn no_slot_exceeds_capacity(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        let (_, matching) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();
        for slot in instance.slot_ids() {
            prop_assert!(matching.held(slot).len() <= instance.slot(slot).capacity);
        }
    }

    #[test]
    fn matches_are_single_and_reciprocal(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        let (_, matching) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();

        for agent in instance.agent_ids() {
            let holders: Vec<_> = instance
                .slot_ids()
                .filter(|&s| matching.held(s).contains(&agent))
                .collect();
            prop_assert!(holders.len() <= 1);
            prop_assert_eq!(holders.first().copied(), matching.slot_of(agent));
            if let Some(slot) = matching.slot_of(agent) {
                prop_assert_eq!(
                    matching.held(slot).iter().filter(|&&a| a == agent).count(),
                    1
                );
            }
        }
    }

    #[test]
    fn matches_stay_within_considered_prefix(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        let (_, matching) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();

        for agent in instance.agent_ids() {
            let rank = matching.rank(agent);
            match matching.slot_of(agent) {
                Some(slot) => {
                    let limit = instance.agent(agent).considered_len(engine.max_preferences);
                    prop_assert_eq!(instance.agent(agent).rank_of(slot), Some(rank));
                    prop_assert!(rank >= 1 && rank <= limit);
                }
                None => prop_assert_eq!(rank, 0),
            }
        }
    }

    #[test]
    fn no_agent_can_move_to_a_better_open_slot(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        for protocol in [Protocol::AgentProposing, Protocol::SlotProposing] {
            let engine = EngineConfig { protocol, ..engine.clone() };
            let (_, matching) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();
            prop_assert!(matching.convergence().is_converged(), "{:?}", matching.convergence());

            for agent in instance.agent_ids() {
                let prefs = &instance.agent(agent).preferences;
                let limit = instance.agent(agent).considered_len(engine.max_preferences);
                // Rank 0 (unmatched) means every considered slot is preferred.
                let better = match matching.rank(agent) {
                    0 => limit,
                    rank => rank - 1,
                };
                for &slot in &prefs[..better] {
                    prop_assert_eq!(
                        matching.held(slot).len(),
                        instance.slot(slot).capacity,
                        "{:?}: {:?} prefers {:?} which still has room",
                        protocol,
                        agent,
                        slot
                    );
                }
            }
        }
    }

    #[test]
    fn unmatched_at_least_capacity_shortfall(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        let (candidate, matching) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();
        let shortfall = instance.num_agents().saturating_sub(instance.total_capacity());
        prop_assert!(candidate.unmatched >= shortfall);
        prop_assert_eq!(candidate.unmatched, matching.unmatched_count());
        prop_assert!((candidate.score - score_ranks(matching.ranks())).abs() < 1e-9);
    }

    #[test]
    fn validator_accepts_engine_output_and_is_idempotent(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        let (candidate, matching) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();

        let first = validate(&instance, &matching);
        let second = validate(&instance, &matching);
        prop_assert!(first.is_valid(), "violations: {:?}", first.violations);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.unmatched, candidate.unmatched);
    }

    #[test]
    fn trials_are_deterministic(instance in arb_instance(), engine in arb_engine(), seed in 0u64..1_000) {
        let (a, ma) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();
        let (b, mb) = SearchRunner::run_trial(&instance, &engine, seed).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(ma, mb);
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn scorer_is_monotone_in_rank((better, worse) in arb_dominating_ranks()) {
        prop_assert!(score_ranks(&better) >= score_ranks(&worse) - 1e-12);
    }

    #[test]
    fn scorer_is_non_negative(ranks in prop::collection::vec(0usize..50, 0..30)) {
        prop_assert!(score_ranks(&ranks) >= 0.0);
    }
}
