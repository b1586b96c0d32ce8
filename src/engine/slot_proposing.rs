//! Slot-proposing deferred acceptance with rejection.
//!
//! Each slot queues the agents that listed it within their considered
//! prefix, in processing order. Every round, each slot with spare capacity
//! offers a seat to its next unseen applicant. An agent compares all new
//! offers with the seat it already holds, keeps the best-ranked one and
//! rejects the others. Slots never withdraw an offer; only agents trade up.

use super::state::{ApplicantQueue, MatchState};
use super::types::Convergence;
use crate::model::{AgentId, SlotId};

/// Runs the protocol over `order` until no slot can make an offer or the
/// round cap is hit.
pub(crate) fn resolve(
    state: &mut MatchState<'_>,
    order: &[AgentId],
    max_preferences: Option<usize>,
    round_cap: usize,
) -> Convergence {
    let instance = state.instance();

    let mut queues: Vec<ApplicantQueue> = vec![ApplicantQueue::new(); instance.num_slots()];
    for &agent in order {
        let a = instance.agent(agent);
        for &slot in &a.preferences[..a.considered_len(max_preferences)] {
            queues[slot.index()].enqueue(agent);
        }
    }

    let mut rounds = 0usize;
    loop {
        let open: Vec<SlotId> = instance
            .slot_ids()
            .filter(|&s| state.has_spare(s) && queues[s.index()].has_unseen())
            .collect();

        if open.is_empty() {
            return Convergence::Converged { rounds };
        }
        if rounds >= round_cap {
            return Convergence::RoundCapReached {
                rounds,
                pending: open.len(),
            };
        }
        rounds += 1;

        let mut offers: Vec<(AgentId, SlotId)> = open
            .into_iter()
            .filter_map(|s| queues[s.index()].pop_front().map(|a| (a, s)))
            .collect();
        offers.sort_by_key(|&(agent, _)| agent);

        for group in offers.chunk_by(|x, y| x.0 == y.0) {
            let agent = group[0].0;
            let ranked = instance.agent(agent);
            let current = state.slot_of(agent);

            let Some(best) = current
                .into_iter()
                .chain(group.iter().map(|&(_, s)| s))
                .min_by_key(|&s| ranked.rank_of(s).unwrap_or(usize::MAX))
            else {
                continue;
            };

            if current != Some(best) {
                if let Some(previous) = state.release(agent) {
                    queues[previous.index()].mark_rejected(agent);
                }
                state.assign(agent, best);
            }

            for &(_, slot) in group {
                if slot != best {
                    queues[slot.index()].mark_rejected(agent);
                }
            }
        }
    }
}
