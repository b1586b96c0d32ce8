//! Agent-proposing deferred acceptance with displacement.
//!
//! # Algorithm
//!
//! 1. Every agent starts in the pool of unconsidered agents.
//! 2. Each round walks a snapshot of the pool. An agent proposes to the
//!    slot under its cursor:
//!    a. zero-capacity slot: rejected, cursor advances
//!    b. spare capacity: accepted, agent leaves the pool
//!    c. full: if the proposer's rank beats the worst holder's rank, the
//!       holder is evicted back into the pool and the proposer accepted;
//!       otherwise the proposer is rejected and its cursor advances
//!    d. cursor past the considered prefix: agent is exhausted and leaves
//!       the pool, including right after its last considered slot rejects it
//! 3. Stop when the pool is empty or the round cap is hit.

use super::state::MatchState;
use super::types::Convergence;
use crate::model::{AgentId, SlotId};
use std::cmp::Reverse;

/// Runs the protocol over `order` until a fixed point or the round cap.
pub(crate) fn resolve(
    state: &mut MatchState<'_>,
    order: &[AgentId],
    max_preferences: Option<usize>,
    round_cap: usize,
) -> Convergence {
    let instance = state.instance();

    // Proposals exhausted per agent; `None` once the agent gives up.
    let mut cursor: Vec<Option<usize>> = vec![Some(0); instance.num_agents()];
    let mut pool: Vec<AgentId> = order.to_vec();
    let mut rounds = 0usize;

    while !pool.is_empty() && rounds < round_cap {
        rounds += 1;

        for agent in pool.clone() {
            let Some(c) = cursor[agent.index()] else {
                continue;
            };
            let proposer = instance.agent(agent);
            let limit = proposer.considered_len(max_preferences);

            if c >= limit {
                cursor[agent.index()] = None;
                remove(&mut pool, agent);
                continue;
            }

            let slot = proposer.preferences[c];

            match propose(state, &cursor, agent, slot) {
                Proposal::Accepted => remove(&mut pool, agent),
                Proposal::Displaced(evicted) => {
                    remove(&mut pool, agent);
                    pool.push(evicted);
                }
                // The last considered slot said no: exhausted now, not next round.
                Proposal::Rejected if c + 1 >= limit => {
                    cursor[agent.index()] = None;
                    remove(&mut pool, agent);
                }
                Proposal::Rejected => cursor[agent.index()] = Some(c + 1),
            }
        }
    }

    if pool.is_empty() {
        Convergence::Converged { rounds }
    } else {
        Convergence::RoundCapReached {
            rounds,
            pending: pool.len(),
        }
    }
}

/// Outcome of a single proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Proposal {
    Accepted,
    /// Accepted by evicting the returned holder.
    Displaced(AgentId),
    Rejected,
}

/// `agent` proposes to `slot` with the rank given by its cursor.
fn propose(
    state: &mut MatchState<'_>,
    cursor: &[Option<usize>],
    agent: AgentId,
    slot: SlotId,
) -> Proposal {
    if state.instance().slot(slot).capacity == 0 {
        return Proposal::Rejected;
    }
    if state.has_spare(slot) {
        state.assign(agent, slot);
        return Proposal::Accepted;
    }

    // Worst holder: largest cursor, first in holding order on ties.
    let worst = state
        .held(slot)
        .iter()
        .copied()
        .min_by_key(|h| Reverse(cursor[h.index()].unwrap_or(usize::MAX)));

    match worst {
        Some(w) if cursor[agent.index()] < cursor[w.index()] => {
            state.release(w);
            state.assign(agent, slot);
            Proposal::Displaced(w)
        }
        _ => Proposal::Rejected,
    }
}

fn remove(pool: &mut Vec<AgentId>, agent: AgentId) {
    if let Some(pos) = pool.iter().position(|&a| a == agent) {
        pool.remove(pos);
    }
}
