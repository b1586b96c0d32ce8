//! Per-trial mutable state.

use super::config::Protocol;
use super::types::{Convergence, Matching};
use crate::model::{AgentId, Instance, SlotId};
use std::collections::{HashSet, VecDeque};

/// The agent↔slot relation for one trial.
///
/// Both directions (`agent → slot` and `slot → held agents`) are updated
/// together by [`assign`](Self::assign) and [`release`](Self::release);
/// nothing else mutates them.
#[derive(Debug, Clone)]
pub struct MatchState<'a> {
    instance: &'a Instance,
    assignment: Vec<Option<SlotId>>,
    held: Vec<Vec<AgentId>>,
}

impl<'a> MatchState<'a> {
    /// Fresh state with every agent unmatched.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            assignment: vec![None; instance.num_agents()],
            held: vec![Vec::new(); instance.num_slots()],
        }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn slot_of(&self, agent: AgentId) -> Option<SlotId> {
        self.assignment[agent.index()]
    }

    /// Agents currently held by `slot`, in acceptance order.
    pub fn held(&self, slot: SlotId) -> &[AgentId] {
        &self.held[slot.index()]
    }

    /// Whether `slot` can take another agent.
    pub fn has_spare(&self, slot: SlotId) -> bool {
        self.held[slot.index()].len() < self.instance.slot(slot).capacity
    }

    /// Matches an unmatched agent to a slot with spare capacity.
    pub fn assign(&mut self, agent: AgentId, slot: SlotId) {
        debug_assert!(self.assignment[agent.index()].is_none());
        debug_assert!(self.has_spare(slot));
        self.held[slot.index()].push(agent);
        self.assignment[agent.index()] = Some(slot);
    }

    /// Clears the agent's match, returning the slot it was held by.
    pub fn release(&mut self, agent: AgentId) -> Option<SlotId> {
        let slot = self.assignment[agent.index()].take()?;
        let held = &mut self.held[slot.index()];
        if let Some(pos) = held.iter().position(|&a| a == agent) {
            held.remove(pos);
        }
        Some(slot)
    }

    /// Freezes the state into a [`Matching`], computing realized ranks.
    pub fn into_matching(self, protocol: Protocol, convergence: Convergence) -> Matching {
        let ranks = self
            .assignment
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.and_then(|s| self.instance.agents()[i].rank_of(s))
                    .unwrap_or(0)
            })
            .collect();

        Matching {
            assignment: self.assignment,
            held: self.held,
            ranks,
            protocol,
            convergence,
        }
    }
}

/// Applicants of one slot under the slot-proposing protocol.
///
/// Mutated only through [`enqueue`](Self::enqueue),
/// [`pop_front`](Self::pop_front) and [`mark_rejected`](Self::mark_rejected).
#[derive(Debug, Clone, Default)]
pub struct ApplicantQueue {
    pending: VecDeque<AgentId>,
    rejected: HashSet<AgentId>,
}

impl ApplicantQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, agent: AgentId) {
        self.pending.push_back(agent);
    }

    /// Next applicant not yet offered a seat, skipping rejected agents.
    pub fn pop_front(&mut self) -> Option<AgentId> {
        while let Some(agent) = self.pending.pop_front() {
            if !self.rejected.contains(&agent) {
                return Some(agent);
            }
        }
        None
    }

    pub fn mark_rejected(&mut self, agent: AgentId) {
        self.rejected.insert(agent);
    }

    pub fn is_rejected(&self, agent: AgentId) -> bool {
        self.rejected.contains(&agent)
    }

    /// Whether any applicant is still waiting for an offer.
    pub fn has_unseen(&self) -> bool {
        self.pending.iter().any(|a| !self.rejected.contains(a))
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}
