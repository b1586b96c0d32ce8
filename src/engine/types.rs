//! Engine output types.

use super::config::Protocol;
use crate::model::{AgentId, Instance, SlotId};

/// How a matching run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convergence {
    /// No further proposal or offer was possible.
    Converged {
        /// Rounds executed.
        rounds: usize,
    },

    /// The round cap stopped the run first. The matching is whatever
    /// state existed at that point and may not be a fixed point.
    RoundCapReached {
        /// Rounds executed (equal to the cap).
        rounds: usize,
        /// Agents (agent-proposing) or slots (slot-proposing) that still
        /// had moves left.
        pending: usize,
    },
}

impl Convergence {
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }

    pub fn rounds(&self) -> usize {
        match *self {
            Convergence::Converged { rounds } | Convergence::RoundCapReached { rounds, .. } => {
                rounds
            }
        }
    }
}

/// A completed matching.
///
/// Holds the final agent→slot assignment, the reverse slot→agents sets,
/// and each agent's realized rank (1-indexed, `0` when unmatched).
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    pub(crate) assignment: Vec<Option<SlotId>>,
    pub(crate) held: Vec<Vec<AgentId>>,
    pub(crate) ranks: Vec<usize>,
    pub(crate) protocol: Protocol,
    pub(crate) convergence: Convergence,
}

impl Matching {
    pub fn slot_of(&self, agent: AgentId) -> Option<SlotId> {
        self.assignment[agent.index()]
    }

    pub fn held(&self, slot: SlotId) -> &[AgentId] {
        &self.held[slot.index()]
    }

    pub fn rank(&self, agent: AgentId) -> usize {
        self.ranks[agent.index()]
    }

    /// Realized ranks indexed by agent.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn assignment(&self) -> &[Option<SlotId>] {
        &self.assignment
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn convergence(&self) -> Convergence {
        self.convergence
    }

    pub fn num_agents(&self) -> usize {
        self.assignment.len()
    }

    pub fn matched_count(&self) -> usize {
        self.assignment.iter().filter(|s| s.is_some()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.assignment.len() - self.matched_count()
    }

    /// Unmatched agents in input order.
    pub fn unmatched(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| AgentId(i))
    }

    /// Slots with positive capacity that hold nobody.
    pub fn empty_slot_count(&self, instance: &Instance) -> usize {
        instance
            .slot_ids()
            .filter(|&s| instance.slot(s).capacity > 0 && self.held(s).is_empty())
            .count()
    }

    /// Per-agent rows for the output collaborator, in input order.
    pub fn agent_results(&self, instance: &Instance) -> Vec<AgentResult> {
        instance
            .agent_ids()
            .map(|a| {
                let agent = instance.agent(a);
                AgentResult {
                    id: agent.id.clone(),
                    slot: self.slot_of(a).map(|s| instance.slot(s).id.clone()),
                    rank: self.rank(a),
                    preferences: agent
                        .preferences
                        .iter()
                        .map(|&s| instance.slot(s).id.clone())
                        .collect(),
                }
            })
            .collect()
    }

    /// Per-slot rows for the output collaborator, in input order.
    pub fn slot_results(&self, instance: &Instance) -> Vec<SlotResult> {
        instance
            .slot_ids()
            .map(|s| {
                let slot = instance.slot(s);
                SlotResult {
                    id: slot.id.clone(),
                    agents: self
                        .held(s)
                        .iter()
                        .map(|&a| instance.agent(a).id.clone())
                        .collect(),
                    capacity: slot.capacity,
                }
            })
            .collect()
    }
}

/// Output row for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentResult {
    pub id: String,
    /// Matched slot, `None` when unmatched.
    pub slot: Option<String>,
    /// Realized rank, `0` when unmatched.
    pub rank: usize,
    /// The agent's original preference list.
    pub preferences: Vec<String>,
}

/// Output row for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotResult {
    pub id: String,
    /// Held agents in acceptance order.
    pub agents: Vec<String>,
    pub capacity: usize,
}
