//! Validated problem instance.

use super::types::{AgentId, AgentRecord, SlotId, SlotRecord};
use crate::error::{MatchError, Result};
use std::collections::{HashMap, HashSet};

/// An agent with its preferences resolved to slot indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// External identifier.
    pub id: String,
    /// Slots from most to least preferred.
    pub preferences: Vec<SlotId>,
}

impl Agent {
    /// 1-indexed rank of `slot` in this agent's list, or `None` if unlisted.
    pub fn rank_of(&self, slot: SlotId) -> Option<usize> {
        self.preferences
            .iter()
            .position(|&s| s == slot)
            .map(|pos| pos + 1)
    }

    /// Number of entries considered under an optional preference limit.
    pub fn considered_len(&self, max_preferences: Option<usize>) -> usize {
        match max_preferences {
            Some(limit) => limit.min(self.preferences.len()),
            None => self.preferences.len(),
        }
    }
}

/// A slot with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// External identifier.
    pub id: String,
    /// Maximum number of agents the slot can hold.
    pub capacity: usize,
}

/// A matching problem: agents and slots stored in arenas.
///
/// Built once from the input tables and never mutated afterwards. All
/// input inconsistencies are rejected here, before any matching runs.
///
/// # Examples
///
/// ```
/// use u_matching::model::{AgentRecord, Instance, SlotRecord};
///
/// let instance = Instance::new(
///     vec![
///         AgentRecord::new("A1", ["S1", "S2"]),
///         AgentRecord::new("A2", ["S2", "S1"]),
///     ],
///     vec![SlotRecord::new("S1", 1), SlotRecord::new("S2", 1)],
/// )
/// .unwrap();
/// assert_eq!(instance.num_agents(), 2);
/// assert_eq!(instance.total_capacity(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    agents: Vec<Agent>,
    slots: Vec<Slot>,
    agent_index: HashMap<String, AgentId>,
    slot_index: HashMap<String, SlotId>,
}

impl Instance {
    /// Builds an instance from the agent preference and slot capacity tables.
    ///
    /// # Errors
    ///
    /// - [`MatchError::DuplicateSlot`] / [`MatchError::DuplicateAgent`] on
    ///   repeated identifiers.
    /// - [`MatchError::UnknownSlot`] when a preference names a missing slot.
    /// - [`MatchError::DuplicatePreference`] when an agent lists a slot twice.
    pub fn new(agents: Vec<AgentRecord>, slots: Vec<SlotRecord>) -> Result<Self> {
        let mut slot_index = HashMap::with_capacity(slots.len());
        let mut slot_arena = Vec::with_capacity(slots.len());
        for (i, record) in slots.into_iter().enumerate() {
            if slot_index.insert(record.id.clone(), SlotId(i)).is_some() {
                return Err(MatchError::DuplicateSlot(record.id));
            }
            slot_arena.push(Slot {
                id: record.id,
                capacity: record.capacity,
            });
        }

        let mut agent_index = HashMap::with_capacity(agents.len());
        let mut agent_arena = Vec::with_capacity(agents.len());
        for (i, record) in agents.into_iter().enumerate() {
            if agent_index.insert(record.id.clone(), AgentId(i)).is_some() {
                return Err(MatchError::DuplicateAgent(record.id));
            }

            let mut seen = HashSet::with_capacity(record.preferences.len());
            let mut preferences = Vec::with_capacity(record.preferences.len());
            for slot in &record.preferences {
                let Some(&sid) = slot_index.get(slot) else {
                    return Err(MatchError::UnknownSlot {
                        agent: record.id,
                        slot: slot.clone(),
                    });
                };
                if !seen.insert(sid) {
                    return Err(MatchError::DuplicatePreference {
                        agent: record.id,
                        slot: slot.clone(),
                    });
                }
                preferences.push(sid);
            }

            agent_arena.push(Agent {
                id: record.id,
                preferences,
            });
        }

        Ok(Self {
            agents: agent_arena,
            slots: slot_arena,
            agent_index,
            slot_index,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.index()]
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Looks up an agent by external identifier.
    pub fn agent_id(&self, id: &str) -> Option<AgentId> {
        self.agent_index.get(id).copied()
    }

    /// Looks up a slot by external identifier.
    pub fn slot_id(&self, id: &str) -> Option<SlotId> {
        self.slot_index.get(id).copied()
    }

    /// Agent ids in input order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.agents.len()).map(AgentId)
    }

    /// Slot ids in input order.
    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> {
        (0..self.slots.len()).map(SlotId)
    }

    /// Sum of all slot capacities.
    pub fn total_capacity(&self) -> usize {
        self.slots.iter().map(|s| s.capacity).sum()
    }

    /// Length of the longest preference list.
    pub fn max_preference_len(&self) -> usize {
        self.agents
            .iter()
            .map(|a| a.preferences.len())
            .max()
            .unwrap_or(0)
    }
}
