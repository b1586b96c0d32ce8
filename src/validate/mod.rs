//! Structural validation of a completed matching.
//!
//! [`validate`] is pure: it reads the instance and the matching and returns
//! a [`ValidationReport`]. Two severities are distinguished:
//!
//! - **Violations** make the matching invalid: an agent held by more than
//!   one slot (or by a slot its own assignment does not name), or a slot
//!   holding more agents than its capacity.
//! - **Warnings** are reported but leave the matching valid: an agent
//!   matched outside its preference list, or agents left unmatched.

use crate::engine::Matching;
use crate::model::{AgentId, Instance};
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

/// A hard structural violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("agent {agent} is matched to multiple slots: {}", .slots.join(", "))]
    MultipleSlots { agent: String, slots: Vec<String> },

    #[error("agent {agent} is assigned to {assigned:?} but held by {held_by:?}")]
    Inconsistent {
        agent: String,
        assigned: Option<String>,
        held_by: Option<String>,
    },

    #[error("slot {slot} holds {held} agents but its capacity is {capacity}")]
    OverCapacity {
        slot: String,
        held: usize,
        capacity: usize,
    },
}

/// A soft warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An agent holds a slot it never listed.
    NotPreferred { agent: String, slot: String },
    /// Some agents are not matched to any slot.
    Unmatched { count: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NotPreferred { agent, slot } => {
                write!(f, "agent {agent} is matched to slot {slot} it did not prefer")
            }
            Warning::Unmatched { count } => {
                write!(f, "{count} agent(s) are not matched to any slot")
            }
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
    /// Number of unmatched agents.
    pub unmatched: usize,
}

impl ValidationReport {
    /// `true` when there are no hard violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Emits the diagnostics through `tracing`.
    pub fn log(&self) {
        for v in &self.violations {
            error!("{v}");
        }
        for w in &self.warnings {
            warn!("{w}");
        }
        if self.is_valid() {
            info!(unmatched = self.unmatched, "matching is valid");
        } else {
            error!(
                violations = self.violations.len(),
                "matching is invalid"
            );
        }
    }
}

/// Checks the structural invariants of `matching` against `instance`.
///
/// # Examples
///
/// ```
/// use u_matching::engine::{EngineConfig, MatchingEngine};
/// use u_matching::model::{AgentRecord, Instance, SlotRecord};
/// use u_matching::validate::validate;
///
/// let instance = Instance::new(
///     vec![AgentRecord::new("A1", ["S1"]), AgentRecord::new("A2", ["S1"])],
///     vec![SlotRecord::new("S1", 1)],
/// )
/// .unwrap();
/// let matching = MatchingEngine::run_in_input_order(&instance, &EngineConfig::default()).unwrap();
///
/// let report = validate(&instance, &matching);
/// assert!(report.is_valid());
/// assert_eq!(report.unmatched, 1);
/// ```
pub fn validate(instance: &Instance, matching: &Matching) -> ValidationReport {
    let mut report = ValidationReport::default();
    let agent_name = |a: AgentId| instance.agent(a).id.clone();

    // Slots holding each agent.
    let mut holders = vec![Vec::new(); instance.num_agents()];
    for slot in instance.slot_ids() {
        let held = matching.held(slot);
        for &agent in held {
            holders[agent.index()].push(slot);
        }

        let capacity = instance.slot(slot).capacity;
        if held.len() > capacity {
            report.violations.push(Violation::OverCapacity {
                slot: instance.slot(slot).id.clone(),
                held: held.len(),
                capacity,
            });
        }
    }

    for agent in instance.agent_ids() {
        let held_by = &holders[agent.index()];
        let assigned = matching.slot_of(agent);

        if held_by.len() > 1 {
            report.violations.push(Violation::MultipleSlots {
                agent: agent_name(agent),
                slots: held_by.iter().map(|&s| instance.slot(s).id.clone()).collect(),
            });
        } else if held_by.first().copied() != assigned {
            report.violations.push(Violation::Inconsistent {
                agent: agent_name(agent),
                assigned: assigned.map(|s| instance.slot(s).id.clone()),
                held_by: held_by.first().map(|&s| instance.slot(s).id.clone()),
            });
        }

        if let Some(slot) = assigned {
            if instance.agent(agent).rank_of(slot).is_none() {
                report.warnings.push(Warning::NotPreferred {
                    agent: agent_name(agent),
                    slot: instance.slot(slot).id.clone(),
                });
            }
        }
    }

    report.unmatched = matching.unmatched_count();
    if report.unmatched > 0 {
        report.warnings.push(Warning::Unmatched {
            count: report.unmatched,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Convergence, EngineConfig, MatchingEngine, Protocol};
    use crate::model::{AgentRecord, SlotId, SlotRecord};

    fn instance() -> Instance {
        Instance::new(
            vec![
                AgentRecord::new("A1", ["S1"]),
                AgentRecord::new("A2", ["S1", "S2"]),
            ],
            vec![SlotRecord::new("S1", 1), SlotRecord::new("S2", 1)],
        )
        .unwrap()
    }

    fn raw(assignment: Vec<Option<SlotId>>, held: Vec<Vec<AgentId>>) -> Matching {
        Matching {
            ranks: vec![0; assignment.len()],
            assignment,
            held,
            protocol: Protocol::AgentProposing,
            convergence: Convergence::Converged { rounds: 0 },
        }
    }

    #[test]
    fn test_engine_output_is_valid() {
        let inst = instance();
        let m = MatchingEngine::run_in_input_order(&inst, &EngineConfig::default()).unwrap();
        let report = validate(&inst, &m);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.unmatched, 0);
    }

    #[test]
    fn test_over_capacity_is_violation() {
        let inst = instance();
        let m = raw(
            vec![Some(SlotId(0)), Some(SlotId(0))],
            vec![vec![AgentId(0), AgentId(1)], vec![]],
        );
        let report = validate(&inst, &m);
        assert!(!report.is_valid());
        assert!(report.violations.contains(&Violation::OverCapacity {
            slot: "S1".into(),
            held: 2,
            capacity: 1
        }));
    }

    #[test]
    fn test_multiple_slots_is_violation() {
        let inst = instance();
        let m = raw(
            vec![None, Some(SlotId(0))],
            vec![vec![AgentId(1)], vec![AgentId(1)]],
        );
        let report = validate(&inst, &m);
        assert_eq!(
            report.violations,
            vec![Violation::MultipleSlots {
                agent: "A2".into(),
                slots: vec!["S1".into(), "S2".into()]
            }]
        );
    }

    #[test]
    fn test_one_sided_link_is_violation() {
        let inst = instance();
        let m = raw(vec![Some(SlotId(0)), None], vec![vec![], vec![]]);
        let report = validate(&inst, &m);
        assert!(matches!(
            report.violations.as_slice(),
            [Violation::Inconsistent { .. }]
        ));
    }

    #[test]
    fn test_not_preferred_is_warning_only() {
        let inst = instance();
        let m = raw(vec![Some(SlotId(1)), None], vec![vec![], vec![AgentId(0)]]);
        let report = validate(&inst, &m);
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec![
                Warning::NotPreferred {
                    agent: "A1".into(),
                    slot: "S2".into()
                },
                Warning::Unmatched { count: 1 },
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let inst = instance();
        let m = raw(vec![None, None], vec![vec![], vec![]]);
        let first = validate(&inst, &m);
        let second = validate(&inst, &m);
        assert_eq!(first, second);
        assert_eq!(first.unmatched, 2);
    }

    #[test]
    fn test_messages() {
        let w = Warning::Unmatched { count: 3 };
        assert_eq!(w.to_string(), "3 agent(s) are not matched to any slot");
        let v = Violation::OverCapacity {
            slot: "S1".into(),
            held: 2,
            capacity: 1,
        };
        assert_eq!(v.to_string(), "slot S1 holds 2 agents but its capacity is 1");
    }
}
