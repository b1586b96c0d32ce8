//! Engine entry point.

use super::config::{EngineConfig, Protocol};
use super::state::MatchState;
use super::types::{Convergence, Matching};
use super::{agent_proposing, slot_proposing};
use crate::error::{MatchError, Result};
use crate::model::{AgentId, Instance};
use tracing::{trace, warn};

/// Runs one deferred-acceptance resolution.
///
/// # Usage
///
/// ```
/// use u_matching::engine::{EngineConfig, MatchingEngine};
/// use u_matching::model::{AgentRecord, Instance, SlotRecord};
///
/// let instance = Instance::new(
///     vec![
///         AgentRecord::new("A1", ["S1", "S2"]),
///         AgentRecord::new("A2", ["S1", "S2"]),
///     ],
///     vec![SlotRecord::new("S1", 1), SlotRecord::new("S2", 1)],
/// )
/// .unwrap();
///
/// let matching = MatchingEngine::run_in_input_order(&instance, &EngineConfig::default()).unwrap();
/// assert_eq!(matching.unmatched_count(), 0);
/// ```
pub struct MatchingEngine;

impl MatchingEngine {
    /// Resolves the instance, processing agents in `order`.
    ///
    /// `order` must list every agent exactly once. State is built fresh for
    /// the call and nothing persists afterwards.
    ///
    /// Hitting the round cap ([`EngineConfig::max_rounds`], default
    /// [`round_cap`]) is not an error: the returned matching carries
    /// [`Convergence::RoundCapReached`] and a warning is logged.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] when the config is invalid or `order`
    /// is not a permutation of the instance's agents.
    pub fn run(instance: &Instance, order: &[AgentId], config: &EngineConfig) -> Result<Matching> {
        config.validate()?;
        check_order(instance, order)?;
        Ok(Self::resolve(instance, order, config))
    }

    /// Resolves the instance processing agents in input order (no shuffle).
    pub fn run_in_input_order(instance: &Instance, config: &EngineConfig) -> Result<Matching> {
        let order: Vec<AgentId> = instance.agent_ids().collect();
        Self::run(instance, &order, config)
    }

    /// [`run`](Self::run) without the config and order checks. Callers
    /// guarantee a validated config and a permutation of the agents.
    pub(crate) fn resolve(instance: &Instance, order: &[AgentId], config: &EngineConfig) -> Matching {
        let mut state = MatchState::new(instance);
        let cap = config.max_rounds.unwrap_or_else(|| round_cap(instance));

        let convergence = match config.protocol {
            Protocol::AgentProposing => {
                agent_proposing::resolve(&mut state, order, config.max_preferences, cap)
            }
            Protocol::SlotProposing => {
                slot_proposing::resolve(&mut state, order, config.max_preferences, cap)
            }
        };

        match convergence {
            Convergence::Converged { rounds } => {
                trace!(protocol = ?config.protocol, rounds, "matching converged");
            }
            Convergence::RoundCapReached { rounds, pending } => {
                warn!(
                    protocol = ?config.protocol,
                    rounds,
                    pending,
                    "round cap reached before a fixed point; keeping partial matching"
                );
            }
        }

        state.into_matching(config.protocol, convergence)
    }
}

/// Hard bound on rounds: `|agents| × |slots|`, at least one.
pub fn round_cap(instance: &Instance) -> usize {
    instance
        .num_agents()
        .saturating_mul(instance.num_slots())
        .max(1)
}

fn check_order(instance: &Instance, order: &[AgentId]) -> Result<()> {
    let n = instance.num_agents();
    let mut seen = vec![false; n];
    let is_permutation = order.len() == n
        && order
            .iter()
            .all(|a| a.index() < n && !std::mem::replace(&mut seen[a.index()], true));

    if is_permutation {
        Ok(())
    } else {
        Err(MatchError::InvalidConfig(
            "processing order must list every agent exactly once".into(),
        ))
    }
}
