//! Engine configuration.

use crate::error::{MatchError, Result};

/// Deferred-acceptance protocol used to reach the fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Protocol {
    /// Agents propose down their lists; a full slot displaces its
    /// worst-ranked holder when the proposer ranks it higher.
    #[default]
    AgentProposing,

    /// Slots offer seats to their applicants in order; agents keep only
    /// their best offer and reject the rest.
    SlotProposing,
}

/// Configuration for a single matching run.
///
/// # Examples
///
/// ```
/// use u_matching::engine::{EngineConfig, Protocol};
///
/// let config = EngineConfig::default()
///     .with_protocol(Protocol::SlotProposing)
///     .with_max_preferences(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Protocol variant.
    pub protocol: Protocol,

    /// How many leading preferences each agent may use.
    ///
    /// `None` considers the whole list. Agents with shorter lists use
    /// their full length.
    pub max_preferences: Option<usize>,

    /// Round cap override.
    ///
    /// `None` uses [`round_cap`](super::round_cap), `|agents| × |slots|`,
    /// which neither protocol reaches on a valid instance.
    pub max_rounds: Option<usize>,
}

impl EngineConfig {
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_max_preferences(mut self, n: usize) -> Self {
        self.max_preferences = Some(n);
        self
    }

    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_preferences == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_preferences must be positive".into(),
            ));
        }
        if self.max_rounds == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_rounds must be positive".into(),
            ));
        }
        Ok(())
    }
}
