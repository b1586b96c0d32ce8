//! Seed search configuration.

use crate::engine::{EngineConfig, Protocol};
use crate::error::{MatchError, Result};
use std::ops::Range;

/// Configuration for the seed search.
///
/// # Defaults
///
/// ```
/// use u_matching::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.seeds, 0..16_000);
/// assert_eq!(config.workers, 8);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_matching::engine::Protocol;
/// use u_matching::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_seeds(0..1_000)
///     .with_workers(4)
///     .with_protocol(Protocol::SlotProposing)
///     .with_max_preferences(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Seeds to try. Each seed alone determines one trial's agent order.
    pub seeds: Range<u64>,

    /// Number of concurrent workers.
    ///
    /// The seed range is split into this many contiguous parts (fewer if
    /// the range is shorter than the worker count).
    pub workers: usize,

    /// Engine settings applied to every trial.
    pub engine: EngineConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seeds: 0..16_000,
            workers: 8,
            engine: EngineConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_seeds(mut self, seeds: Range<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.engine.protocol = protocol;
        self
    }

    pub fn with_max_preferences(mut self, n: usize) -> Self {
        self.engine.max_preferences = Some(n);
        self
    }

    /// Number of seeds in the range.
    pub fn seed_count(&self) -> u64 {
        self.seeds.end.saturating_sub(self.seeds.start)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(MatchError::InvalidConfig("workers must be positive".into()));
        }
        if self.seed_count() == 0 {
            return Err(MatchError::InvalidConfig(format!(
                "seed range {}..{} is empty",
                self.seeds.start, self.seeds.end
            )));
        }
        self.engine.validate()
    }
}
