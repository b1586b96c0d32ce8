//! Error types for u-matching.

use thiserror::Error;

/// Errors raised while building an instance or configuring a run.
///
/// Ordinary algorithmic outcomes (a rejected proposal, an unmatched agent,
/// a round cap reached) are never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// An agent's preference list references a slot that does not exist.
    #[error("agent {agent} lists unknown slot {slot}")]
    UnknownSlot { agent: String, slot: String },

    /// Two agent records share an identifier.
    #[error("duplicate agent id: {0}")]
    DuplicateAgent(String),

    /// Two slot records share an identifier.
    #[error("duplicate slot id: {0}")]
    DuplicateSlot(String),

    /// An agent lists the same slot more than once.
    #[error("agent {agent} lists slot {slot} more than once")]
    DuplicatePreference { agent: String, slot: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;
