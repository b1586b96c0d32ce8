//! Matching Engine.
//!
//! Runs one deferred-acceptance resolution (Gale-Shapley adapted for slot
//! capacities) to a fixed point for a given agent processing order.
//!
//! Two protocols are provided:
//!
//! - **Agent-proposing** ([`Protocol::AgentProposing`]): agents propose down
//!   their lists; full slots displace their worst-ranked holder when the
//!   proposer ranks the slot higher.
//! - **Slot-proposing** ([`Protocol::SlotProposing`]): slots offer seats to
//!   their applicants in order; agents keep their best offer.
//!
//! Both leave every slot at or under capacity and every agent holding at
//! most the slot it accepted. Termination is bounded by a round cap of
//! `|agents| × |slots|`; hitting it is reported through [`Convergence`]
//! rather than as an error.
//!
//! # References
//!
//! - Gale & Shapley (1962), "College Admissions and the Stability of Marriage"
//! - Roth & Sotomayor (1990), "Two-Sided Matching"

mod agent_proposing;
mod config;
mod runner;
mod slot_proposing;
mod state;
mod types;

pub use config::{EngineConfig, Protocol};
pub use runner::{round_cap, MatchingEngine};
pub use state::{ApplicantQueue, MatchState};
pub use types::{AgentResult, Convergence, Matching, SlotResult};
