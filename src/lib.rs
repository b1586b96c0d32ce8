//! Capacitated many-to-one stable matching.
//!
//! Matches agents (e.g. students) holding ranked preference lists to slots
//! (e.g. projects) with fixed capacities, then searches over random agent
//! orders for the best overall assignment.
//!
//! - **Model**: validated [`Instance`](model::Instance) built from agent
//!   preference and slot capacity tables.
//! - **Engine**: deferred acceptance (Gale-Shapley) adapted for capacities,
//!   in agent-proposing and slot-proposing variants.
//! - **Score**: `10 / rank²` per matched agent.
//! - **Validate**: structural checks with hard violations and soft warnings.
//! - **Search**: parallel seed search that shuffles agents per seed and
//!   keeps the best matching.
//!
//! # Example
//!
//! ```
//! use u_matching::model::{AgentRecord, Instance, SlotRecord};
//! use u_matching::search::{SearchConfig, SearchRunner};
//!
//! let instance = Instance::new(
//!     vec![
//!         AgentRecord::new("alice", ["compiler", "robotics"]),
//!         AgentRecord::new("bob", ["compiler", "robotics"]),
//!     ],
//!     vec![SlotRecord::new("compiler", 1), SlotRecord::new("robotics", 1)],
//! )
//! .unwrap();
//!
//! let result = SearchRunner::run(&instance, &SearchConfig::default().with_seeds(0..16)).unwrap();
//! let best = result.best.unwrap();
//! assert_eq!(best.unmatched, 0);
//! assert!((best.score - 12.5).abs() < 1e-9);
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the `tracing` facade. Install a subscriber in the
//! application to see them.

pub mod engine;
pub mod error;
pub mod model;
pub mod random;
pub mod score;
pub mod search;
pub mod validate;

pub use error::{MatchError, Result};
