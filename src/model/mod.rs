//! Entity model.
//!
//! Agents (students) and slots (projects) as loaded from the external
//! tables, and the validated [`Instance`] that stores them in arenas.
//!
//! # Design
//!
//! The instance is immutable once built. Agents and slots are addressed by
//! [`AgentId`] and [`SlotId`], dense indices into the arenas, so trial state
//! can be kept in flat vectors and the instance can be shared read-only
//! across worker threads.

mod instance;
mod types;

pub use instance::{Agent, Instance, Slot};
pub use types::{AgentId, AgentRecord, SlotId, SlotRecord};
