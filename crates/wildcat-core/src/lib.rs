//! Wildcat progression engine.
//!
//! Owns the single mutable [`state::ProjectState`] aggregate and drives it
//! through the fixed timeline: period actions, stage-gate evaluation and
//! approval, the dry-hole recovery branch, and the production cash-flow
//! tick. All state transitions are synchronous reactions to discrete
//! action calls; the two time-based behaviors (the deferred period advance
//! and the production tick) run inside [`engine::ProjectEngine::update`]
//! and are torn down the instant the owning state is left.
//!
//! The engine exposes a read-only snapshot ([`engine::ProjectEngine::state`]),
//! a capped notification feed, and an append-only decision log; rendering
//! is someone else's job.

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod journal;
pub mod recovery;
pub mod state;

pub use engine::{EndReason, GateOutcome, ProjectEngine, RunState};
pub use error::ActionError;
