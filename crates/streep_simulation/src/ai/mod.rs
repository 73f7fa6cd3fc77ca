//! AI decision engine for vs-CPU matches.
//!
//! The controller is owned by the match orchestrator and sampled once per
//! physics tick in place of the human input source of its slot. Decisions
//! draw from the match's seeded RNG, so CPU matches replay identically.

pub mod decision;


pub use decision::{choose, AiChoice, AiConfig, AiController, DecisionView};
