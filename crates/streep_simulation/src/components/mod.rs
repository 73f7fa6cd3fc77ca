//! Plain data shared by every simulation subsystem
//!
//! - actor: player slots and health
//! - intent: the eight-channel input abstraction (human and AI)
//! - stats: per-character profiles and the built-in roster

pub mod actor;
pub mod intent;
pub mod stats;

pub use actor::*;
pub use intent::*;
pub use stats::*;
