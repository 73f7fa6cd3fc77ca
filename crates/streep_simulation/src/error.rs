//! Match setup errors.
//!
//! The tick loop itself never fails: invariant violations are clamped or
//! dropped where they happen. The only fallible surface is building a match
//! (config parsing, stats validation, spawn placement).

use thiserror::Error;

use crate::components::PlayerSlot;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("rounds_to_win must be at least 1 (got {0})")]
    InvalidRoundsToWin(u32),

    #[error("round_time must be a positive number of seconds (got {0})")]
    InvalidRoundTime(f32),

    #[error("arena walls are inverted: left {left} >= right {right}")]
    InvalidArena { left: f32, right: f32 },

    #[error("invalid stats profile '{name}': {reason}")]
    InvalidStats { name: String, reason: &'static str },

    #[error("{slot} spawn x={x} lies outside the arena walls")]
    SpawnOutOfBounds { slot: PlayerSlot, x: f32 },

    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("failed to parse match config: {0}")]
    Config(#[from] toml::de::Error),
}
