//! Fighter identity and health

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Player slot (0 = P1, 1 = P2).
///
/// Doubles as the index into the match's combatant registry, so an opponent
/// back-reference is just the other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum PlayerSlot {
    P1,
    P2,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::P1, PlayerSlot::P2];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::P1 => 0,
            PlayerSlot::P2 => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerSlot::P1 => PlayerSlot::P2,
            PlayerSlot::P2 => PlayerSlot::P1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::P1 => f.write_str("P1"),
            PlayerSlot::P2 => f.write_str("P2"),
        }
    }
}

/// Fighter health
///
/// Invariant: 0 ≤ current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Back to full; only round resets do this.
    pub fn restore(&mut self) {
        self.current = self.max;
    }

    /// Remaining health as a fraction of max (timeout decisions, HUD bars).
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}
