//! Match configuration (TOML, every field optional).
//!
//! ```toml
//! mode = "vs_cpu"
//! p1 = "margaret_thatcher"
//! p2 = "The Witch"
//! seed = 7
//!
//! [rules]
//! rounds_to_win = 3
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::AiConfig;
use crate::components::{CharacterId, PlayerSlot};
use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    #[serde(rename = "pvp")]
    PvP,
    /// P2 is driven by the AI decision engine
    #[serde(rename = "vs_cpu")]
    VsCpu,
}

/// Arena geometry in screen space (+y points down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaBounds {
    pub left_wall: f32,
    pub right_wall: f32,
    pub ground_y: f32,
    /// Projectiles leaving [0, width] are removed
    pub width: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            left_wall: 80.0,
            right_wall: 1200.0,
            ground_y: 500.0,
            width: 1280.0,
        }
    }
}

impl ArenaBounds {
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.left_wall, self.right_wall)
    }

    pub fn is_grounded(&self, y: f32) -> bool {
        y >= self.ground_y - 1.0
    }

    pub fn contains_x(&self, x: f32) -> bool {
        (self.left_wall..=self.right_wall).contains(&x)
    }
}

/// Round count, clock and the announcement/transition delays (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRules {
    pub rounds_to_win: u32,
    pub round_time: f32,
    pub round_call: f32,
    pub fight_call: f32,
    pub result_hold: f32,
    pub victory_hold: f32,
    pub intermission: f32,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            rounds_to_win: 2,
            round_time: 90.0,
            round_call: 1.8,
            fight_call: 1.0,
            result_hold: 1.5,
            victory_hold: 0.5,
            intermission: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub p1: CharacterId,
    pub p2: CharacterId,
    pub p1_spawn: [f32; 2],
    pub p2_spawn: [f32; 2],
    pub rules: RoundRules,
    pub arena: ArenaBounds,
    pub ai: AiConfig,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::PvP,
            p1: CharacterId::MirandaPriestly,
            p2: CharacterId::JuliaChild,
            p1_spawn: [300.0, 500.0],
            p2_spawn: [980.0, 500.0],
            rules: RoundRules::default(),
            arena: ArenaBounds::default(),
            ai: AiConfig::default(),
            seed: 42,
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, SetupError> {
        let config: MatchConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn spawn(&self, slot: PlayerSlot) -> Vec2 {
        let [x, y] = match slot {
            PlayerSlot::P1 => self.p1_spawn,
            PlayerSlot::P2 => self.p2_spawn,
        };
        Vec2::new(x, y)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.rules.rounds_to_win == 0 {
            return Err(SetupError::InvalidRoundsToWin(self.rules.rounds_to_win));
        }
        if !self.rules.round_time.is_finite() || self.rules.round_time <= 0.0 {
            return Err(SetupError::InvalidRoundTime(self.rules.round_time));
        }
        if self.arena.left_wall >= self.arena.right_wall {
            return Err(SetupError::InvalidArena {
                left: self.arena.left_wall,
                right: self.arena.right_wall,
            });
        }
        for slot in PlayerSlot::BOTH {
            let x = self.spawn(slot).x;
            if !self.arena.contains_x(x) {
                return Err(SetupError::SpawnOutOfBounds { slot, x });
            }
        }
        Ok(())
    }
}
