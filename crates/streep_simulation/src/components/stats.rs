//! Static per-character stats profiles and the built-in roster.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::combat::SpecialKind;
use crate::error::SetupError;

/// Numeric profile of one character. Built once, shared by reference, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsProfile {
    pub name: String,
    pub max_health: u32,
    /// px/s
    pub walk_speed: f32,
    pub punch_damage: u32,
    pub kick_damage: u32,
    pub special_damage: u32,
    /// Seconds between specials
    pub special_cooldown: f32,
    /// Fraction of incoming damage absorbed while blocking (0..1)
    pub block_reduction: f32,
    pub special: SpecialKind,
}

impl StatsProfile {
    pub fn validate(&self) -> Result<(), SetupError> {
        let reason = if self.max_health == 0 {
            Some("max_health must be positive")
        } else if !(0.0..=1.0).contains(&self.block_reduction) {
            Some("block_reduction must lie in [0, 1]")
        } else if !self.walk_speed.is_finite() || self.walk_speed < 0.0 {
            Some("walk_speed must be a non-negative number")
        } else if !self.special_cooldown.is_finite() || self.special_cooldown < 0.0 {
            Some("special_cooldown must be a non-negative number")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SetupError::InvalidStats {
                name: self.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Damage that gets through a block, truncated to whole points.
    ///
    /// The kept fraction is quantised to basis points first so that e.g. a
    /// 0.8 reduction keeps exactly 20 of 100 instead of 19.999….
    pub fn blocked_damage(&self, amount: u32) -> u32 {
        let kept = 1.0 - self.block_reduction.clamp(0.0, 1.0);
        let kept_bp = (kept * 10_000.0).round() as u64;
        (amount as u64 * kept_bp / 10_000) as u32
    }
}

/// Built-in characters, in select-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharacterId {
    MirandaPriestly,
    JuliaChild,
    MargaretThatcher,
    TheWitch,
    DonnaSheridan,
    SisterAloysius,
}

static ROSTER: Lazy<[Arc<StatsProfile>; 6]> = Lazy::new(|| {
    CharacterId::ALL.map(|id| Arc::new(id.build_profile()))
});

impl CharacterId {
    pub const ALL: [CharacterId; 6] = [
        CharacterId::MirandaPriestly,
        CharacterId::JuliaChild,
        CharacterId::MargaretThatcher,
        CharacterId::TheWitch,
        CharacterId::DonnaSheridan,
        CharacterId::SisterAloysius,
    ];

    /// Select-screen index; anything out of range falls back to the first character.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(CharacterId::MirandaPriestly)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CharacterId::MirandaPriestly => "Miranda Priestly",
            CharacterId::JuliaChild => "Julia Child",
            CharacterId::MargaretThatcher => "Margaret Thatcher",
            CharacterId::TheWitch => "The Witch",
            CharacterId::DonnaSheridan => "Donna Sheridan",
            CharacterId::SisterAloysius => "Sister Aloysius",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CharacterId::MirandaPriestly => "miranda_priestly",
            CharacterId::JuliaChild => "julia_child",
            CharacterId::MargaretThatcher => "margaret_thatcher",
            CharacterId::TheWitch => "the_witch",
            CharacterId::DonnaSheridan => "donna_sheridan",
            CharacterId::SisterAloysius => "sister_aloysius",
        }
    }

    /// Shared profile from the roster.
    pub fn profile(self) -> Arc<StatsProfile> {
        Arc::clone(&ROSTER[self.index()])
    }

    fn build_profile(self) -> StatsProfile {
        let (max_health, walk_speed, punch, kick, special, cooldown, block, kind) = match self {
            CharacterId::MirandaPriestly => (1000, 250.0, 80, 100, 150, 3.0, 0.8, SpecialKind::DashSlap),
            CharacterId::JuliaChild => (1000, 200.0, 70, 90, 180, 4.0, 0.8, SpecialKind::PotThrow),
            CharacterId::MargaretThatcher => (1200, 180.0, 90, 110, 250, 5.0, 0.9, SpecialKind::ArmoredStrike),
            CharacterId::TheWitch => (900, 220.0, 65, 85, 200, 3.5, 0.75, SpecialKind::CurseThrow),
            CharacterId::DonnaSheridan => (950, 280.0, 70, 85, 130, 3.0, 0.7, SpecialKind::DoubleSpin),
            CharacterId::SisterAloysius => (1100, 200.0, 85, 95, 180, 4.0, 0.92, SpecialKind::Lunge),
        };

        StatsProfile {
            name: self.display_name().to_string(),
            max_health,
            walk_speed,
            punch_damage: punch,
            kick_damage: kick,
            special_damage: special,
            special_cooldown: cooldown,
            block_reduction: block,
            special: kind,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CharacterId {
    type Err = SetupError;

    /// Accepts the config key ("the_witch") or the display name ("The Witch"), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| SetupError::UnknownCharacter(s.to_string()))
    }
}

impl TryFrom<String> for CharacterId {
    type Error = SetupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CharacterId> for String {
    fn from(id: CharacterId) -> Self {
        id.key().to_string()
    }
}
