//! Per-character specials as data.
//!
//! Every character's special is one of six [`SpecialKind`] tags. Each tag
//! maps to a static [`SpecialProfile`] (duration, movement curve, strikes,
//! projectile launch, armor, extra knockback) and a single generic driver,
//! `Combatant::tick_special`, runs all of them. Breakpoints are fractions of
//! the special's duration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::damage::DamageOutcome;
use super::fighter::Combatant;
use super::projectile::{Projectile, ProjectileKind};
use crate::events::{HitSource, TickOutput};

/// Multi-hit specials track one spent flag per strike.
pub const MAX_STRIKES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    DashSlap,
    PotThrow,
    CurseThrow,
    ArmoredStrike,
    Lunge,
    DoubleSpin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikeTiming {
    /// Checked once, on the first tick inside [from, until)
    Window { from: f32, until: f32 },
    /// Checked once, on the tick the breakpoint is crossed
    At(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub timing: StrikeTiming,
    /// Horizontal distance between origins
    pub reach: f32,
    /// Special damage is divided by this (integer division)
    pub damage_divisor: u32,
}

/// Forward self-movement at `speed` while progress < `until`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    pub speed: f32,
    pub until: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub at: f32,
    pub projectile: ProjectileKind,
    /// Spawn offset from the thrower; x is mirrored by facing
    pub offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialProfile {
    pub name: &'static str,
    pub duration: f32,
    pub locomotion: Option<Locomotion>,
    pub strikes: &'static [Strike],
    pub launch: Option<Launch>,
    /// Armor stays up while progress < this
    pub armor_until: Option<f32>,
    /// Knockback speed imparted on a non-fatal, unarmored hit in reach
    pub knockback: Option<f32>,
}

const THROW_OFFSET: Vec2 = Vec2::new(50.0, -30.0);

const DASH_SLAP: SpecialProfile = SpecialProfile {
    name: "That's All",
    duration: 0.45,
    locomotion: Some(Locomotion { speed: 600.0, until: 0.6 }),
    strikes: &[Strike {
        timing: StrikeTiming::Window { from: 0.5, until: 0.7 },
        reach: 80.0,
        damage_divisor: 1,
    }],
    launch: None,
    armor_until: None,
    knockback: None,
};

const POT_THROW: SpecialProfile = SpecialProfile {
    name: "Bon Appétit",
    duration: 0.5,
    locomotion: None,
    strikes: &[],
    launch: Some(Launch {
        at: 0.5,
        projectile: ProjectileKind::Pot,
        offset: THROW_OFFSET,
    }),
    armor_until: None,
    knockback: None,
};

const CURSE_THROW: SpecialProfile = SpecialProfile {
    name: "Curse of the Woods",
    launch: Some(Launch {
        at: 0.5,
        projectile: ProjectileKind::Curse,
        offset: THROW_OFFSET,
    }),
    ..POT_THROW
};

const ARMORED_STRIKE: SpecialProfile = SpecialProfile {
    name: "Iron Fist",
    duration: 0.7,
    locomotion: Some(Locomotion { speed: 120.0, until: 0.6 }),
    strikes: &[Strike {
        timing: StrikeTiming::Window { from: 0.6, until: 0.8 },
        reach: 90.0,
        damage_divisor: 1,
    }],
    launch: None,
    armor_until: Some(0.8),
    knockback: None,
};

const LUNGE: SpecialProfile = SpecialProfile {
    name: "Divine Discipline",
    duration: 0.5,
    locomotion: Some(Locomotion { speed: 400.0, until: 0.5 }),
    strikes: &[Strike {
        timing: StrikeTiming::Window { from: 0.5, until: 0.7 },
        reach: 80.0,
        damage_divisor: 1,
    }],
    launch: None,
    armor_until: None,
    knockback: Some(500.0),
};

const DOUBLE_SPIN: SpecialProfile = SpecialProfile {
    name: "Dancing Queen",
    duration: 0.6,
    locomotion: None,
    strikes: &[
        Strike {
            timing: StrikeTiming::At(0.3),
            reach: 85.0,
            damage_divisor: 2,
        },
        Strike {
            timing: StrikeTiming::At(0.6),
            reach: 85.0,
            damage_divisor: 2,
        },
    ],
    launch: None,
    armor_until: None,
    knockback: None,
};

impl SpecialKind {
    pub fn profile(self) -> &'static SpecialProfile {
        match self {
            SpecialKind::DashSlap => &DASH_SLAP,
            SpecialKind::PotThrow => &POT_THROW,
            SpecialKind::CurseThrow => &CURSE_THROW,
            SpecialKind::ArmoredStrike => &ARMORED_STRIKE,
            SpecialKind::Lunge => &LUNGE,
            SpecialKind::DoubleSpin => &DOUBLE_SPIN,
        }
    }
}

/// Per-activation flags of a special. Cleared on every state entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialActivation {
    pub strikes: [bool; MAX_STRIKES],
    pub launched: bool,
    pub armor: bool,
}

impl Combatant {
    /// Drives the special for one tick and hands back to Idle once its duration is over.
    pub(super) fn tick_special(&mut self, opponent: Option<&mut Combatant>, out: &mut TickOutput) {
        let profile = self.stats.special.profile();
        let progress = self.state_timer / profile.duration;

        if let Some(until) = profile.armor_until {
            self.special.armor = progress < until;
        }

        self.velocity.x = match profile.locomotion {
            Some(locomotion) if progress < locomotion.until => self.facing.sign() * locomotion.speed,
            _ => 0.0,
        };

        if let Some(target) = opponent {
            for (index, strike) in profile.strikes.iter().enumerate().take(MAX_STRIKES) {
                if self.special.strikes[index] {
                    continue;
                }

                let due = match strike.timing {
                    StrikeTiming::Window { from, until } => (from..until).contains(&progress),
                    StrikeTiming::At(at) => progress >= at,
                };
                if !due {
                    continue;
                }

                // One reach check per strike: spent whether or not it connects
                self.special.strikes[index] = true;
                if (target.position.x - self.position.x).abs() >= strike.reach {
                    continue;
                }

                let damage = self.stats.special_damage / strike.damage_divisor.max(1);
                let outcome = target.take_damage(damage, self.position.x, out);

                if let Some(knockback) = profile.knockback {
                    // Invincibility swallows the damage but not the shove
                    let shoved = match outcome {
                        DamageOutcome::Staggered { .. } | DamageOutcome::Blocked { .. } => true,
                        DamageOutcome::Ignored => !target.is_ko(),
                        DamageOutcome::Armored { .. } | DamageOutcome::KnockedOut { .. } => false,
                    };
                    if shoved {
                        let away = if self.position.x < target.position.x { 1.0 } else { -1.0 };
                        target.velocity.x = away * knockback;
                    }
                }

                self.report_hit(target.slot, HitSource::Special, outcome, out);
            }
        }

        if let Some(launch) = profile.launch {
            if !self.special.launched && progress >= launch.at {
                self.special.launched = true;
                let sign = self.facing.sign();
                let origin = self.position + Vec2::new(launch.offset.x * sign, launch.offset.y);
                out.launch(Projectile::launch(
                    launch.projectile,
                    self.stats.special_damage,
                    sign,
                    self.slot,
                    origin,
                ));
            }
        }

        if self.state_timer >= profile.duration {
            self.special = SpecialActivation::default();
            self.return_to_idle(out);
        }
    }
}
