//! Thrown projectiles (pot, curse): fly straight, hit the non-owner once, expire.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::damage::DamageOutcome;
use super::fighter::Combatant;
use super::HIT_VERTICAL_TOLERANCE;
use crate::components::PlayerSlot;
use crate::config::ArenaBounds;
use crate::events::{AudioCue, HitSource, SimEvent, TickOutput};

pub const PROJECTILE_SPEED: f32 = 450.0;
pub const PROJECTILE_LIFETIME: f32 = 2.0;
/// Horizontal half-extent of the projectile's hit area
pub const PROJECTILE_HIT_RADIUS: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    Pot,
    Curse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: u32,
    /// +1 flies right, -1 flies left
    pub direction: f32,
    pub owner: PlayerSlot,
    pub position: Vec2,
    pub age: f32,
    pub max_lifetime: f32,
}

/// Result of one projectile tick. Anything but `Flying` removes the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    Flying,
    Expired,
    Hit(DamageOutcome),
}

impl Projectile {
    pub fn launch(
        kind: ProjectileKind,
        damage: u32,
        direction: f32,
        owner: PlayerSlot,
        position: Vec2,
    ) -> Self {
        Self {
            kind,
            damage,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            owner,
            position,
            age: 0.0,
            max_lifetime: PROJECTILE_LIFETIME,
        }
    }

    pub fn overlaps(&self, point: Vec2) -> bool {
        (point.x - self.position.x).abs() < PROJECTILE_HIT_RADIUS
            && (point.y - self.position.y).abs() < HIT_VERTICAL_TOLERANCE
    }

    /// Moves the projectile and resolves contact with `target`.
    ///
    /// Damage is attributed to the owner, and knockback points away from
    /// `owner_x`. Contact consumes the projectile even when the target
    /// ignored the damage.
    pub fn tick(
        &mut self,
        dt: f32,
        target: &mut Combatant,
        owner_x: f32,
        arena: &ArenaBounds,
        out: &mut TickOutput,
    ) -> ProjectileStep {
        self.age += dt;
        self.position.x += self.direction * PROJECTILE_SPEED * dt;

        if self.age >= self.max_lifetime || self.position.x < 0.0 || self.position.x > arena.width {
            return ProjectileStep::Expired;
        }

        if target.slot() == self.owner || !self.overlaps(target.position()) {
            return ProjectileStep::Flying;
        }

        let outcome = target.take_damage(self.damage, owner_x, out);
        if outcome.connected() {
            out.cue(self.owner, AudioCue::ProjectileHit);
            out.push(SimEvent::Hit {
                attacker: self.owner,
                target: target.slot(),
                source: HitSource::Projectile,
                outcome,
            });
        }
        ProjectileStep::Hit(outcome)
    }
}
